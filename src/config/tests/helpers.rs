//! Layer builders for `DaigestConfig` tests.
//!
//! Each test states its layers as `(Source, json)` pairs and merges them the
//! way `DaigestConfig::load` would, without reading `DAIGEST_*` variables,
//! `.daigest.toml`, or the command line.

use ortho_config::MergeComposer;
use serde_json::Value;

use crate::DaigestConfig;

/// Where a configuration layer comes from, lowest precedence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Defaults,
    File,
    Environment,
    Cli,
}

/// Merges `layers` in order, later sources overriding earlier ones.
pub fn merge_layers(layers: &[(Source, Value)]) -> DaigestConfig {
    let mut composer = MergeComposer::new();
    for (source, layer) in layers {
        let owned = layer.clone();
        match source {
            Source::Defaults => composer.push_defaults(owned),
            Source::File => composer.push_file(owned, None),
            Source::Environment => composer.push_environment(owned),
            Source::Cli => composer.push_cli(owned),
        }
    }

    DaigestConfig::merge_from_layers(composer.layers()).expect("layers should merge")
}
