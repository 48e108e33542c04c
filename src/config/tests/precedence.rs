//! Tests for configuration layer precedence.

use rstest::rstest;
use serde_json::{Value, json};

use super::helpers::{Source, merge_layers};

#[rstest]
#[case::file_overrides_defaults(
    vec![(Source::Defaults, json!({"github_handle": "default-user"})), (Source::File, json!({"github_handle": "file-user"}))],
    "github_handle",
    "file-user",
    "file should override default"
)]
#[case::environment_overrides_file(
    vec![(Source::File, json!({"token": "file-token"})), (Source::Environment, json!({"token": "env-token"}))],
    "token",
    "env-token",
    "environment should override file"
)]
#[case::cli_overrides_environment(
    vec![(Source::Environment, json!({"email": "env@example.com"})), (Source::Cli, json!({"email": "cli@example.com"}))],
    "email",
    "cli@example.com",
    "CLI should override environment"
)]
#[case::model_defaults_file_env_cli(
    vec![
        (Source::Defaults, json!({"model": "claude3"})),
        (Source::File, json!({"model": "llama2"})),
        (Source::Environment, json!({"model": "jurassic2"})),
        (Source::Cli, json!({"model": "llama2"}))
    ],
    "model",
    "llama2",
    "CLI should win for model"
)]
fn test_layer_precedence(
    #[case] layers: Vec<(Source, Value)>,
    #[case] field: &str,
    #[case] expected: &str,
    #[case] message: &str,
) {
    let config = merge_layers(&layers);

    let actual = match field {
        "github_handle" => config.github_handle.as_deref(),
        "token" => config.token.as_deref(),
        "email" => config.email.as_deref(),
        "model" => Some(config.model.as_str()),
        _ => panic!("unknown field: {field}"),
    };

    assert_eq!(actual, Some(expected), "{message}");
}

#[rstest]
fn defaults_apply_when_no_sources_provided() {
    let config = merge_layers(&[(
        Source::Defaults,
        json!({"github_handle": null, "token": null}),
    )]);

    assert!(config.github_handle.is_none(), "github_handle should be None");
    assert!(config.token.is_none(), "token should be None");
    assert_eq!(config.model, "claude3", "model should default to claude3");
    assert_eq!(config.github_api_url, "https://api.github.com");
    assert_eq!(config.per_page, 30, "per_page should default to 30");
    assert_eq!(config.max_pages, 100, "max_pages should default to 100");
    assert_eq!(config.bedrock_region, "us-east-1");
    assert_eq!(config.model_timeout_seconds, 120);
    assert_eq!(config.http_timeout_seconds, 30);
    assert!(!config.activity_only, "activity_only should default to false");
    assert!(!config.dry_run, "dry_run should default to false");
}

#[rstest]
fn full_precedence_chain() {
    let config = merge_layers(&[
        (
            Source::Defaults,
            json!({"github_handle": "default", "token": "default-token", "per_page": 30}),
        ),
        (
            Source::File,
            json!({"github_handle": "file", "token": "file-token", "per_page": 50}),
        ),
        (Source::Environment, json!({"github_handle": "env", "per_page": 75})),
        (Source::Cli, json!({"github_handle": "cli"})),
    ]);

    assert_eq!(config.github_handle.as_deref(), Some("cli"), "CLI wins for github_handle");
    assert_eq!(
        config.token.as_deref(),
        Some("file-token"),
        "file wins for token (no env/cli override)"
    );
    assert_eq!(config.per_page, 75, "environment wins for per_page");
}

#[rstest]
fn dry_run_layer_precedence_defaults_file_cli() {
    let config = merge_layers(&[
        (Source::Defaults, json!({"dry_run": false})),
        (Source::File, json!({"dry_run": true})),
        (Source::Cli, json!({"dry_run": false})),
    ]);

    assert!(!config.dry_run, "CLI layer should win for dry_run");
}
