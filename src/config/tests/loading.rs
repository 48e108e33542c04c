//! Tests loading configuration from CLI arguments and the environment.

use std::ffi::OsString;

use ortho_config::OrthoConfig;
use rstest::rstest;

use crate::DaigestConfig;

/// Loads configuration with an isolated home directory and the given
/// environment overrides.
fn load_with(env: &[(&str, Option<&str>)], cli_args: &[&str]) -> DaigestConfig {
    let temp_dir = tempfile::TempDir::new().expect("temp dir should be created");
    let home = temp_dir.path().to_string_lossy().to_string();

    let mut vars: Vec<(&str, Option<&str>)> = vec![
        ("HOME", Some(home.as_str())),
        ("XDG_CONFIG_HOME", Some(home.as_str())),
    ];
    vars.extend_from_slice(env);
    let _guard = env_lock::lock_env(vars);

    let mut args: Vec<OsString> = vec![OsString::from("daigest")];
    args.extend(cli_args.iter().map(OsString::from));

    DaigestConfig::load_from_iter(args).expect("config should load")
}

#[rstest]
fn loads_short_flags_from_cli() {
    let config = load_with(
        &[],
        &["-g", "alice", "-e", "alice@example.com", "-c", "week.ics", "-m", "llama2"],
    );

    assert_eq!(config.github_handle.as_deref(), Some("alice"));
    assert_eq!(config.email.as_deref(), Some("alice@example.com"));
    assert_eq!(config.calendar.as_deref(), Some("week.ics"));
    assert_eq!(config.model, "llama2");
}

#[rstest]
fn loads_prefixed_environment_variables() {
    let config = load_with(
        &[
            ("DAIGEST_GITHUB_HANDLE", Some("bob")),
            ("DAIGEST_MAX_PAGES", Some("7")),
        ],
        &[],
    );

    assert_eq!(config.github_handle.as_deref(), Some("bob"));
    assert_eq!(config.max_pages, 7);
}

#[rstest]
fn cli_flag_overrides_environment() {
    let config = load_with(
        &[("DAIGEST_PER_PAGE", Some("10"))],
        &["--per-page", "100"],
    );

    assert_eq!(config.per_page, 100, "CLI should override DAIGEST_PER_PAGE");
}

#[rstest]
fn boolean_flags_load_from_cli() {
    let config = load_with(&[], &["--activity-only", "--dry-run"]);

    assert!(config.activity_only);
    assert!(config.dry_run);
}
