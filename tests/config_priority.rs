#![allow(clippy::unwrap_used)]
//! Config priority contract tests.
//!
//! Priority order (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables
//! 3. Config file
//! 4. Built-in defaults

use csvtl_cli::config::{
    ConfigFile, CsvtlConfig, GoogleConfig, PROJECT_ENV, ResolveOptions, resolve_config,
};
use serial_test::serial;

const TOKEN_ENV: &str = "CSVTL_PRIORITY_TEST_TOKEN";

fn make_config_with_defaults() -> ConfigFile {
    ConfigFile {
        csvtl: CsvtlConfig {
            to: Some("ja".to_string()),
            concurrency: Some(3),
            timeout_secs: Some(20),
        },
        google: GoogleConfig {
            project: Some("config-project".to_string()),
            location: Some("us-central1".to_string()),
            endpoint: Some("http://localhost:8080".to_string()),
            access_token: Some("config-token".to_string()),
            access_token_env: Some(TOKEN_ENV.to_string()),
        },
    }
}

fn reset_env() {
    // SAFETY: every test in this file is serialized
    unsafe {
        std::env::remove_var(PROJECT_ENV);
        std::env::remove_var(TOKEN_ENV);
    }
}

#[test]
#[serial]
fn test_config_file_used_when_nothing_else_set() {
    reset_env();

    let resolved = resolve_config(&ResolveOptions::default(), &make_config_with_defaults()).unwrap();

    assert_eq!(resolved.project, "config-project");
    assert_eq!(resolved.access_token, "config-token");
    assert_eq!(resolved.location, "us-central1");
    assert_eq!(resolved.endpoint, "http://localhost:8080");
    assert_eq!(resolved.target_language, "ja");
    assert_eq!(resolved.concurrency, 3);
}

#[test]
#[serial]
fn test_env_overrides_config_file() {
    reset_env();
    // SAFETY: every test in this file is serialized
    unsafe {
        std::env::set_var(PROJECT_ENV, "env-project");
        std::env::set_var(TOKEN_ENV, "env-token");
    }

    let resolved = resolve_config(&ResolveOptions::default(), &make_config_with_defaults()).unwrap();

    assert_eq!(resolved.project, "env-project");
    assert_eq!(resolved.access_token, "env-token");
    reset_env();
}

#[test]
#[serial]
fn test_cli_overrides_env_and_file() {
    reset_env();
    // SAFETY: every test in this file is serialized
    unsafe { std::env::set_var(PROJECT_ENV, "env-project") };

    let options = ResolveOptions {
        to: Some("fr".to_string()),
        project: Some("cli-project".to_string()),
        location: Some("europe-west4".to_string()),
        concurrency: Some(12),
        timeout_secs: Some(2),
    };
    let resolved = resolve_config(&options, &make_config_with_defaults()).unwrap();

    assert_eq!(resolved.project, "cli-project");
    assert_eq!(resolved.target_language, "fr");
    assert_eq!(resolved.location, "europe-west4");
    assert_eq!(resolved.concurrency, 12);
    assert_eq!(resolved.timeout.as_secs(), 2);
    reset_env();
}

#[test]
#[serial]
fn test_empty_env_values_are_ignored() {
    reset_env();
    // SAFETY: every test in this file is serialized
    unsafe {
        std::env::set_var(PROJECT_ENV, "");
        std::env::set_var(TOKEN_ENV, "");
    }

    let resolved = resolve_config(&ResolveOptions::default(), &make_config_with_defaults()).unwrap();

    assert_eq!(resolved.project, "config-project");
    assert_eq!(resolved.access_token, "config-token");
    reset_env();
}
