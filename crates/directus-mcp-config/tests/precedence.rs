// crates/directus-mcp-config/tests/precedence.rs
// ============================================================================
// Module: Config Precedence Tests
// Description: Per-field precedence across environment, arguments, and file.
// Purpose: Verify each field resolves independently, first present wins.
// Dependencies: directus-mcp-config
// ============================================================================

//! ## Overview
//! Exercises the four-tier precedence ladder for every configuration field
//! and confirms fields resolve independently of their siblings.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::collections::BTreeMap;

use directus_mcp_config::ConfigField;
use directus_mcp_config::FieldSource;
use directus_mcp_config::resolve;

/// File tier with a distinct value for every field.
const FILE_ALL_FIELDS: &str = r#"{
    "DIRECTUS_URL": "https://file.example",
    "DIRECTUS_ACCESS_TOKEN": "file-token",
    "DIRECTUS_EMAIL": "file@example.com",
    "DIRECTUS_PASSWORD": "file-password"
}"#;

/// Argument tier with a distinct value for every field.
fn all_field_args() -> Vec<String> {
    vec![
        "--directus-url=https://arg.example".to_string(),
        "--directus-token=arg-token".to_string(),
        "--directus-email=arg@example.com".to_string(),
        "--directus-password=arg-password".to_string(),
    ]
}

/// Environment tier with a distinct value for every field.
fn all_field_env() -> BTreeMap<String, String> {
    let mut env = BTreeMap::new();
    env.insert("DIRECTUS_URL".to_string(), "https://env.example".to_string());
    env.insert("DIRECTUS_ACCESS_TOKEN".to_string(), "env-token".to_string());
    env.insert("DIRECTUS_EMAIL".to_string(), "env@example.com".to_string());
    env.insert("DIRECTUS_PASSWORD".to_string(), "env-password".to_string());
    env
}

#[test]
fn environment_wins_over_all_lower_tiers() {
    let resolution = resolve(&all_field_env(), &all_field_args(), Some(FILE_ALL_FIELDS));
    let config = resolution.config.config();
    assert_eq!(config.base_url, "https://env.example");
    assert_eq!(config.access_token, "env-token");
    assert_eq!(config.email, "env@example.com");
    assert_eq!(config.password, "env-password");
    for field in ConfigField::ALL {
        assert_eq!(resolution.config.source(field), FieldSource::Environment);
        assert!(resolution.config.from_environment(field));
    }
}

#[test]
fn arguments_win_over_file_and_defaults() {
    let resolution = resolve(&BTreeMap::new(), &all_field_args(), Some(FILE_ALL_FIELDS));
    let config = resolution.config.config();
    assert_eq!(config.base_url, "https://arg.example");
    assert_eq!(config.access_token, "arg-token");
    assert_eq!(config.email, "arg@example.com");
    assert_eq!(config.password, "arg-password");
    for field in ConfigField::ALL {
        assert_eq!(resolution.config.source(field), FieldSource::Argument);
        assert!(!resolution.config.from_environment(field));
    }
}

#[test]
fn file_wins_over_defaults() {
    let resolution = resolve(&BTreeMap::new(), &[], Some(FILE_ALL_FIELDS));
    let config = resolution.config.config();
    assert_eq!(config.base_url, "https://file.example");
    assert_eq!(config.access_token, "file-token");
    assert_eq!(config.email, "file@example.com");
    assert_eq!(config.password, "file-password");
    for field in ConfigField::ALL {
        assert_eq!(resolution.config.source(field), FieldSource::File);
    }
}

#[test]
fn fields_resolve_independently() {
    // URL from env, token from an argument, email from the file, password
    // from defaults: the ladder is evaluated per field, not per tier.
    let mut env = BTreeMap::new();
    env.insert("DIRECTUS_URL".to_string(), "https://env.example".to_string());
    let args = vec!["--directus-token=arg-token".to_string()];
    let file = r#"{"DIRECTUS_EMAIL": "file@example.com"}"#;

    let resolution = resolve(&env, &args, Some(file));
    let config = resolution.config.config();
    assert_eq!(config.base_url, "https://env.example");
    assert_eq!(config.access_token, "arg-token");
    assert_eq!(config.email, "file@example.com");
    assert_eq!(config.password, "default-password-for-dev");
    assert_eq!(resolution.config.source(ConfigField::BaseUrl), FieldSource::Environment);
    assert_eq!(resolution.config.source(ConfigField::AccessToken), FieldSource::Argument);
    assert_eq!(resolution.config.source(ConfigField::Email), FieldSource::File);
    assert_eq!(resolution.config.source(ConfigField::Password), FieldSource::Default);
}

#[test]
fn server_args_are_preserved_verbatim() {
    let args = vec!["--directus-url=https://arg.example".to_string(), "--unrelated".to_string()];
    let resolution = resolve(&BTreeMap::new(), &args, None);
    assert_eq!(resolution.config.server_args(), args.as_slice());
}

#[test]
fn empty_environment_value_falls_through_to_lower_tiers() {
    // An exported-but-empty variable does not count as present.
    let mut env = BTreeMap::new();
    env.insert("DIRECTUS_ACCESS_TOKEN".to_string(), String::new());
    let resolution = resolve(&env, &[], Some(FILE_ALL_FIELDS));
    assert_eq!(resolution.config.config().access_token, "file-token");
    assert_eq!(resolution.config.source(ConfigField::AccessToken), FieldSource::File);
}
