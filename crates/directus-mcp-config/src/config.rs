// crates/directus-mcp-config/src/config.rs
// ============================================================================
// Module: Configuration Resolution
// Description: Four-tier precedence merge for Directus connection settings.
// Purpose: Produce one immutable configuration value from explicit inputs.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! `resolve` is a pure function over explicit inputs: an environment
//! snapshot, the raw argument list, and the optional config-file text. It
//! performs no I/O and touches no process-wide state. File problems are
//! downgraded to [`ConfigWarning`] diagnostics and never abort startup.
//!
//! ## Invariants
//! - Every field holds exactly one value after resolution; a field is never
//!   partially merged from more than one tier.
//! - The winning tier is recorded per field for later introspection.
//! - The result is immutable for the lifetime of the process.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum configuration file size in bytes.
pub const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

// ============================================================================
// SECTION: Configuration Fields
// ============================================================================

/// The four resolvable connection settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    /// Base URL of the Directus deployment.
    BaseUrl,
    /// Static access token used for bearer authentication.
    AccessToken,
    /// Account email for the `login` tool.
    Email,
    /// Account password for the `login` tool.
    Password,
}

impl ConfigField {
    /// All fields in resolution order.
    pub const ALL: [Self; 4] = [Self::BaseUrl, Self::AccessToken, Self::Email, Self::Password];

    /// Environment variable consulted for this field.
    #[must_use]
    pub const fn env_var(self) -> &'static str {
        match self {
            Self::BaseUrl => "DIRECTUS_URL",
            Self::AccessToken => "DIRECTUS_ACCESS_TOKEN",
            Self::Email => "DIRECTUS_EMAIL",
            Self::Password => "DIRECTUS_PASSWORD",
        }
    }

    /// `--key=` argument prefix consulted for this field.
    #[must_use]
    pub const fn arg_prefix(self) -> &'static str {
        match self {
            Self::BaseUrl => "--directus-url=",
            Self::AccessToken => "--directus-token=",
            Self::Email => "--directus-email=",
            Self::Password => "--directus-password=",
        }
    }

    /// JSON key consulted in the configuration file (matches the env var).
    #[must_use]
    pub const fn file_key(self) -> &'static str {
        self.env_var()
    }

    /// Built-in development default for this field.
    #[must_use]
    const fn default_value(self) -> &'static str {
        match self {
            Self::BaseUrl => "https://example.com",
            Self::AccessToken => "default-token-for-dev",
            Self::Email => "user@example.com",
            Self::Password => "default-password-for-dev",
        }
    }

    /// Stable index used for per-field source bookkeeping.
    #[must_use]
    const fn index(self) -> usize {
        match self {
            Self::BaseUrl => 0,
            Self::AccessToken => 1,
            Self::Email => 2,
            Self::Password => 3,
        }
    }
}

/// Source tier that supplied a resolved field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSource {
    /// Environment variable (highest precedence).
    Environment,
    /// `--key=value` process argument.
    Argument,
    /// JSON configuration file.
    File,
    /// Built-in default (lowest precedence).
    Default,
}

// ============================================================================
// SECTION: Resolved Configuration
// ============================================================================

/// Connection and credential values used for Directus calls.
#[derive(Debug, Clone)]
pub struct DirectusConfig {
    /// Base URL of the Directus deployment.
    pub base_url: String,
    /// Static access token used for bearer authentication.
    pub access_token: String,
    /// Account email for the `login` tool.
    pub email: String,
    /// Account password for the `login` tool.
    pub password: String,
}

/// Immutable effective configuration with per-field provenance.
///
/// # Invariants
/// - Values and provenance never change after construction.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Resolved connection values.
    config: DirectusConfig,
    /// Winning tier per field, indexed by [`ConfigField::index`].
    sources: [FieldSource; 4],
    /// Raw process arguments observed at startup.
    args: Vec<String>,
}

impl ResolvedConfig {
    /// Returns the resolved connection values.
    #[must_use]
    pub const fn config(&self) -> &DirectusConfig {
        &self.config
    }

    /// Returns the tier that supplied the given field.
    #[must_use]
    pub const fn source(&self, field: ConfigField) -> FieldSource {
        self.sources[field.index()]
    }

    /// Returns true when the field came from an environment variable.
    #[must_use]
    pub fn from_environment(&self, field: ConfigField) -> bool {
        self.source(field) == FieldSource::Environment
    }

    /// Returns the raw process arguments observed at startup.
    #[must_use]
    pub fn server_args(&self) -> &[String] {
        &self.args
    }

    /// Returns the resolved value of the given field.
    #[must_use]
    pub fn value(&self, field: ConfigField) -> &str {
        match field {
            ConfigField::BaseUrl => &self.config.base_url,
            ConfigField::AccessToken => &self.config.access_token,
            ConfigField::Email => &self.config.email,
            ConfigField::Password => &self.config.password,
        }
    }
}

/// Resolution output: the effective configuration plus diagnostics.
#[derive(Debug)]
pub struct Resolution {
    /// The effective, immutable configuration.
    pub config: ResolvedConfig,
    /// Non-fatal diagnostics produced while resolving.
    pub warnings: Vec<ConfigWarning>,
}

// ============================================================================
// SECTION: Errors and Diagnostics
// ============================================================================

/// Fatal configuration-file access errors (reported, then recovered by the
/// caller with a `None` file tier).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("unable to read config file: {0}")]
    Unreadable(String),
    /// The file exceeds the size cap.
    #[error("config file too large: {0} bytes")]
    TooLarge(u64),
}

/// Non-fatal diagnostics emitted during resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigWarning {
    /// The file tier was supplied but is not valid JSON.
    #[error("config file is not valid JSON; using environment variables or default values")]
    FileInvalid,
    /// The file tier parsed, but the top level is not a JSON object.
    #[error("config file must contain a JSON object; using environment variables or default values")]
    FileNotObject,
}

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Resolves the effective configuration from explicit source tiers.
///
/// Precedence per field, highest first: environment variable, `--key=value`
/// argument (last occurrence wins), configuration-file value, built-in
/// default. The file tier is parsed at most once; parse failures downgrade to
/// warnings and the affected fields fall through to defaults.
#[must_use]
pub fn resolve(env: &BTreeMap<String, String>, args: &[String], file: Option<&str>) -> Resolution {
    let mut warnings = Vec::new();
    let file_values = parse_file_tier(file, &mut warnings);

    let mut values: [Option<(String, FieldSource)>; 4] = [None, None, None, None];
    for field in ConfigField::ALL {
        values[field.index()] = Some(resolve_field(field, env, args, file_values.as_ref()));
    }
    let sources = [
        field_source(&values, ConfigField::BaseUrl),
        field_source(&values, ConfigField::AccessToken),
        field_source(&values, ConfigField::Email),
        field_source(&values, ConfigField::Password),
    ];
    let config = DirectusConfig {
        base_url: take_value(&mut values, ConfigField::BaseUrl),
        access_token: take_value(&mut values, ConfigField::AccessToken),
        email: take_value(&mut values, ConfigField::Email),
        password: take_value(&mut values, ConfigField::Password),
    };

    Resolution {
        config: ResolvedConfig {
            config,
            sources,
            args: args.to_vec(),
        },
        warnings,
    }
}

/// Resolves one field as "first present wins" across the ordered tiers.
fn resolve_field(
    field: ConfigField,
    env: &BTreeMap<String, String>,
    args: &[String],
    file: Option<&Map<String, Value>>,
) -> (String, FieldSource) {
    let tiers = [
        (lookup_env(env, field), FieldSource::Environment),
        (lookup_arg(args, field), FieldSource::Argument),
        (lookup_file(file, field), FieldSource::File),
    ];
    for (value, source) in tiers {
        if let Some(value) = value {
            return (value, source);
        }
    }
    (field.default_value().to_string(), FieldSource::Default)
}

/// Looks up the environment tier for a field; empty values do not count as
/// present.
fn lookup_env(env: &BTreeMap<String, String>, field: ConfigField) -> Option<String> {
    env.get(field.env_var()).filter(|value| !value.is_empty()).cloned()
}

/// Looks up the argument tier for a field; the last occurrence wins.
fn lookup_arg(args: &[String], field: ConfigField) -> Option<String> {
    args.iter().rev().find_map(|arg| arg.strip_prefix(field.arg_prefix())).map(str::to_string)
}

/// Looks up the file tier for a field; empty strings do not count as present.
fn lookup_file(file: Option<&Map<String, Value>>, field: ConfigField) -> Option<String> {
    let value = file?.get(field.file_key())?.as_str()?;
    if value.is_empty() {
        return None;
    }
    Some(value.to_string())
}

/// Parses the raw file tier, downgrading failures to warnings.
fn parse_file_tier(
    file: Option<&str>,
    warnings: &mut Vec<ConfigWarning>,
) -> Option<Map<String, Value>> {
    let text = file?;
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Some(map),
        Ok(_) => {
            warnings.push(ConfigWarning::FileNotObject);
            None
        }
        Err(_) => {
            warnings.push(ConfigWarning::FileInvalid);
            None
        }
    }
}

/// Reads the source tier recorded for a field.
fn field_source(values: &[Option<(String, FieldSource)>; 4], field: ConfigField) -> FieldSource {
    match &values[field.index()] {
        Some((_, source)) => *source,
        None => FieldSource::Default,
    }
}

/// Takes the resolved value for a field out of the working array.
fn take_value(values: &mut [Option<(String, FieldSource)>; 4], field: ConfigField) -> String {
    match values[field.index()].take() {
        Some((value, _)) => value,
        None => field.default_value().to_string(),
    }
}

// ============================================================================
// SECTION: File Loading
// ============================================================================

/// Reads the optional configuration file next to the installed binary.
///
/// Returns `Ok(None)` when the file does not exist; absence is not an error.
///
/// # Errors
///
/// Returns [`ConfigError`] when the file exists but cannot be read or
/// exceeds [`MAX_CONFIG_FILE_SIZE`].
pub fn load_config_file(path: &Path) -> Result<Option<String>, ConfigError> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(ConfigError::Unreadable(err.to_string())),
    };
    if metadata.len() > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::TooLarge(metadata.len()));
    }
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(err) => Err(ConfigError::Unreadable(err.to_string())),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
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

    use super::ConfigField;
    use super::FieldSource;
    use super::resolve;

    #[test]
    fn defaults_apply_when_no_source_present() {
        let resolution = resolve(&BTreeMap::new(), &[], None);
        assert_eq!(resolution.config.config().base_url, "https://example.com");
        assert_eq!(resolution.config.source(ConfigField::BaseUrl), FieldSource::Default);
        assert!(resolution.warnings.is_empty());
    }

    #[test]
    fn last_repeated_argument_wins() {
        let args =
            vec!["--directus-url=https://first.example".to_string(), "--directus-url=https://second.example".to_string()];
        let resolution = resolve(&BTreeMap::new(), &args, None);
        assert_eq!(resolution.config.config().base_url, "https://second.example");
        assert_eq!(resolution.config.source(ConfigField::BaseUrl), FieldSource::Argument);
    }

    #[test]
    fn empty_file_value_falls_through_to_default() {
        let file = r#"{"DIRECTUS_URL": ""}"#;
        let resolution = resolve(&BTreeMap::new(), &[], Some(file));
        assert_eq!(resolution.config.config().base_url, "https://example.com");
        assert_eq!(resolution.config.source(ConfigField::BaseUrl), FieldSource::Default);
    }
}
