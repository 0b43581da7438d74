// crates/directus-mcp-config/src/lib.rs
// ============================================================================
// Module: Directus MCP Config
// Description: Startup configuration resolution for the Directus MCP server.
// Purpose: Merge environment, arguments, file, and defaults into one value.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Connection settings are resolved exactly once at startup from four source
//! tiers, highest precedence first: environment variables, `--key=value`
//! process arguments, an optional JSON configuration file, and built-in
//! defaults. Each field is resolved independently, so one field may come from
//! the environment while a sibling comes from the file. The result is
//! immutable; re-reading any tier after startup is not supported.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::ConfigError;
pub use config::ConfigField;
pub use config::ConfigWarning;
pub use config::DirectusConfig;
pub use config::FieldSource;
pub use config::Resolution;
pub use config::ResolvedConfig;
pub use config::load_config_file;
pub use config::resolve;
