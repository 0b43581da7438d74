// crates/directus-mcp-contract/src/lib.rs
// ============================================================================
// Module: Directus MCP Contract Library
// Description: Canonical MCP tool surface for the Directus MCP server.
// Purpose: Single source of truth for tool names, descriptions, and schemas.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The contract library defines the external MCP tool surface: every tool
//! name, its human-readable description, and the JSON schema advertised for
//! its input. The runtime derives its `tools/list` response directly from
//! this crate, so the listing and the dispatch table can never drift apart
//! silently.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod tooling;
pub mod types;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use tooling::tool_definitions;
pub use types::ToolDefinition;
pub use types::ToolName;
