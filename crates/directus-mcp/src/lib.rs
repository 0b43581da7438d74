// crates/directus-mcp/src/lib.rs
// ============================================================================
// Module: Directus MCP Library
// Description: MCP server runtime for the Directus REST API.
// Purpose: Expose Directus operations as MCP tools over stdio JSON-RPC.
// Dependencies: base64, directus-mcp-config, directus-mcp-contract, reqwest
// ============================================================================

//! ## Overview
//! This crate hosts the Directus MCP runtime: a declarative operation
//! registry, a blocking HTTP client for the Directus REST surface, a tool
//! router that validates arguments and renders results, and the framed stdio
//! JSON-RPC transport. Configuration comes from `directus-mcp-config`; the
//! advertised tool surface comes from `directus-mcp-contract`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod client;
pub mod registry;
pub mod server;
pub mod tools;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::AuditSink;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use audit::ToolCallAuditEvent;
pub use audit::ToolCallAuditEventParams;
pub use audit::ToolCallOutcome;
pub use client::DirectusClient;
pub use client::DirectusError;
pub use server::McpServer;
pub use server::McpServerError;
pub use tools::ToolError;
pub use tools::ToolRouter;
