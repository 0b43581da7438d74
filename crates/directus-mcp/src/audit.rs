// crates/directus-mcp/src/audit.rs
// ============================================================================
// Module: MCP Audit Logging
// Description: Structured audit events for tool call handling.
// Purpose: Emit redacted audit logs without hard dependencies.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! This module defines audit event payloads and sinks for tool call logging.
//! Events carry the tool name, outcome, request identifier, and payload
//! sizes; argument payloads and credentials are never recorded. Sinks write
//! to stderr so audit output can never interleave with the framed JSON-RPC
//! stream on stdout.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Tool call audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct ToolCallAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Request identifier when provided.
    pub request_id: Option<String>,
    /// Tool name exactly as the client requested it.
    pub tool: String,
    /// Call outcome.
    pub outcome: ToolCallOutcome,
    /// Request body size in bytes.
    pub request_bytes: usize,
    /// Response body size in bytes.
    pub response_bytes: usize,
}

/// Inputs required to construct a tool call audit event.
pub struct ToolCallAuditEventParams {
    /// Request identifier when provided.
    pub request_id: Option<String>,
    /// Tool name exactly as the client requested it.
    pub tool: String,
    /// Call outcome.
    pub outcome: ToolCallOutcome,
    /// Request body size in bytes.
    pub request_bytes: usize,
    /// Response body size in bytes.
    pub response_bytes: usize,
}

impl ToolCallAuditEvent {
    /// Builds a tool call event stamped with the current time.
    #[must_use]
    pub fn new(params: ToolCallAuditEventParams) -> Self {
        let timestamp_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|duration| duration.as_millis())
            .unwrap_or_default();
        Self {
            event: "tool_call",
            timestamp_ms,
            request_id: params.request_id,
            tool: params.tool,
            outcome: params.outcome,
            request_bytes: params.request_bytes,
            response_bytes: params.response_bytes,
        }
    }
}

/// Outcome classification for a tool call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolCallOutcome {
    /// The tool produced a normal result.
    Success,
    /// The tool reported a failure envelope.
    Error,
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink for tool call events.
pub trait AuditSink: Send + Sync {
    /// Records a tool call event.
    fn record_tool_call(&self, event: &ToolCallAuditEvent);
}

/// Audit sink that writes JSON lines to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrAuditSink;

impl AuditSink for StderrAuditSink {
    fn record_tool_call(&self, event: &ToolCallAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record_tool_call(&self, _event: &ToolCallAuditEvent) {}
}

// ============================================================================
// SECTION: Tests
// ============================================================================
