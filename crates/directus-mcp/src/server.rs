// crates/directus-mcp/src/server.rs
// ============================================================================
// Module: MCP Server
// Description: Stdio JSON-RPC 2.0 transport for the Directus tool surface.
// Purpose: Frame requests and responses and route calls to the tool router.
// Dependencies: directus-mcp-config, serde, serde_json
// ============================================================================

//! ## Overview
//! The server reads `Content-Length`-framed JSON-RPC 2.0 requests from stdin
//! and writes framed responses to stdout. Only `tools/list` and `tools/call`
//! are served. Tool-level failures never become JSON-RPC errors; the router
//! renders them into the text content channel so clients always receive a
//! well-formed tool result. Every `tools/call` emits one audit event carrying
//! the request identifier and framed payload sizes. Stdout carries nothing
//! but framed responses; diagnostics go to stderr.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::BufRead;
use std::io::BufReader;
use std::io::Read;
use std::io::Write;
use std::sync::Arc;

use directus_mcp_config::ResolvedConfig;
use directus_mcp_contract::ToolDefinition;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::audit::AuditSink;
use crate::audit::ToolCallAuditEvent;
use crate::audit::ToolCallAuditEventParams;
use crate::audit::ToolCallOutcome;
use crate::client::DirectusClient;
use crate::tools::ToolRouter;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum framed request body size in bytes.
const MAX_BODY_BYTES: usize = 4 * 1024 * 1024;

// ============================================================================
// SECTION: MCP Server
// ============================================================================

/// MCP server instance.
pub struct McpServer {
    /// Tool router for request dispatch.
    router: ToolRouter,
    /// Sink receiving one audit event per tool call.
    audit: Arc<dyn AuditSink>,
}

impl McpServer {
    /// Builds a new MCP server over the resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns [`McpServerError`] when the HTTP client cannot be
    /// initialized.
    pub fn from_config(
        config: ResolvedConfig,
        audit: Arc<dyn AuditSink>,
    ) -> Result<Self, McpServerError> {
        let client =
            DirectusClient::new().map_err(|err| McpServerError::Init(err.to_string()))?;
        Ok(Self {
            router: ToolRouter::new(config, client),
            audit,
        })
    }

    /// Serves framed JSON-RPC requests over stdin/stdout until EOF.
    ///
    /// # Errors
    ///
    /// Returns [`McpServerError`] when the transport fails. A closed stdin
    /// at a frame boundary is a clean shutdown, not an error.
    pub fn serve(self) -> Result<(), McpServerError> {
        let mut reader = BufReader::new(std::io::stdin());
        let mut writer = std::io::stdout();
        serve_loop(&self.router, self.audit.as_ref(), &mut reader, &mut writer)
    }
}

/// Runs the framed request loop over arbitrary streams.
fn serve_loop(
    router: &ToolRouter,
    audit: &dyn AuditSink,
    reader: &mut BufReader<impl Read>,
    writer: &mut impl Write,
) -> Result<(), McpServerError> {
    loop {
        let Some(bytes) = read_framed(reader, MAX_BODY_BYTES)? else {
            return Ok(());
        };
        let request_bytes = bytes.len();
        let (response, handled) = match serde_json::from_slice::<JsonRpcRequest>(&bytes) {
            Ok(request) => handle_request(router, request),
            Err(_) => (error_response(Value::Null, -32700, "invalid json-rpc request"), None),
        };
        let payload = serde_json::to_vec(&response)
            .map_err(|_| McpServerError::Transport("json-rpc serialization failed".to_string()))?;
        if let Some(call) = handled {
            audit.record_tool_call(&ToolCallAuditEvent::new(ToolCallAuditEventParams {
                request_id: call.request_id,
                tool: call.tool,
                outcome: call.outcome,
                request_bytes,
                response_bytes: payload.len(),
            }));
        }
        write_framed(writer, &payload)?;
    }
}

// ============================================================================
// SECTION: JSON-RPC Handling
// ============================================================================

/// Incoming JSON-RPC request payload.
#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    /// JSON-RPC protocol version.
    jsonrpc: String,
    /// Request identifier.
    id: Value,
    /// Method name.
    method: String,
    /// Optional parameters payload.
    params: Option<Value>,
}

/// JSON-RPC response envelope.
#[derive(Debug, Serialize)]
struct JsonRpcResponse {
    /// JSON-RPC protocol version.
    jsonrpc: &'static str,
    /// Request identifier.
    id: Value,
    /// Successful result payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    /// Error payload when the request fails.
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

/// JSON-RPC error payload.
#[derive(Debug, Serialize)]
struct JsonRpcError {
    /// Error code.
    code: i64,
    /// Human-readable error message.
    message: String,
}

/// Tool call parameters for JSON-RPC requests.
#[derive(Debug, Deserialize)]
struct ToolCallParams {
    /// Tool name.
    name: String,
    /// Raw JSON arguments.
    #[serde(default)]
    arguments: Value,
}

/// Tool list response payload.
#[derive(Debug, Serialize)]
struct ToolListResult {
    /// Registered tool definitions.
    tools: Vec<ToolDefinition>,
}

/// Tool call response payload.
#[derive(Debug, Serialize)]
struct ToolCallResult {
    /// Tool output content.
    content: Vec<ToolContent>,
}

/// Tool output payloads for JSON-RPC responses.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ToolContent {
    /// Text tool output.
    Text {
        /// Rendered text payload.
        text: String,
    },
}

/// Audit facts collected while handling a `tools/call` request.
struct HandledToolCall {
    /// Request identifier rendered for the audit trail.
    request_id: Option<String>,
    /// Tool name exactly as the client requested it.
    tool: String,
    /// Call outcome.
    outcome: ToolCallOutcome,
}

/// Dispatches a JSON-RPC request to the tool router.
///
/// Returns the response plus, for `tools/call`, the facts the audit trail
/// records about the handled call.
fn handle_request(
    router: &ToolRouter,
    request: JsonRpcRequest,
) -> (JsonRpcResponse, Option<HandledToolCall>) {
    if request.jsonrpc != "2.0" {
        return (error_response(request.id, -32600, "invalid json-rpc version"), None);
    }
    match request.method.as_str() {
        "tools/list" => {
            let result = ToolListResult {
                tools: router.list_tools(),
            };
            let response = match serde_json::to_value(result) {
                Ok(value) => success_response(request.id, value),
                Err(_) => error_response(request.id, -32603, "serialization failed"),
            };
            (response, None)
        }
        "tools/call" => {
            let id = request.id;
            let request_id = if id.is_null() { None } else { Some(id.to_string()) };
            let params = request.params.unwrap_or(Value::Null);
            match serde_json::from_value::<ToolCallParams>(params) {
                Ok(call) => {
                    let (text, outcome) = router.call_with_outcome(&call.name, &call.arguments);
                    let handled = HandledToolCall {
                        request_id,
                        tool: call.name,
                        outcome,
                    };
                    let result = ToolCallResult {
                        content: vec![ToolContent::Text {
                            text,
                        }],
                    };
                    let response = match serde_json::to_value(result) {
                        Ok(value) => success_response(id, value),
                        Err(_) => error_response(id, -32603, "serialization failed"),
                    };
                    (response, Some(handled))
                }
                Err(_) => (error_response(id, -32602, "invalid tool params"), None),
            }
        }
        _ => (error_response(request.id, -32601, "method not found"), None),
    }
}

/// Builds a success response envelope.
fn success_response(id: Value, result: Value) -> JsonRpcResponse {
    JsonRpcResponse {
        jsonrpc: "2.0",
        id,
        result: Some(result),
        error: None,
    }
}

/// Builds an error response envelope.
fn error_response(id: Value, code: i64, message: &str) -> JsonRpcResponse {
    JsonRpcResponse {
        jsonrpc: "2.0",
        id,
        result: None,
        error: Some(JsonRpcError {
            code,
            message: message.to_string(),
        }),
    }
}

// ============================================================================
// SECTION: Framing Helpers
// ============================================================================

/// Reads a framed stdio payload using MCP Content-Length headers.
///
/// Returns `Ok(None)` when the stream closes at a frame boundary.
fn read_framed(
    reader: &mut BufReader<impl Read>,
    max_body_bytes: usize,
) -> Result<Option<Vec<u8>>, McpServerError> {
    let mut content_length: Option<usize> = None;
    let mut line = String::new();
    loop {
        line.clear();
        let bytes = reader
            .read_line(&mut line)
            .map_err(|_| McpServerError::Transport("stdio read failed".to_string()))?;
        if bytes == 0 {
            if content_length.is_some() {
                return Err(McpServerError::Transport(
                    "stdio closed mid-frame".to_string(),
                ));
            }
            return Ok(None);
        }
        if line.trim().is_empty() {
            break;
        }
        if let Some(value) = line.strip_prefix("Content-Length:") {
            let parsed = value
                .trim()
                .parse::<usize>()
                .map_err(|_| McpServerError::Transport("invalid content length".to_string()))?;
            content_length = Some(parsed);
        }
    }
    let len = content_length
        .ok_or_else(|| McpServerError::Transport("missing content length".to_string()))?;
    if len > max_body_bytes {
        return Err(McpServerError::Transport("payload too large".to_string()));
    }
    let mut buf = vec![0u8; len];
    reader
        .read_exact(&mut buf)
        .map_err(|_| McpServerError::Transport("stdio read failed".to_string()))?;
    Ok(Some(buf))
}

/// Writes a framed stdio payload using MCP Content-Length headers.
fn write_framed(writer: &mut impl Write, payload: &[u8]) -> Result<(), McpServerError> {
    let header = format!("Content-Length: {}\r\n\r\n", payload.len());
    writer
        .write_all(header.as_bytes())
        .map_err(|_| McpServerError::Transport("stdio write failed".to_string()))?;
    writer
        .write_all(payload)
        .map_err(|_| McpServerError::Transport("stdio write failed".to_string()))?;
    writer.flush().map_err(|_| McpServerError::Transport("stdio write failed".to_string()))
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// MCP server errors.
#[derive(Debug, Error)]
pub enum McpServerError {
    /// Initialization errors.
    #[error("init error: {0}")]
    Init(String),
    /// Transport errors.
    #[error("transport error: {0}")]
    Transport(String),
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
        reason = "Test-only framing and routing assertions."
    )]

    use std::collections::BTreeMap;
    use std::io::BufReader;
    use std::io::Cursor;
    use std::sync::Mutex;

    use directus_mcp_config::resolve;
    use serde_json::Value;

    use super::read_framed;
    use super::serve_loop;
    use crate::audit::AuditSink;
    use crate::audit::NoopAuditSink;
    use crate::audit::ToolCallAuditEvent;
    use crate::audit::ToolCallOutcome;
    use crate::client::DirectusClient;
    use crate::tools::ToolRouter;

    /// Sink that retains every event for later assertions.
    struct CapturingSink {
        /// Events recorded so far.
        events: Mutex<Vec<ToolCallAuditEvent>>,
    }

    impl AuditSink for CapturingSink {
        fn record_tool_call(&self, event: &ToolCallAuditEvent) {
            self.events.lock().expect("sink lock").push(event.clone());
        }
    }

    fn router() -> ToolRouter {
        let resolution = resolve(&BTreeMap::new(), &[], None);
        ToolRouter::new(resolution.config, DirectusClient::new().expect("client"))
    }

    fn frame(payload: &str) -> String {
        format!("Content-Length: {}\r\n\r\n{payload}", payload.len())
    }

    fn run_session(input: &str) -> Vec<Value> {
        let router = router();
        let mut reader = BufReader::new(Cursor::new(input.as_bytes().to_vec()));
        let mut output = Vec::new();
        serve_loop(&router, &NoopAuditSink, &mut reader, &mut output).expect("session");
        let text = String::from_utf8(output).expect("utf8 output");
        text.split("\r\n\r\n")
            .skip(1)
            .flat_map(|chunk| {
                chunk
                    .split("Content-Length:")
                    .next()
                    .filter(|body| !body.is_empty())
                    .map(|body| serde_json::from_str(body).expect("json response"))
            })
            .collect()
    }

    #[test]
    fn read_framed_rejects_payload_over_limit() {
        let payload = br#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#;
        let framed = frame(&String::from_utf8_lossy(payload));
        let mut reader = BufReader::new(Cursor::new(framed.into_bytes()));
        let result = read_framed(&mut reader, payload.len() - 1);
        assert!(result.is_err());
    }

    #[test]
    fn read_framed_accepts_payload_at_limit() {
        let payload = br#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#;
        let framed = frame(&String::from_utf8_lossy(payload));
        let mut reader = BufReader::new(Cursor::new(framed.into_bytes()));
        let result = read_framed(&mut reader, payload.len());
        let bytes = result.expect("payload read").expect("frame present");
        assert_eq!(bytes, payload);
    }

    #[test]
    fn read_framed_reports_clean_eof_at_frame_boundary() {
        let mut reader = BufReader::new(Cursor::new(Vec::new()));
        let result = read_framed(&mut reader, 1024);
        assert!(result.expect("clean eof").is_none());
    }

    #[test]
    fn tools_list_returns_all_definitions() {
        let input = frame(r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#);
        let responses = run_session(&input);
        assert_eq!(responses.len(), 1);
        let tools = responses[0]["result"]["tools"].as_array().expect("tools array");
        assert_eq!(tools.len(), 18);
        assert_eq!(tools[0]["name"], "getItems");
        assert!(tools[0]["inputSchema"].is_object());
    }

    #[test]
    fn unknown_method_returns_jsonrpc_error() {
        let input = frame(r#"{"jsonrpc":"2.0","id":2,"method":"resources/list"}"#);
        let responses = run_session(&input);
        assert_eq!(responses[0]["error"]["code"], -32601);
    }

    #[test]
    fn tool_failure_stays_in_the_text_channel() {
        let input = frame(
            r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"noSuchTool","arguments":{}}}"#,
        );
        let responses = run_session(&input);
        assert!(responses[0].get("error").is_none());
        let text = responses[0]["result"]["content"][0]["text"].as_str().expect("text");
        assert_eq!(text, "Error: Tool \"noSuchTool\" not found");
        assert_eq!(responses[0]["result"]["content"][0]["type"], "text");
    }

    #[test]
    fn tool_calls_emit_audit_events_with_id_and_sizes() {
        let router = router();
        let sink = CapturingSink {
            events: Mutex::new(Vec::new()),
        };
        let list = r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#;
        let call =
            r#"{"jsonrpc":"2.0","id":7,"method":"tools/call","params":{"name":"getConfig","arguments":{}}}"#;
        let input = format!("{}{}", frame(list), frame(call));
        let mut reader = BufReader::new(Cursor::new(input.into_bytes()));
        let mut output = Vec::new();
        serve_loop(&router, &sink, &mut reader, &mut output).expect("session");

        // Only the tools/call frame is audited.
        let events = sink.events.into_inner().expect("captured events");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].tool, "getConfig");
        assert_eq!(events[0].request_id.as_deref(), Some("7"));
        assert_eq!(events[0].outcome, ToolCallOutcome::Success);
        assert_eq!(events[0].request_bytes, call.len());
        assert!(events[0].response_bytes > 0);
    }

    #[test]
    fn wrong_jsonrpc_version_is_rejected() {
        let input = frame(r#"{"jsonrpc":"1.0","id":4,"method":"tools/list"}"#);
        let responses = run_session(&input);
        assert_eq!(responses[0]["error"]["code"], -32600);
    }
}
