// crates/directus-mcp/src/tools.rs
// ============================================================================
// Module: Tool Router
// Description: Request dispatch from MCP tool calls to Directus operations.
// Purpose: Validate arguments, resolve overrides, and execute operations.
// Dependencies: base64, directus-mcp-config, directus-mcp-contract, serde_json
// ============================================================================

//! ## Overview
//! The router turns a named tool call into an operation against the
//! configured deployment. Per-call `url` and `token` arguments override the
//! startup configuration for that call only. Every failure, local or remote,
//! is rendered into a single `Error: `-prefixed text block; raw transport
//! faults never cross the protocol boundary.
//!
//! ## Invariants
//! - Required arguments are validated before any network traffic.
//! - `getConfig` reports presence booleans only; secret values never appear
//!   in its output.
//! - The router holds no mutable state; calls do not affect each other.

// ============================================================================
// SECTION: Imports
// ============================================================================

use base64::Engine;
use base64::engine::general_purpose::STANDARD as Base64;
use directus_mcp_config::ConfigField;
use directus_mcp_config::ResolvedConfig;
use directus_mcp_contract::ToolDefinition;
use directus_mcp_contract::ToolName;
use directus_mcp_contract::tool_definitions;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;
use thiserror::Error;

use crate::audit::ToolCallOutcome;
use crate::client::DirectusClient;
use crate::client::DirectusError;
use crate::client::FileUpload;
use crate::registry;
use crate::registry::HttpOperation;
use crate::registry::OperationKind;
use crate::registry::PathSegment;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failures surfaced to MCP clients as `Error: ` text envelopes.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool does not exist.
    #[error("Tool \"{0}\" not found")]
    UnknownTool(String),
    /// The arguments payload is not a JSON object.
    #[error("Tool arguments must be an object")]
    InvalidArguments,
    /// A required argument is absent or null.
    #[error("Missing required argument \"{0}\"")]
    MissingArgument(&'static str),
    /// An argument is present but has an unusable type.
    #[error("Argument \"{0}\" must be {1}")]
    InvalidArgument(&'static str, &'static str),
    /// Neither file source argument was provided for the upload.
    #[error("Either fileUrl or fileData must be provided")]
    MissingPayload,
    /// The inline file payload is not valid base64.
    #[error("fileData is not valid base64")]
    InvalidBase64,
    /// A Directus request failed.
    #[error(transparent)]
    Directus(#[from] DirectusError),
    /// A response payload could not be serialized.
    #[error("response serialization failed")]
    Serialization,
}

// ============================================================================
// SECTION: Tool Router
// ============================================================================

/// Per-call connection context after override resolution.
struct CallContext<'a> {
    /// Effective base URL for this call.
    url: &'a str,
    /// Effective bearer token for this call.
    token: &'a str,
}

/// Routes MCP tool calls to Directus operations.
pub struct ToolRouter {
    /// Immutable startup configuration.
    config: ResolvedConfig,
    /// HTTP client shared across calls.
    client: DirectusClient,
}

impl ToolRouter {
    /// Builds a router over the resolved configuration.
    #[must_use]
    pub fn new(config: ResolvedConfig, client: DirectusClient) -> Self {
        Self {
            config,
            client,
        }
    }

    /// Returns the advertised tool definitions.
    #[must_use]
    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        tool_definitions()
    }

    /// Executes a tool call and renders the result text.
    ///
    /// Failures are rendered into the same text channel with an `Error: `
    /// prefix; this method never fails from the caller's perspective.
    #[must_use]
    pub fn call(&self, name: &str, arguments: &Value) -> String {
        self.call_with_outcome(name, arguments).0
    }

    /// Executes a tool call, reporting the outcome alongside the text.
    ///
    /// The transport uses the outcome for its audit trail without parsing
    /// the rendered envelope.
    #[must_use]
    pub fn call_with_outcome(&self, name: &str, arguments: &Value) -> (String, ToolCallOutcome) {
        match self.execute(name, arguments) {
            Ok(text) => (text, ToolCallOutcome::Success),
            Err(err) => (format!("Error: {err}"), ToolCallOutcome::Error),
        }
    }

    /// Validates and runs one tool call.
    fn execute(&self, name: &str, arguments: &Value) -> Result<String, ToolError> {
        let Some(tool) = ToolName::parse(name) else {
            return Err(ToolError::UnknownTool(name.to_string()));
        };
        let Some(spec) = registry::operation(tool) else {
            return Err(ToolError::UnknownTool(name.to_string()));
        };
        let empty = Map::new();
        let args = match arguments {
            Value::Object(map) => map,
            Value::Null => &empty,
            _ => return Err(ToolError::InvalidArguments),
        };
        for required in spec.required {
            if !args.get(*required).is_some_and(|value| !value.is_null()) {
                return Err(ToolError::MissingArgument(*required));
            }
        }
        let context = self.call_context(args);
        match spec.kind {
            OperationKind::Http(http) => self.run_http(&http, &context, args),
            OperationKind::Login => self.run_login(&context, args),
            OperationKind::UploadFile => self.run_upload(&context, args),
            OperationKind::ShowConfig => self.run_show_config(),
        }
    }

    /// Resolves the per-call connection context.
    fn call_context<'a>(&'a self, args: &'a Map<String, Value>) -> CallContext<'a> {
        let config = self.config.config();
        CallContext {
            url: string_arg(args, "url").unwrap_or(&config.base_url),
            token: string_arg(args, "token").unwrap_or(&config.access_token),
        }
    }

    /// Runs a registry-described HTTP operation.
    fn run_http(
        &self,
        http: &HttpOperation,
        context: &CallContext<'_>,
        args: &Map<String, Value>,
    ) -> Result<String, ToolError> {
        let url = build_url(context.url, http.path, args)?;
        let query = http.query_arg.and_then(|key| args.get(key)).and_then(Value::as_object);
        let body = http.body_arg.and_then(|key| args.get(key));
        let value = self.client.execute(http.method, &url, context.token, query, body)?;
        match http.success_text {
            Some(text) => Ok(text.to_string()),
            None => render_json(&value),
        }
    }

    /// Runs the credential exchange operation.
    fn run_login(
        &self,
        context: &CallContext<'_>,
        args: &Map<String, Value>,
    ) -> Result<String, ToolError> {
        let config = self.config.config();
        let email = string_arg(args, "email").unwrap_or(&config.email);
        let password = string_arg(args, "password").unwrap_or(&config.password);
        let token = self.client.login(context.url, email, password)?;
        render_json(&json!({ "access_token": token }))
    }

    /// Runs the two-step file upload operation.
    ///
    /// When both sources are supplied, `fileUrl` wins and `fileData` is
    /// ignored.
    fn run_upload(
        &self,
        context: &CallContext<'_>,
        args: &Map<String, Value>,
    ) -> Result<String, ToolError> {
        let Some(file_name) = string_arg(args, "fileName") else {
            return Err(ToolError::InvalidArgument("fileName", "a non-empty string"));
        };
        let content = if let Some(file_url) = string_arg(args, "fileUrl") {
            self.client.fetch_file(file_url)?
        } else if let Some(file_data) = string_arg(args, "fileData") {
            Base64.decode(file_data).map_err(|_| ToolError::InvalidBase64)?
        } else {
            return Err(ToolError::MissingPayload);
        };
        let upload = FileUpload {
            file_name,
            content,
            mime_type: string_arg(args, "mimeType"),
            storage: string_arg(args, "storage"),
            title: string_arg(args, "title"),
        };
        let value = self.client.upload(context.url, context.token, upload)?;
        render_json(&value)
    }

    /// Reports the effective configuration without revealing secrets.
    fn run_show_config(&self) -> Result<String, ToolError> {
        let config = self.config.config();
        let report = json!({
            "directus_url": config.base_url,
            "using_token": !config.access_token.is_empty(),
            "using_email": !config.email.is_empty(),
            "environment_variables": {
                "DIRECTUS_URL": self.config.from_environment(ConfigField::BaseUrl),
                "DIRECTUS_ACCESS_TOKEN": self.config.from_environment(ConfigField::AccessToken),
                "DIRECTUS_EMAIL": self.config.from_environment(ConfigField::Email),
                "DIRECTUS_PASSWORD": self.config.from_environment(ConfigField::Password),
            },
            "server_args": self.config.server_args(),
        });
        render_json(&report)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns a non-empty string argument, treating empty strings as absent.
fn string_arg<'a>(args: &'a Map<String, Value>, name: &str) -> Option<&'a str> {
    args.get(name).and_then(Value::as_str).filter(|text| !text.is_empty())
}

/// Builds the request URL from the base URL and a path template.
fn build_url(
    base: &str,
    path: &[PathSegment],
    args: &Map<String, Value>,
) -> Result<String, ToolError> {
    let mut url = base.trim_end_matches('/').to_string();
    for segment in path {
        match *segment {
            PathSegment::Literal(literal) => {
                url.push('/');
                url.push_str(literal);
            }
            PathSegment::Arg(name) => {
                url.push('/');
                url.push_str(&path_value(args, name)?);
            }
            PathSegment::OptionalArg(name) => {
                if let Some(value) = string_arg(args, name) {
                    url.push('/');
                    url.push_str(value);
                }
            }
        }
    }
    Ok(url)
}

/// Renders a required path argument; item IDs may be strings or numbers.
fn path_value(args: &Map<String, Value>, name: &'static str) -> Result<String, ToolError> {
    match args.get(name) {
        Some(Value::String(text)) => Ok(text.clone()),
        Some(Value::Number(number)) => Ok(number.to_string()),
        Some(_) => Err(ToolError::InvalidArgument(name, "a string or number")),
        None => Err(ToolError::MissingArgument(name)),
    }
}

/// Pretty-prints a JSON payload for the text content block.
fn render_json(value: &Value) -> Result<String, ToolError> {
    serde_json::to_string_pretty(value).map_err(|_| ToolError::Serialization)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
