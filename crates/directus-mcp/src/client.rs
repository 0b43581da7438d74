// crates/directus-mcp/src/client.rs
// ============================================================================
// Module: Directus Client
// Description: Blocking HTTP client for the Directus REST API.
// Purpose: Execute authenticated requests and normalize failures.
// Dependencies: reqwest, serde_json
// ============================================================================

//! ## Overview
//! Thin blocking wrapper around [`reqwest`] for the Directus REST surface.
//! Every request carries a bearer token; bodies are JSON except for the
//! multipart file upload. Remote failures are normalized into
//! [`DirectusError`] with the deployment's own `errors` payload preserved
//! when present, so callers can surface exactly what the server said.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Read;

use reqwest::blocking::Client;
use reqwest::blocking::RequestBuilder;
use reqwest::blocking::multipart::Form;
use reqwest::blocking::multipart::Part;
use reqwest::header::CONTENT_TYPE;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;
use thiserror::Error;

use crate::registry::HttpMethod;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum response body size in bytes.
const MAX_RESPONSE_BODY_BYTES: usize = 32 * 1024 * 1024;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failures raised while talking to a Directus deployment.
#[derive(Debug, Error)]
pub enum DirectusError {
    /// Credential exchange failed.
    #[error("Authentication failed: {0}")]
    Authentication(String),
    /// The deployment answered with a non-success status.
    #[error("{message}")]
    Remote {
        /// HTTP status code.
        status: u16,
        /// Rendered failure text, preferring the deployment's `errors` array.
        message: String,
    },
    /// The request never produced a response.
    #[error("{0}")]
    Transport(String),
    /// The response arrived but its body was unusable.
    #[error("{0}")]
    Body(String),
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// File payload for the upload operation.
#[derive(Debug)]
pub struct FileUpload<'a> {
    /// Filename recorded for the multipart part.
    pub file_name: &'a str,
    /// Raw file bytes.
    pub content: Vec<u8>,
    /// MIME type for the part, when supplied.
    pub mime_type: Option<&'a str>,
    /// Storage location form field, when supplied.
    pub storage: Option<&'a str>,
    /// Title form field, when supplied.
    pub title: Option<&'a str>,
}

/// Blocking client for the Directus REST API.
#[derive(Debug, Clone)]
pub struct DirectusClient {
    /// Underlying HTTP client.
    http: Client,
}

impl DirectusClient {
    /// Builds a client with default connection settings.
    ///
    /// # Errors
    ///
    /// Returns [`DirectusError::Transport`] when the TLS backend fails to
    /// initialize.
    pub fn new() -> Result<Self, DirectusError> {
        let http = Client::builder()
            .build()
            .map_err(|_| DirectusError::Transport("http client build failed".to_string()))?;
        Ok(Self {
            http,
        })
    }

    /// Executes a JSON request and decodes the response body.
    ///
    /// An empty success body decodes to [`Value::Null`]; the delete
    /// operation relies on this.
    ///
    /// # Errors
    ///
    /// Returns [`DirectusError`] when the request fails to send, the
    /// deployment answers with a non-success status, or the body cannot be
    /// decoded.
    pub fn execute(
        &self,
        method: HttpMethod,
        url: &str,
        token: &str,
        query: Option<&Map<String, Value>>,
        body: Option<&Value>,
    ) -> Result<Value, DirectusError> {
        let mut builder = self
            .request(method, url)
            .bearer_auth(token)
            .header(CONTENT_TYPE, "application/json");
        if let Some(parameters) = query {
            builder = builder.query(&query_pairs(parameters)?);
        }
        if let Some(payload) = body {
            builder = builder.json(payload);
        }
        let mut response = builder.send().map_err(|err| map_send_error(&err))?;
        let status = response.status();
        let bytes = read_http_body(&mut response, MAX_RESPONSE_BODY_BYTES)?;
        if !status.is_success() {
            return Err(remote_error(status.as_u16(), &bytes));
        }
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes)
            .map_err(|_| DirectusError::Body("response body was not valid JSON".to_string()))
    }

    /// Exchanges credentials for an access token via `/auth/login`.
    ///
    /// The token is returned to the caller verbatim and never cached.
    ///
    /// # Errors
    ///
    /// Returns [`DirectusError::Authentication`] for every failure mode,
    /// mirroring how clients consume this operation.
    pub fn login(&self, url: &str, email: &str, password: &str) -> Result<String, DirectusError> {
        let payload = json!({
            "email": email,
            "password": password
        });
        let mut response = self
            .http
            .post(format!("{url}/auth/login"))
            .json(&payload)
            .send()
            .map_err(|err| DirectusError::Authentication(send_error_text(&err)))?;
        let status = response.status();
        if !status.is_success() {
            return Err(DirectusError::Authentication(format!(
                "Request failed with status code {}",
                status.as_u16()
            )));
        }
        let bytes = read_http_body(&mut response, MAX_RESPONSE_BODY_BYTES)
            .map_err(|err| DirectusError::Authentication(err.to_string()))?;
        let body: Value = serde_json::from_slice(&bytes).map_err(|_| {
            DirectusError::Authentication("login response was not valid JSON".to_string())
        })?;
        body.pointer("/data/access_token")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                DirectusError::Authentication("login response missing access token".to_string())
            })
    }

    /// Downloads a file referenced by URL for a subsequent upload.
    ///
    /// # Errors
    ///
    /// Returns [`DirectusError`] when the download fails or the source
    /// answers with a non-success status.
    pub fn fetch_file(&self, file_url: &str) -> Result<Vec<u8>, DirectusError> {
        let mut response =
            self.http.get(file_url).send().map_err(|err| map_send_error(&err))?;
        let status = response.status();
        let bytes = read_http_body(&mut response, MAX_RESPONSE_BODY_BYTES)?;
        if !status.is_success() {
            return Err(remote_error(status.as_u16(), &bytes));
        }
        Ok(bytes)
    }

    /// Uploads a file to `/files` as a multipart form.
    ///
    /// The multipart request sets its own content type; the JSON header used
    /// elsewhere must not be applied here.
    ///
    /// # Errors
    ///
    /// Returns [`DirectusError`] when the form cannot be assembled or the
    /// deployment rejects the upload.
    pub fn upload(
        &self,
        url: &str,
        token: &str,
        upload: FileUpload<'_>,
    ) -> Result<Value, DirectusError> {
        let mut part = Part::bytes(upload.content).file_name(upload.file_name.to_string());
        if let Some(mime_type) = upload.mime_type {
            part = part.mime_str(mime_type).map_err(|_| {
                DirectusError::Body(format!("invalid MIME type: {mime_type}"))
            })?;
        }
        let mut form = Form::new().part("file", part);
        if let Some(storage) = upload.storage {
            form = form.text("storage", storage.to_string());
        }
        if let Some(title) = upload.title {
            form = form.text("title", title.to_string());
        }
        let mut response = self
            .http
            .post(format!("{url}/files"))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .map_err(|err| map_send_error(&err))?;
        let status = response.status();
        let bytes = read_http_body(&mut response, MAX_RESPONSE_BODY_BYTES)?;
        if !status.is_success() {
            return Err(remote_error(status.as_u16(), &bytes));
        }
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes)
            .map_err(|_| DirectusError::Body("response body was not valid JSON".to_string()))
    }

    /// Starts a request builder for the given method and URL.
    fn request(&self, method: HttpMethod, url: &str) -> RequestBuilder {
        match method {
            HttpMethod::Get => self.http.get(url),
            HttpMethod::Post => self.http.post(url),
            HttpMethod::Patch => self.http.patch(url),
            HttpMethod::Delete => self.http.delete(url),
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Renders query members as key/value pairs.
///
/// String members pass through unchanged; structured members (filters, sort
/// arrays) are serialized to compact JSON the way Directus expects them.
fn query_pairs(parameters: &Map<String, Value>) -> Result<Vec<(String, String)>, DirectusError> {
    let mut pairs = Vec::with_capacity(parameters.len());
    for (key, value) in parameters {
        let rendered = match value {
            Value::String(text) => text.clone(),
            other => serde_json::to_string(other).map_err(|_| {
                DirectusError::Body(format!("query parameter {key} could not be serialized"))
            })?,
        };
        pairs.push((key.clone(), rendered));
    }
    Ok(pairs)
}

/// Reads an HTTP response body with a maximum size limit.
fn read_http_body(
    response: &mut reqwest::blocking::Response,
    max_bytes: usize,
) -> Result<Vec<u8>, DirectusError> {
    let max_bytes_u64 = u64::try_from(max_bytes).unwrap_or(u64::MAX);
    if let Some(length) = response.content_length()
        && length > max_bytes_u64
    {
        return Err(DirectusError::Body("response body too large".to_string()));
    }
    let mut limited = response.take(max_bytes_u64.saturating_add(1));
    let mut buf = Vec::new();
    limited
        .read_to_end(&mut buf)
        .map_err(|_| DirectusError::Body("response body read failed".to_string()))?;
    if buf.len() > max_bytes {
        return Err(DirectusError::Body("response body too large".to_string()));
    }
    Ok(buf)
}

/// Builds a remote error from a non-success response body.
///
/// When the body carries a Directus `errors` array, that array is
/// pretty-printed as the failure text; otherwise a generic status line is
/// used.
fn remote_error(status: u16, bytes: &[u8]) -> DirectusError {
    let errors = serde_json::from_slice::<Value>(bytes)
        .ok()
        .and_then(|body| body.get("errors").cloned())
        .and_then(|errors| serde_json::to_string_pretty(&errors).ok());
    let message =
        errors.unwrap_or_else(|| format!("Request failed with status code {status}"));
    DirectusError::Remote {
        status,
        message,
    }
}

/// Maps send failures to stable transport messages.
fn map_send_error(error: &reqwest::Error) -> DirectusError {
    DirectusError::Transport(send_error_text(error))
}

/// Renders a stable message for a send failure.
fn send_error_text(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_connect() {
        "connection failed".to_string()
    } else {
        "request failed to send".to_string()
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

    use serde_json::Map;
    use serde_json::json;

    use super::query_pairs;
    use super::remote_error;

    #[test]
    fn query_pairs_pass_strings_and_serialize_structures() {
        let mut parameters = Map::new();
        parameters.insert("limit".to_string(), json!("10"));
        parameters.insert("filter".to_string(), json!({ "status": { "_eq": "published" } }));
        let pairs = query_pairs(&parameters).expect("render");
        assert!(pairs.contains(&("limit".to_string(), "10".to_string())));
        assert!(
            pairs.contains(&(
                "filter".to_string(),
                r#"{"status":{"_eq":"published"}}"#.to_string()
            ))
        );
    }

    #[test]
    fn remote_error_prefers_directus_errors_array() {
        let body = br#"{"errors":[{"message":"Forbidden"}]}"#;
        let error = remote_error(403, body);
        let text = error.to_string();
        assert!(text.contains("Forbidden"));
        assert!(!text.contains("status code"));
    }

    #[test]
    fn remote_error_falls_back_to_status_line() {
        let error = remote_error(502, b"upstream down");
        assert_eq!(error.to_string(), "Request failed with status code 502");
    }
}
