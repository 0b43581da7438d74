// crates/directus-mcp-cli/src/main.rs
// ============================================================================
// Module: Directus MCP CLI Entry Point
// Description: Process entry point for the Directus MCP stdio server.
// Purpose: Resolve configuration, report startup state, and serve requests.
// Dependencies: directus-mcp, directus-mcp-config, thiserror
// ============================================================================

//! ## Overview
//! The binary snapshots the environment and argument list once, resolves the
//! effective configuration (including the optional `config.json` next to the
//! executable), prints a redacted startup summary to stderr, and hands
//! control to the stdio server. Stdout is reserved for framed JSON-RPC
//! responses; every diagnostic goes to stderr.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use directus_mcp::McpServer;
use directus_mcp::McpServerError;
use directus_mcp::StderrAuditSink;
use directus_mcp_config::ResolvedConfig;
use directus_mcp_config::load_config_file;
use directus_mcp_config::resolve;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI failures that terminate the process with a non-zero exit code.
#[derive(Debug, Error)]
enum CliError {
    /// The server failed to initialize or its transport broke.
    #[error(transparent)]
    Server(#[from] McpServerError),
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Process entry point.
fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = writeln!(std::io::stderr(), "directus-mcp: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Resolves configuration and serves until stdin closes.
fn run() -> Result<(), CliError> {
    let env: BTreeMap<String, String> = std::env::vars().collect();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let file = read_config_file();

    let resolution = resolve(&env, &args, file.as_deref());
    for warning in &resolution.warnings {
        let _ = writeln!(std::io::stderr(), "directus-mcp: {warning}");
    }
    for line in startup_summary(&resolution.config) {
        let _ = writeln!(std::io::stderr(), "{line}");
    }

    let server = McpServer::from_config(resolution.config, Arc::new(StderrAuditSink))?;
    server.serve()?;
    Ok(())
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads the optional `config.json` next to the executable.
///
/// Every failure degrades to a stderr diagnostic; the file tier is simply
/// treated as absent.
fn read_config_file() -> Option<String> {
    let Some(path) = config_file_path() else {
        return None;
    };
    match load_config_file(&path) {
        Ok(Some(text)) => Some(text),
        Ok(None) => {
            let _ = writeln!(
                std::io::stderr(),
                "Config file not found. Using environment variables or default values."
            );
            None
        }
        Err(err) => {
            let _ = writeln!(std::io::stderr(), "Error loading config file: {err}");
            let _ = writeln!(
                std::io::stderr(),
                "Using environment variables or default values."
            );
            None
        }
    }
}

/// Returns the expected location of `config.json`.
fn config_file_path() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    Some(exe.parent()?.join("config.json"))
}

/// Renders the redacted startup summary.
///
/// Secrets never appear here: the token and password collapse to a mask, and
/// only presence is reported.
fn startup_summary(config: &ResolvedConfig) -> Vec<String> {
    let values = config.config();
    vec![
        format!("Using Directus URL: {}", values.base_url),
        format!("Auth token: {}", mask_secret(&values.access_token)),
        format!(
            "Email: {}",
            if values.email.is_empty() { "not provided" } else { &values.email }
        ),
        format!("Password: {}", mask_secret(&values.password)),
    ]
}

/// Masks a secret, reporting only whether it is present.
fn mask_secret(value: &str) -> &'static str {
    if value.is_empty() { "not provided" } else { "********" }
}
