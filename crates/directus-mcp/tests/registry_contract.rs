// crates/directus-mcp/tests/registry_contract.rs
// ============================================================================
// Module: Registry/Contract Agreement Tests
// Description: Cross-checks between the dispatch table and advertised schemas.
// Purpose: Catch drift between required arguments and input schemas.
// Dependencies: directus-mcp, directus-mcp-contract
// ============================================================================

//! ## Overview
//! The registry validates required arguments; the contract advertises them.
//! These tests pin the two surfaces together so adding or changing a tool in
//! one place without the other fails loudly.

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

use std::collections::BTreeSet;

use directus_mcp::registry::OperationKind;
use directus_mcp::registry::operation;
use directus_mcp::registry::operations;
use directus_mcp_contract::tool_definitions;
use serde_json::Value;

#[test]
fn required_arguments_agree_between_registry_and_schemas() {
    for definition in tool_definitions() {
        let spec = operation(definition.name).expect("dispatch entry");
        let advertised: BTreeSet<String> = definition
            .input_schema
            .get("required")
            .and_then(Value::as_array)
            .expect("required array")
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect();
        let enforced: BTreeSet<String> =
            spec.required.iter().map(|name| (*name).to_string()).collect();
        assert_eq!(
            advertised, enforced,
            "required arguments drifted for {}",
            definition.name
        );
    }
}

#[test]
fn every_required_argument_appears_in_the_schema_properties() {
    for definition in tool_definitions() {
        let properties = definition
            .input_schema
            .get("properties")
            .and_then(Value::as_object)
            .expect("properties object");
        let spec = operation(definition.name).expect("dispatch entry");
        for required in spec.required {
            assert!(
                properties.contains_key(*required),
                "{}: required argument {required} is not advertised",
                definition.name
            );
        }
    }
}

#[test]
fn only_bespoke_tools_bypass_the_http_path() {
    for spec in operations() {
        let bespoke = matches!(
            spec.kind,
            OperationKind::Login | OperationKind::UploadFile | OperationKind::ShowConfig
        );
        let name = spec.name.as_str();
        let expected = matches!(name, "login" | "uploadFile" | "getConfig");
        assert_eq!(bespoke, expected, "unexpected dispatch kind for {name}");
    }
}
