// crates/directus-mcp-contract/src/tooling.rs
// ============================================================================
// Module: MCP Tool Contracts
// Description: Canonical MCP tool definitions and input schemas.
// Purpose: Drive the MCP `tools/list` response with stable schemas.
// Dependencies: serde_json, directus-mcp-contract::types
// ============================================================================

//! ## Overview
//! This module defines the canonical MCP tool surface. Every networked tool
//! accepts optional `url` and `token` overrides in addition to its own
//! parameters; the schemas advertise exactly the arguments the dispatcher
//! honors.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use serde_json::json;

use crate::types::ToolDefinition;
use crate::types::ToolName;

// ============================================================================
// SECTION: Tool Definitions
// ============================================================================

/// Returns the canonical MCP tool definitions.
///
/// The order is intentional: it is preserved in `tools/list` responses to
/// keep client-side diffs stable across releases. Append new tools at the
/// end.
#[must_use]
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        get_items_definition(),
        get_item_definition(),
        create_item_definition(),
        update_item_definition(),
        delete_item_definition(),
        get_system_info_definition(),
        get_collections_definition(),
        login_definition(),
        get_activity_definition(),
        get_fields_definition(),
        get_relations_definition(),
        get_files_definition(),
        upload_file_definition(),
        get_users_definition(),
        get_current_user_definition(),
        get_roles_definition(),
        get_permissions_definition(),
        get_config_definition(),
    ]
}

/// Builds the tool definition for `getItems`.
fn get_items_definition() -> ToolDefinition {
    build_tool_definition(
        ToolName::GetItems,
        "Get items from a collection in Directus",
        connection_schema(
            json!({
                "collection": schema_for_string("Collection name"),
                "query": schema_for_object(
                    "Query parameters like filter, sort, limit, etc. (optional)"
                )
            }),
            &["collection"],
        ),
    )
}

/// Builds the tool definition for `getItem`.
fn get_item_definition() -> ToolDefinition {
    build_tool_definition(
        ToolName::GetItem,
        "Get a single item from a collection by ID",
        connection_schema(
            json!({
                "collection": schema_for_string("Collection name"),
                "id": schema_for_string("Item ID"),
                "query": schema_for_object("Query parameters (optional)")
            }),
            &["collection", "id"],
        ),
    )
}

/// Builds the tool definition for `createItem`.
fn create_item_definition() -> ToolDefinition {
    build_tool_definition(
        ToolName::CreateItem,
        "Create a new item in a collection",
        connection_schema(
            json!({
                "collection": schema_for_string("Collection name"),
                "data": schema_for_object("Item data")
            }),
            &["collection", "data"],
        ),
    )
}

/// Builds the tool definition for `updateItem`.
fn update_item_definition() -> ToolDefinition {
    build_tool_definition(
        ToolName::UpdateItem,
        "Update an existing item in a collection",
        connection_schema(
            json!({
                "collection": schema_for_string("Collection name"),
                "id": schema_for_string("Item ID"),
                "data": schema_for_object("Updated item data")
            }),
            &["collection", "id", "data"],
        ),
    )
}

/// Builds the tool definition for `deleteItem`.
fn delete_item_definition() -> ToolDefinition {
    build_tool_definition(
        ToolName::DeleteItem,
        "Delete an item from a collection",
        connection_schema(
            json!({
                "collection": schema_for_string("Collection name"),
                "id": schema_for_string("Item ID")
            }),
            &["collection", "id"],
        ),
    )
}

/// Builds the tool definition for `getSystemInfo`.
fn get_system_info_definition() -> ToolDefinition {
    build_tool_definition(
        ToolName::GetSystemInfo,
        "Get system information from Directus",
        connection_schema(
            json!({
                "endpoint": schema_for_string("System endpoint (e.g. 'health', 'info', 'activity')")
            }),
            &["endpoint"],
        ),
    )
}

/// Builds the tool definition for `getCollections`.
fn get_collections_definition() -> ToolDefinition {
    build_tool_definition(
        ToolName::GetCollections,
        "Get all collection schemas from Directus",
        connection_schema(json!({}), &[]),
    )
}

/// Builds the tool definition for `login`.
fn login_definition() -> ToolDefinition {
    build_tool_definition(
        ToolName::Login,
        "Login to Directus and get an access token",
        object_schema(
            json!({
                "url": schema_for_string("Directus API URL (default from config)"),
                "email": schema_for_string("User email (default from config)"),
                "password": schema_for_string("User password (default from config)")
            }),
            &[],
        ),
    )
}

/// Builds the tool definition for `getActivity`.
fn get_activity_definition() -> ToolDefinition {
    build_tool_definition(
        ToolName::GetActivity,
        "Get activity logs from Directus",
        connection_schema(
            json!({
                "query": schema_for_object(
                    "Query parameters like filter, sort, limit, etc. (optional)"
                )
            }),
            &[],
        ),
    )
}

/// Builds the tool definition for `getFields`.
fn get_fields_definition() -> ToolDefinition {
    build_tool_definition(
        ToolName::GetFields,
        "Get fields for a collection",
        connection_schema(
            json!({
                "collection": schema_for_string("Collection name")
            }),
            &["collection"],
        ),
    )
}

/// Builds the tool definition for `getRelations`.
fn get_relations_definition() -> ToolDefinition {
    build_tool_definition(
        ToolName::GetRelations,
        "Get relations for a collection",
        connection_schema(
            json!({
                "collection": schema_for_string("Collection name (optional)")
            }),
            &[],
        ),
    )
}

/// Builds the tool definition for `getFiles`.
fn get_files_definition() -> ToolDefinition {
    build_tool_definition(
        ToolName::GetFiles,
        "Get files from Directus",
        connection_schema(
            json!({
                "query": schema_for_object(
                    "Query parameters like filter, sort, limit, etc. (optional)"
                )
            }),
            &[],
        ),
    )
}

/// Builds the tool definition for `uploadFile`.
fn upload_file_definition() -> ToolDefinition {
    build_tool_definition(
        ToolName::UploadFile,
        "Upload a file to Directus",
        connection_schema(
            json!({
                "fileUrl": schema_for_string(
                    "URL of the file to upload (either fileUrl or fileData must be provided)"
                ),
                "fileData": schema_for_string(
                    "Base64 encoded file data (either fileUrl or fileData must be provided)"
                ),
                "fileName": schema_for_string("Name of the file"),
                "mimeType": schema_for_string("MIME type of the file"),
                "storage": schema_for_string("Storage location (optional)"),
                "title": schema_for_string("File title (optional)")
            }),
            &["fileName"],
        ),
    )
}

/// Builds the tool definition for `getUsers`.
fn get_users_definition() -> ToolDefinition {
    build_tool_definition(
        ToolName::GetUsers,
        "Get users from Directus",
        connection_schema(
            json!({
                "query": schema_for_object(
                    "Query parameters like filter, sort, limit, etc. (optional)"
                )
            }),
            &[],
        ),
    )
}

/// Builds the tool definition for `getCurrentUser`.
fn get_current_user_definition() -> ToolDefinition {
    build_tool_definition(
        ToolName::GetCurrentUser,
        "Get the current user info",
        connection_schema(json!({}), &[]),
    )
}

/// Builds the tool definition for `getRoles`.
fn get_roles_definition() -> ToolDefinition {
    build_tool_definition(
        ToolName::GetRoles,
        "Get roles from Directus",
        connection_schema(
            json!({
                "query": schema_for_object(
                    "Query parameters like filter, sort, limit, etc. (optional)"
                )
            }),
            &[],
        ),
    )
}

/// Builds the tool definition for `getPermissions`.
fn get_permissions_definition() -> ToolDefinition {
    build_tool_definition(
        ToolName::GetPermissions,
        "Get permissions from Directus",
        connection_schema(
            json!({
                "query": schema_for_object(
                    "Query parameters like filter, sort, limit, etc. (optional)"
                )
            }),
            &[],
        ),
    )
}

/// Builds the tool definition for `getConfig`.
fn get_config_definition() -> ToolDefinition {
    build_tool_definition(
        ToolName::GetConfig,
        "Get current configuration information (without secrets)",
        object_schema(json!({}), &[]),
    )
}

// ============================================================================
// SECTION: Schema Helpers
// ============================================================================

/// Assembles one tool definition.
fn build_tool_definition(name: ToolName, description: &str, input_schema: Value) -> ToolDefinition {
    ToolDefinition {
        name,
        description: description.to_string(),
        input_schema,
    }
}

/// Builds an input schema that leads with the shared `url`/`token` overrides.
fn connection_schema(tool_properties: Value, required: &[&str]) -> Value {
    let mut properties = json!({
        "url": schema_for_string("Directus API URL (default from config)"),
        "token": schema_for_string("Authentication token (default from config)")
    });
    if let (Some(base), Value::Object(extra)) = (properties.as_object_mut(), tool_properties) {
        for (key, value) in extra {
            base.insert(key, value);
        }
    }
    object_schema(properties, required)
}

/// Builds an object schema with the given properties and required list.
fn object_schema(properties: Value, required: &[&str]) -> Value {
    let required_values: Vec<Value> =
        required.iter().map(|value| Value::String((*value).to_string())).collect();
    json!({
        "type": "object",
        "properties": properties,
        "required": required_values
    })
}

/// Returns a JSON schema for strings.
fn schema_for_string(description: &str) -> Value {
    json!({
        "type": "string",
        "description": description
    })
}

/// Returns a JSON schema for free-form objects.
fn schema_for_object(description: &str) -> Value {
    json!({
        "type": "object",
        "description": description
    })
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

    use serde_json::Value;

    use super::ToolName;
    use super::tool_definitions;

    #[test]
    fn definitions_cover_every_tool_in_canonical_order() {
        let definitions = tool_definitions();
        let listed: Vec<ToolName> =
            definitions.iter().map(|definition| definition.name).collect();
        assert_eq!(listed.as_slice(), ToolName::all());
    }

    #[test]
    fn networked_tools_advertise_url_and_token_overrides() {
        for definition in tool_definitions() {
            if definition.name == ToolName::GetConfig {
                continue;
            }
            let properties = definition
                .input_schema
                .get("properties")
                .and_then(Value::as_object)
                .expect("object properties");
            assert!(properties.contains_key("url"), "{} lacks url", definition.name);
            if definition.name == ToolName::Login {
                assert!(properties.contains_key("email"));
                assert!(properties.contains_key("password"));
            } else {
                assert!(properties.contains_key("token"), "{} lacks token", definition.name);
            }
        }
    }

    #[test]
    fn required_lists_never_include_connection_overrides() {
        for definition in tool_definitions() {
            let required = definition
                .input_schema
                .get("required")
                .and_then(Value::as_array)
                .expect("required array");
            for entry in required {
                let field = entry.as_str().expect("string entry");
                assert_ne!(field, "url");
                assert_ne!(field, "token");
            }
        }
    }

    #[test]
    fn get_config_takes_no_arguments() {
        let definition = tool_definitions()
            .into_iter()
            .find(|definition| definition.name == ToolName::GetConfig)
            .expect("getConfig definition");
        let properties = definition
            .input_schema
            .get("properties")
            .and_then(Value::as_object)
            .expect("object properties");
        assert!(properties.is_empty());
    }
}
