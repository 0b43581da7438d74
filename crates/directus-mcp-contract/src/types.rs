// crates/directus-mcp-contract/src/types.rs
// ============================================================================
// Module: Tooling Identifiers
// Description: Canonical MCP tool identifiers for the Directus MCP server.
// Purpose: Shared tool naming across the contract, runtime, and tests.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Canonical tool identifiers for the Directus MCP surface. These names are
//! part of the external contract and use the camel-case spelling MCP clients
//! see on the wire.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Tool Names
// ============================================================================

/// Canonical tool names for the Directus MCP server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ToolName {
    /// List items from a collection.
    GetItems,
    /// Fetch a single item from a collection by ID.
    GetItem,
    /// Create a new item in a collection.
    CreateItem,
    /// Update an existing item in a collection.
    UpdateItem,
    /// Delete an item from a collection.
    DeleteItem,
    /// Fetch a system endpoint (health, info, activity).
    GetSystemInfo,
    /// Fetch all collection schemas.
    GetCollections,
    /// Exchange credentials for an access token.
    Login,
    /// Fetch activity logs.
    GetActivity,
    /// Fetch field definitions for a collection.
    GetFields,
    /// Fetch relations, optionally scoped to a collection.
    GetRelations,
    /// List file records.
    GetFiles,
    /// Import or upload a file.
    UploadFile,
    /// List user records.
    GetUsers,
    /// Fetch the authenticated user.
    GetCurrentUser,
    /// List role records.
    GetRoles,
    /// List permission records.
    GetPermissions,
    /// Report the effective configuration without secrets.
    GetConfig,
}

impl ToolName {
    /// Returns the canonical string name for the tool.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GetItems => "getItems",
            Self::GetItem => "getItem",
            Self::CreateItem => "createItem",
            Self::UpdateItem => "updateItem",
            Self::DeleteItem => "deleteItem",
            Self::GetSystemInfo => "getSystemInfo",
            Self::GetCollections => "getCollections",
            Self::Login => "login",
            Self::GetActivity => "getActivity",
            Self::GetFields => "getFields",
            Self::GetRelations => "getRelations",
            Self::GetFiles => "getFiles",
            Self::UploadFile => "uploadFile",
            Self::GetUsers => "getUsers",
            Self::GetCurrentUser => "getCurrentUser",
            Self::GetRoles => "getRoles",
            Self::GetPermissions => "getPermissions",
            Self::GetConfig => "getConfig",
        }
    }

    /// Returns all tool names in canonical listing order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::GetItems,
            Self::GetItem,
            Self::CreateItem,
            Self::UpdateItem,
            Self::DeleteItem,
            Self::GetSystemInfo,
            Self::GetCollections,
            Self::Login,
            Self::GetActivity,
            Self::GetFields,
            Self::GetRelations,
            Self::GetFiles,
            Self::UploadFile,
            Self::GetUsers,
            Self::GetCurrentUser,
            Self::GetRoles,
            Self::GetPermissions,
            Self::GetConfig,
        ]
    }

    /// Parses a tool name from its string representation.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "getItems" => Some(Self::GetItems),
            "getItem" => Some(Self::GetItem),
            "createItem" => Some(Self::CreateItem),
            "updateItem" => Some(Self::UpdateItem),
            "deleteItem" => Some(Self::DeleteItem),
            "getSystemInfo" => Some(Self::GetSystemInfo),
            "getCollections" => Some(Self::GetCollections),
            "login" => Some(Self::Login),
            "getActivity" => Some(Self::GetActivity),
            "getFields" => Some(Self::GetFields),
            "getRelations" => Some(Self::GetRelations),
            "getFiles" => Some(Self::GetFiles),
            "uploadFile" => Some(Self::UploadFile),
            "getUsers" => Some(Self::GetUsers),
            "getCurrentUser" => Some(Self::GetCurrentUser),
            "getRoles" => Some(Self::GetRoles),
            "getPermissions" => Some(Self::GetPermissions),
            "getConfig" => Some(Self::GetConfig),
            _ => None,
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Tool Definitions
// ============================================================================

/// Tool definition used by the MCP `tools/list` response.
///
/// # Invariants
/// - `name` is a stable MCP tool identifier.
/// - `input_schema` is a JSON Schema payload for the tool input shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// MCP tool name.
    pub name: ToolName,
    /// Tool description for clients.
    pub description: String,
    /// JSON schema for tool input.
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

// ============================================================================
// SECTION: Tests
// ============================================================================
