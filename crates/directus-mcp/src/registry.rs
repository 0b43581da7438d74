// crates/directus-mcp/src/registry.rs
// ============================================================================
// Module: Operation Registry
// Description: Declarative dispatch table for every MCP tool.
// Purpose: Describe request shape and required arguments in one place.
// Dependencies: directus-mcp-contract
// ============================================================================

//! ## Overview
//! Every tool is described by an [`OperationSpec`] entry: its required
//! arguments and how the dispatcher turns a call into work. Most tools are
//! plain HTTP operations fully captured by a method, a path template, and
//! optional query/body argument names. The three tools with bespoke behavior
//! (`login`, `uploadFile`, `getConfig`) are marked as such and handled
//! directly by the dispatcher.
//!
//! ## Invariants
//! - The table has exactly one entry per [`ToolName`] variant.
//! - Required arguments listed here agree with the advertised input schemas.

// ============================================================================
// SECTION: Imports
// ============================================================================

use directus_mcp_contract::ToolName;

// ============================================================================
// SECTION: Types
// ============================================================================

/// HTTP method used by an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET.
    Get,
    /// HTTP POST.
    Post,
    /// HTTP PATCH.
    Patch,
    /// HTTP DELETE.
    Delete,
}

impl HttpMethod {
    /// Returns the canonical method token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// One element of an operation path template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSegment {
    /// Fixed path component.
    Literal(&'static str),
    /// Component filled from a required argument.
    Arg(&'static str),
    /// Component filled from an optional argument; omitted when absent.
    OptionalArg(&'static str),
}

/// Request shape for a plain HTTP operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpOperation {
    /// HTTP method.
    pub method: HttpMethod,
    /// Path template appended to the base URL.
    pub path: &'static [PathSegment],
    /// Argument holding query parameters, when supported.
    pub query_arg: Option<&'static str>,
    /// Argument holding the JSON request body, when supported.
    pub body_arg: Option<&'static str>,
    /// Fixed success text replacing the response body, when set.
    pub success_text: Option<&'static str>,
}

/// How the dispatcher executes an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// Plain HTTP request against the deployment.
    Http(HttpOperation),
    /// Credential exchange against `/auth/login`.
    Login,
    /// Two-step file import via `/files`.
    UploadFile,
    /// Local configuration introspection; no network traffic.
    ShowConfig,
}

/// Dispatch table entry for one tool.
#[derive(Debug, Clone, Copy)]
pub struct OperationSpec {
    /// Tool this entry dispatches.
    pub name: ToolName,
    /// Arguments that must be present and non-null.
    pub required: &'static [&'static str],
    /// Execution shape.
    pub kind: OperationKind,
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// The complete dispatch table, in canonical tool order.
const OPERATIONS: &[OperationSpec] = &[
    OperationSpec {
        name: ToolName::GetItems,
        required: &["collection"],
        kind: OperationKind::Http(HttpOperation {
            method: HttpMethod::Get,
            path: &[PathSegment::Literal("items"), PathSegment::Arg("collection")],
            query_arg: Some("query"),
            body_arg: None,
            success_text: None,
        }),
    },
    OperationSpec {
        name: ToolName::GetItem,
        required: &["collection", "id"],
        kind: OperationKind::Http(HttpOperation {
            method: HttpMethod::Get,
            path: &[
                PathSegment::Literal("items"),
                PathSegment::Arg("collection"),
                PathSegment::Arg("id"),
            ],
            query_arg: Some("query"),
            body_arg: None,
            success_text: None,
        }),
    },
    OperationSpec {
        name: ToolName::CreateItem,
        required: &["collection", "data"],
        kind: OperationKind::Http(HttpOperation {
            method: HttpMethod::Post,
            path: &[PathSegment::Literal("items"), PathSegment::Arg("collection")],
            query_arg: None,
            body_arg: Some("data"),
            success_text: None,
        }),
    },
    OperationSpec {
        name: ToolName::UpdateItem,
        required: &["collection", "id", "data"],
        kind: OperationKind::Http(HttpOperation {
            method: HttpMethod::Patch,
            path: &[
                PathSegment::Literal("items"),
                PathSegment::Arg("collection"),
                PathSegment::Arg("id"),
            ],
            query_arg: None,
            body_arg: Some("data"),
            success_text: None,
        }),
    },
    OperationSpec {
        name: ToolName::DeleteItem,
        required: &["collection", "id"],
        kind: OperationKind::Http(HttpOperation {
            method: HttpMethod::Delete,
            path: &[
                PathSegment::Literal("items"),
                PathSegment::Arg("collection"),
                PathSegment::Arg("id"),
            ],
            query_arg: None,
            body_arg: None,
            success_text: Some("Item deleted successfully"),
        }),
    },
    OperationSpec {
        name: ToolName::GetSystemInfo,
        required: &["endpoint"],
        kind: OperationKind::Http(HttpOperation {
            method: HttpMethod::Get,
            path: &[PathSegment::Literal("server"), PathSegment::Arg("endpoint")],
            query_arg: None,
            body_arg: None,
            success_text: None,
        }),
    },
    OperationSpec {
        name: ToolName::GetCollections,
        required: &[],
        kind: OperationKind::Http(HttpOperation {
            method: HttpMethod::Get,
            path: &[PathSegment::Literal("collections")],
            query_arg: None,
            body_arg: None,
            success_text: None,
        }),
    },
    OperationSpec {
        name: ToolName::Login,
        required: &[],
        kind: OperationKind::Login,
    },
    OperationSpec {
        name: ToolName::GetActivity,
        required: &[],
        kind: OperationKind::Http(HttpOperation {
            method: HttpMethod::Get,
            path: &[PathSegment::Literal("activity")],
            query_arg: Some("query"),
            body_arg: None,
            success_text: None,
        }),
    },
    OperationSpec {
        name: ToolName::GetFields,
        required: &["collection"],
        kind: OperationKind::Http(HttpOperation {
            method: HttpMethod::Get,
            path: &[PathSegment::Literal("fields"), PathSegment::Arg("collection")],
            query_arg: None,
            body_arg: None,
            success_text: None,
        }),
    },
    OperationSpec {
        name: ToolName::GetRelations,
        required: &[],
        kind: OperationKind::Http(HttpOperation {
            method: HttpMethod::Get,
            path: &[PathSegment::Literal("relations"), PathSegment::OptionalArg("collection")],
            query_arg: None,
            body_arg: None,
            success_text: None,
        }),
    },
    OperationSpec {
        name: ToolName::GetFiles,
        required: &[],
        kind: OperationKind::Http(HttpOperation {
            method: HttpMethod::Get,
            path: &[PathSegment::Literal("files")],
            query_arg: Some("query"),
            body_arg: None,
            success_text: None,
        }),
    },
    OperationSpec {
        name: ToolName::UploadFile,
        required: &["fileName"],
        kind: OperationKind::UploadFile,
    },
    OperationSpec {
        name: ToolName::GetUsers,
        required: &[],
        kind: OperationKind::Http(HttpOperation {
            method: HttpMethod::Get,
            path: &[PathSegment::Literal("users")],
            query_arg: Some("query"),
            body_arg: None,
            success_text: None,
        }),
    },
    OperationSpec {
        name: ToolName::GetCurrentUser,
        required: &[],
        kind: OperationKind::Http(HttpOperation {
            method: HttpMethod::Get,
            path: &[PathSegment::Literal("users"), PathSegment::Literal("me")],
            query_arg: None,
            body_arg: None,
            success_text: None,
        }),
    },
    OperationSpec {
        name: ToolName::GetRoles,
        required: &[],
        kind: OperationKind::Http(HttpOperation {
            method: HttpMethod::Get,
            path: &[PathSegment::Literal("roles")],
            query_arg: Some("query"),
            body_arg: None,
            success_text: None,
        }),
    },
    OperationSpec {
        name: ToolName::GetPermissions,
        required: &[],
        kind: OperationKind::Http(HttpOperation {
            method: HttpMethod::Get,
            path: &[PathSegment::Literal("permissions")],
            query_arg: Some("query"),
            body_arg: None,
            success_text: None,
        }),
    },
    OperationSpec {
        name: ToolName::GetConfig,
        required: &[],
        kind: OperationKind::ShowConfig,
    },
];

/// Returns the complete dispatch table in canonical order.
#[must_use]
pub const fn operations() -> &'static [OperationSpec] {
    OPERATIONS
}

/// Looks up the dispatch entry for a tool.
#[must_use]
pub fn operation(name: ToolName) -> Option<&'static OperationSpec> {
    OPERATIONS.iter().find(|spec| spec.name == name)
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

    use directus_mcp_contract::ToolName;

    use super::OperationKind;
    use super::PathSegment;
    use super::operation;
    use super::operations;

    #[test]
    fn every_tool_has_exactly_one_entry_in_canonical_order() {
        let listed: Vec<ToolName> = operations().iter().map(|spec| spec.name).collect();
        assert_eq!(listed.as_slice(), ToolName::all());
    }

    #[test]
    fn path_arguments_are_always_required() {
        for spec in operations() {
            let OperationKind::Http(http) = spec.kind else {
                continue;
            };
            for segment in http.path {
                if let PathSegment::Arg(name) = segment {
                    assert!(
                        spec.required.contains(name),
                        "{}: path argument {name} missing from required list",
                        spec.name
                    );
                }
            }
        }
    }

    #[test]
    fn lookup_finds_every_tool() {
        for name in ToolName::all() {
            assert!(operation(*name).is_some(), "{name} has no dispatch entry");
        }
    }
}
