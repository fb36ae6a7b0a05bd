/**
 * Document Data Structures
 *
 * This module defines the JSON shapes used by the document endpoints and
 * the naming constants shared by the workspace store.
 *
 * A document is an arbitrary JSON value stored under a name. Flow diagrams
 * are usually `{ "nodes": [...], "edges": [...] }` but the store only
 * requires syntactically valid JSON.
 */
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Suffix carried by every stored document file
pub const FLOW_FILE_EXTENSION: &str = ".flow.json";

/// Name of the per-workspace metadata sidecar
pub const METADATA_FILE_NAME: &str = "metadata.json";

/// Last-edit value reported for documents without a metadata entry
pub const NEVER_EDITED: &str = "Never";

/// Content stored when a document is created empty
pub fn empty_graph() -> Value {
    json!({ "nodes": [], "edges": [] })
}

/// One entry of a workspace listing
///
/// # Fields
/// * `name` - Document name without the `.flow.json` suffix
/// * `last_edit` - ISO-8601 timestamp of the last recorded edit, or `"Never"`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentSummary {
    pub name: String,
    pub last_edit: String,
}

/// Response body for a successful create
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedDocument {
    pub message: String,
    /// Final stored filename, including the `.flow.json` suffix
    pub filename: String,
}

/// Response body for a successful read
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentContent {
    /// Name as requested by the client
    pub filename: String,
    pub content: Value,
}

/// Request body for an update
///
/// `content` replaces the stored document entirely.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct UpdateDocumentRequest {
    #[serde(default)]
    pub content: Option<Value>,
}
