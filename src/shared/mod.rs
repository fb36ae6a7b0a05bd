//! Shared Module
//!
//! This module contains the types that cross the HTTP boundary. Handlers
//! serialize them into JSON responses and the integration tests deserialize
//! them back.
//!
//! # Overview
//!
//! The shared module provides platform-agnostic types with no knowledge of
//! the filesystem or of sessions. All types are designed for serialization
//! and transmission over HTTP.

/// Document summaries, document payloads and naming constants
pub mod document;

/// Identity snapshot of the current caller
pub mod identity;

/// Plain `{ "message": ... }` responses
pub mod message;

/// Re-export commonly used types for convenience
pub use document::{
    empty_graph, CreatedDocument, DocumentContent, DocumentSummary, UpdateDocumentRequest,
    FLOW_FILE_EXTENSION, METADATA_FILE_NAME, NEVER_EDITED,
};
pub use identity::{Identity, UserType, GUEST_USER_ID};
pub use message::MessageResponse;
