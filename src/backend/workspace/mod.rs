//! Workspace Module
//!
//! Durable, per-identity CRUD over named JSON documents plus their edit-time
//! metadata. The store has no knowledge of sessions; callers pass the user id
//! of an already resolved identity.
//!
//! # Module Structure
//!
//! ```text
//! workspace/
//! ├── mod.rs       - Module exports and documentation
//! ├── error.rs     - WorkspaceError
//! ├── filename.rs  - Filename sanitization
//! ├── metadata.rs  - metadata.json sidecar
//! ├── store.rs     - WorkspaceStore operations
//! └── handlers.rs  - HTTP handlers for /api/files
//! ```
//!
//! # On-disk Layout
//!
//! ```text
//! <root>/
//! ├── guest/
//! │   ├── metadata.json
//! │   └── diagram.flow.json
//! └── github_42/
//!     └── ...
//! ```
//!
//! # Consistency
//!
//! Document files and the metadata sidecar are written separately. A crash
//! between the two writes can leave them out of sync, and concurrent
//! read-modify-write cycles on the sidecar may lose an entry.

/// Workspace error type
pub mod error;

/// Filename sanitization
pub mod filename;

/// Metadata sidecar
pub mod metadata;

/// Document store
pub mod store;

/// HTTP handlers for document endpoints
pub mod handlers;

pub use error::WorkspaceError;
pub use store::WorkspaceStore;
