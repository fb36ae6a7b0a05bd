//! Backend Error Module
//!
//! This module defines the error type returned by HTTP handlers and its
//! conversion into HTTP responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - ApiError and the status mapping
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # Propagation
//!
//! The workspace store raises `WorkspaceError` and the identity resolver
//! raises `IdentityError`. Both convert into `ApiError` with `?`, so handlers
//! never build status codes by hand except for request-shape problems.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::{ApiError, GENERIC_ERROR_MESSAGE, IDENTITY_UNAVAILABLE_MESSAGE};
