//! Flowspace - Main Library
//!
//! Flowspace is a small web backend for storing flow diagrams (JSON graphs of
//! nodes and edges) in per-user workspaces. Users are either anonymous guests
//! or log in through a third-party identity provider (GitHub, Google).
//!
//! # Module Structure
//!
//! The library is organized into two main modules:
//!
//! - **`shared`** - Wire types returned by the HTTP API
//!   - Document summaries and responses
//!   - Identity snapshot
//!   - Plain message responses
//!
//! - **`backend`** - Server-side code
//!   - Axum HTTP server, configuration and routing
//!   - Workspace store (per-user document storage with edit metadata)
//!   - Identity resolver (guest sessions, OAuth login, logout)
//!   - Error types and their HTTP mapping
//!
//! # Usage
//!
//! ```rust,no_run
//! use flowspace::backend::server::{config::ServerConfig, init::create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(config).await?;
//! // Serve `app` with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! # Storage Model
//!
//! Every identity owns one directory under the workspace root. Documents are
//! stored as `<name>.flow.json` files next to a single `metadata.json` sidecar
//! that maps document filenames to their last-edit timestamp. There is no
//! locking between requests: concurrent writers to the same document race and
//! the last write wins.
//!
//! # Error Handling
//!
//! - `Result<T, E>` for fallible operations
//! - Typed component errors (`WorkspaceError`, `IdentityError`)
//! - A boundary `ApiError` that maps every failure to an HTTP status

/// Shared API types
pub mod shared;

/// Backend server-side code
pub mod backend;
