//! Backend Module
//!
//! This module contains all server-side code for the Flowspace application.
//! It provides an Axum HTTP server exposing per-user flow document storage
//! and session-based identity.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`workspace`** - Per-identity document store with edit metadata
//! - **`auth`** - Identity resolver, session context, OAuth providers
//! - **`middleware`** - Session identity middleware and extractor
//! - **`error`** - Boundary error type and HTTP conversion
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Binary entry point
//! ├── server/         - Configuration, state and initialization
//! ├── routes/         - Route configuration
//! ├── workspace/      - Document storage
//! ├── auth/           - Identity and OAuth login
//! ├── middleware/     - Request middleware
//! └── error/          - Error types
//! ```
//!
//! # Request Flow
//!
//! Every request passes through the session layer and then the identity
//! middleware, which guarantees the session carries an identity (a guest one
//! if nothing else was established). Document handlers then call the
//! workspace store with that identity's user id.
//!
//! # Error Handling
//!
//! Components raise typed errors (`WorkspaceError`, `IdentityError`). The
//! `ApiError` boundary type maps them onto HTTP statuses and a short JSON
//! body; unexpected failures become a generic 500 and are logged.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Per-identity document storage
pub mod workspace;

/// Identity resolution and OAuth login
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Backend error types
pub mod error;

/// Re-export commonly used types
pub use server::create_app;
pub use error::ApiError;
pub use workspace::{WorkspaceError, WorkspaceStore};
pub use auth::{IdentityError, IdentityResolver};
