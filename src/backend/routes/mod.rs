//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs        - Module exports and documentation
//! ├── router.rs     - Router assembly and middleware stack
//! └── api_routes.rs - `/api` endpoints
//! ```
//!
//! # Routes
//!
//! ## Documents
//!
//! - `GET /api/files` - List documents
//! - `POST /api/files` - Create a document (multipart `file`)
//! - `GET /api/files/{filename}` - Read a document
//! - `PUT /api/files/{filename}` - Replace a document
//! - `DELETE /api/files/{filename}` - Delete a document
//!
//! ## Identity
//!
//! - `GET /api/login/{provider}` - Start an OAuth login
//! - `GET /api/auth/{provider}/callback` - OAuth callback
//! - `POST /api/logout` - End a provider login
//! - `GET /api/user/info` - Current identity
//!
//! ## Other
//!
//! - `GET /health` - Liveness check, outside the session layer

/// Main router creation
pub mod router;

/// API endpoint routes
pub mod api_routes;

pub use router::create_router;
