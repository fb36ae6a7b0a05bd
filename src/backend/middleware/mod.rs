//! Middleware Module
//!
//! This module contains the HTTP middleware for the backend server.
//!
//! # Architecture
//!
//! - **`identity`** - Guarantees every request carries an identity and
//!   exposes it to handlers through the `CurrentUser` extractor
//!
//! # Example
//!
//! ```rust,no_run
//! use flowspace::backend::middleware::CurrentUser;
//!
//! async fn handler(CurrentUser(identity): CurrentUser) -> String {
//!     identity.user_id
//! }
//! ```

pub mod identity;

pub use identity::{identity_middleware, CurrentUser};
