//! Identity Handlers Module
//!
//! HTTP handlers for the identity endpoints. Each handler is a thin shell
//! around `IdentityResolver`; errors convert into `ApiError` with `?`.
//!
//! # Handlers
//!
//! - **`begin_login`** - GET /api/login/{provider} - Redirect to the provider
//! - **`complete_login`** - GET /api/auth/{provider}/callback - Finish the login
//! - **`logout`** - POST /api/logout - Return the session to guest
//! - **`user_info`** - GET /api/user/info - Current identity

/// Login redirect and provider callback
pub mod login;

/// Logout handler
pub mod logout;

/// Current user handler
pub mod me;

pub use login::{begin_login, complete_login};
pub use logout::logout;
pub use me::user_info;
