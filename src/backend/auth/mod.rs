//! Identity Module
//!
//! This module decides who the caller is and handles the transitions between
//! identities: guest on first contact, a provider identity after an OAuth
//! login, and back to guest on logout.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs       - Module exports and documentation
//! ├── error.rs     - IdentityError
//! ├── provider.rs  - Provider enum, endpoints and ProviderProfile
//! ├── session.rs   - SessionContext trait (tower-sessions and in-memory)
//! ├── oauth.rs     - OAuthExchange trait and the oauth2-backed clients
//! ├── profile.rs   - Provider profile API client
//! ├── resolver.rs  - IdentityResolver
//! └── handlers/    - HTTP handlers
//!     ├── mod.rs
//!     ├── login.rs  - Login redirect and provider callback
//!     ├── logout.rs - Logout
//!     └── me.rs     - Current user info
//! ```
//!
//! # Login Flow
//!
//! 1. `GET /api/login/{provider}` stores a CSRF state and redirects to the provider
//! 2. The provider redirects to `GET /api/auth/{provider}/callback`
//! 3. The code is exchanged for a token, the profile is fetched, the
//!    workspace is provisioned and the identity is stored in the session
//! 4. The user is redirected back to the client application
//!
//! # Security
//!
//! - Identities live server-side; the cookie only carries the session id
//! - The callback `state` must match the one issued for the session
//! - Provider ids are prefixed, so identities never share a workspace

pub mod error;

/// OAuth providers and normalized profiles
pub mod provider;

/// Session access
pub mod session;

/// OAuth token exchange
pub mod oauth;

/// Provider profile API client
pub mod profile;

/// Identity resolution and transitions
pub mod resolver;

/// HTTP handlers for identity endpoints
pub mod handlers;

// Re-export commonly used types
pub use error::IdentityError;
pub use oauth::{AuthorizationRequest, CallbackParams, OAuthClients, OAuthEndpoints, OAuthExchange};
pub use profile::ProfileClient;
pub use provider::{Provider, ProviderProfile};
pub use resolver::IdentityResolver;
pub use session::{MemorySession, SessionContext};
