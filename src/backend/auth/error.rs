/**
 * Identity Error Types
 *
 * Failures raised while resolving, establishing or ending an identity.
 */
use thiserror::Error;

use crate::backend::auth::provider::Provider;
use crate::backend::workspace::WorkspaceError;

/// Errors raised by the identity resolver and its collaborators
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The provider's client id or secret is missing
    #[error("{} login is not configured", .0.label())]
    ProviderNotConfigured(Provider),

    /// The path named a provider that does not exist
    #[error("Unknown identity provider: {0}")]
    UnknownProvider(String),

    /// Guests have nothing to log out of
    #[error("Guest users cannot log out")]
    GuestLogout,

    /// The callback `state` does not match the one issued at login
    #[error("OAuth state mismatch")]
    StateMismatch,

    /// The provider redirected back with an `error` parameter
    #[error("Authorization was denied: {0}")]
    AuthorizationDenied(String),

    /// The callback carried no authorization code
    #[error("Missing authorization code")]
    MissingCode,

    /// The session store could not be read or written
    #[error("Session store error: {0}")]
    Session(String),

    /// Token exchange with the provider failed
    #[error("OAuth exchange failed: {0}")]
    OAuth(String),

    /// The provider's profile API failed or returned an unexpected body
    #[error("Profile request failed: {0}")]
    Profile(String),

    /// Provisioning the identity's workspace failed
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),
}

impl IdentityError {
    pub fn session(err: impl std::fmt::Display) -> Self {
        Self::Session(err.to_string())
    }
}
