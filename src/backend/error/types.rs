/**
 * Backend Error Types
 *
 * This module defines the boundary error returned by every HTTP handler.
 * Component errors convert into it with `?` and it decides the status code
 * and the message the client sees.
 *
 * # Status Mapping
 *
 * | Failure | Status |
 * |---|---|
 * | `InvalidInput`, `MalformedContent` | 400 |
 * | `AlreadyExists` | 409 |
 * | `NotFound` | 404 |
 * | guest logout, OAuth state mismatch, denied/missing code | 400 |
 * | unknown provider | 404 |
 * | provider not configured, session store unavailable | 503 |
 * | everything else | 500 with a generic message |
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::auth::IdentityError;
use crate::backend::workspace::WorkspaceError;

/// Message sent to clients for failures that are not their fault
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Message sent when the session store cannot be used
pub const IDENTITY_UNAVAILABLE_MESSAGE: &str = "User management is not available";

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use axum::http::StatusCode;
/// use flowspace::backend::error::ApiError;
///
/// let err = ApiError::handler(StatusCode::BAD_REQUEST, "No file part");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// Workspace store failure
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    /// Identity resolver failure
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// Handler error (e.g., missing multipart field, invalid request)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Unexpected failure; the message is logged, never sent
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ApiError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Workspace(err) => workspace_status(err),
            Self::Identity(err) => identity_status(err),
            Self::HandlerError { status, .. } => *status,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the message sent to the client
    ///
    /// Server-side failures never expose their details.
    pub fn message(&self) -> String {
        if self.status_code() == StatusCode::INTERNAL_SERVER_ERROR {
            return GENERIC_ERROR_MESSAGE.to_string();
        }
        match self {
            Self::Identity(IdentityError::Session(_)) => IDENTITY_UNAVAILABLE_MESSAGE.to_string(),
            Self::HandlerError { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

fn workspace_status(err: &WorkspaceError) -> StatusCode {
    match err {
        WorkspaceError::InvalidInput(_) | WorkspaceError::MalformedContent(_) => {
            StatusCode::BAD_REQUEST
        }
        WorkspaceError::AlreadyExists(_) => StatusCode::CONFLICT,
        WorkspaceError::NotFound(_) => StatusCode::NOT_FOUND,
        WorkspaceError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn identity_status(err: &IdentityError) -> StatusCode {
    match err {
        IdentityError::ProviderNotConfigured(_) | IdentityError::Session(_) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        IdentityError::UnknownProvider(_) => StatusCode::NOT_FOUND,
        IdentityError::GuestLogout
        | IdentityError::StateMismatch
        | IdentityError::AuthorizationDenied(_)
        | IdentityError::MissingCode => StatusCode::BAD_REQUEST,
        IdentityError::OAuth(_) | IdentityError::Profile(_) => StatusCode::INTERNAL_SERVER_ERROR,
        IdentityError::Workspace(inner) => workspace_status(inner),
    }
}
