/**
 * Workspace Error Types
 *
 * Failures raised by the workspace store. The HTTP mapping lives in
 * `backend::error`.
 */
use thiserror::Error;

/// Errors raised by workspace operations
#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// Missing or unusable filename, or content that cannot be serialized
    #[error("{0}")]
    InvalidInput(String),

    /// A document with the same sanitized name already exists
    #[error("File {0} already exists")]
    AlreadyExists(String),

    /// The document does not exist
    #[error("File {0} not found")]
    NotFound(String),

    /// Submitted or stored bytes are not valid JSON
    #[error("{0}")]
    MalformedContent(String),

    /// Underlying filesystem failure
    #[error("Workspace I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WorkspaceError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedContent(message.into())
    }
}
