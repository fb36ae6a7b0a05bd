/**
 * Message Response
 *
 * Plain acknowledgement body returned by endpoints that have nothing else
 * to report (update, delete, logout).
 */
use serde::{Deserialize, Serialize};

/// `{ "message": "..." }`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
