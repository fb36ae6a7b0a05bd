/**
 * Identity Snapshot
 *
 * This module defines the identity stored in the caller's session and
 * returned by `GET /api/user/info`.
 *
 * # Identity Classes
 *
 * - `guest` - assigned automatically to sessions without an identity
 * - `github` / `google` - established by a successful OAuth callback
 *
 * Provider identities use `"<provider>_<provider user id>"` as their user id,
 * so they can never collide with the guest workspace or with each other.
 */
use serde::{Deserialize, Serialize};

/// User id shared by all guest sessions
pub const GUEST_USER_ID: &str = "guest";

/// Class of an identity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Guest,
    Github,
    Google,
}

/// Identity of the caller for the lifetime of a session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    /// `"guest"` or `"<provider>_<provider user id>"`
    pub user_id: String,
    /// Display name
    pub user_name: String,
    pub user_type: UserType,
    pub avatar_url: Option<String>,
    pub email: Option<String>,
}

impl Identity {
    /// The identity given to sessions that have not logged in
    pub fn guest() -> Self {
        Self {
            user_id: GUEST_USER_ID.to_string(),
            user_name: "Guest".to_string(),
            user_type: UserType::Guest,
            avatar_url: None,
            email: None,
        }
    }

    pub fn is_guest(&self) -> bool {
        self.user_type == UserType::Guest
    }
}
