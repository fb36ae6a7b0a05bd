/**
 * Session Context
 *
 * The identity resolver reads and writes per-request session state only
 * through the `SessionContext` trait. The server passes the
 * `tower_sessions::Session` of the current request; tests pass a
 * `MemorySession`.
 *
 * # Stored Keys
 *
 * - `identity` - the serialized `Identity` of the caller
 * - `oauth_state` - CSRF state issued by `begin_login`, consumed by the callback
 */
use async_trait::async_trait;
use tokio::sync::Mutex;
use tower_sessions::Session;

use crate::backend::auth::error::IdentityError;
use crate::shared::Identity;

/// Session key holding the caller's identity
pub const IDENTITY_KEY: &str = "identity";

/// Session key holding the pending OAuth state
pub const LOGIN_STATE_KEY: &str = "oauth_state";

/// Per-request session state used by the identity resolver
#[async_trait]
pub trait SessionContext: Send + Sync {
    /// Identity stored in the session, if any
    async fn identity(&self) -> Result<Option<Identity>, IdentityError>;

    async fn set_identity(&self, identity: &Identity) -> Result<(), IdentityError>;

    /// Remove and return the pending OAuth state
    async fn take_login_state(&self) -> Result<Option<String>, IdentityError>;

    async fn set_login_state(&self, state: &str) -> Result<(), IdentityError>;

    /// Drop everything stored in the session
    async fn clear(&self) -> Result<(), IdentityError>;
}

#[async_trait]
impl SessionContext for Session {
    async fn identity(&self) -> Result<Option<Identity>, IdentityError> {
        self.get::<Identity>(IDENTITY_KEY)
            .await
            .map_err(IdentityError::session)
    }

    async fn set_identity(&self, identity: &Identity) -> Result<(), IdentityError> {
        self.insert(IDENTITY_KEY, identity)
            .await
            .map_err(IdentityError::session)
    }

    async fn take_login_state(&self) -> Result<Option<String>, IdentityError> {
        self.remove::<String>(LOGIN_STATE_KEY)
            .await
            .map_err(IdentityError::session)
    }

    async fn set_login_state(&self, state: &str) -> Result<(), IdentityError> {
        self.insert(LOGIN_STATE_KEY, state)
            .await
            .map_err(IdentityError::session)
    }

    async fn clear(&self) -> Result<(), IdentityError> {
        self.flush().await.map_err(IdentityError::session)
    }
}

/// In-process session used by tests and tools
#[derive(Debug, Default)]
pub struct MemorySession {
    identity: Mutex<Option<Identity>>,
    login_state: Mutex<Option<String>>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session that already carries `identity`
    #[cfg(test)]
    pub fn with_identity(identity: Identity) -> Self {
        Self {
            identity: Mutex::new(Some(identity)),
            login_state: Mutex::new(None),
        }
    }
}

#[async_trait]
impl SessionContext for MemorySession {
    async fn identity(&self) -> Result<Option<Identity>, IdentityError> {
        Ok(self.identity.lock().await.clone())
    }

    async fn set_identity(&self, identity: &Identity) -> Result<(), IdentityError> {
        *self.identity.lock().await = Some(identity.clone());
        Ok(())
    }

    async fn take_login_state(&self) -> Result<Option<String>, IdentityError> {
        Ok(self.login_state.lock().await.take())
    }

    async fn set_login_state(&self, state: &str) -> Result<(), IdentityError> {
        *self.login_state.lock().await = Some(state.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), IdentityError> {
        *self.identity.lock().await = None;
        *self.login_state.lock().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_session_login_state_is_single_use() {
        let session = MemorySession::new();
        session.set_login_state("abc").await.unwrap();
        assert_eq!(session.take_login_state().await.unwrap(), Some("abc".to_string()));
        assert_eq!(session.take_login_state().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_session_clear() {
        let session = MemorySession::with_identity(Identity::guest());
        session.set_login_state("abc").await.unwrap();
        session.clear().await.unwrap();
        assert!(session.identity().await.unwrap().is_none());
        assert!(session.take_login_state().await.unwrap().is_none());
    }
}
