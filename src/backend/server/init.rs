/**
 * Server Initialization
 *
 * This module builds the Axum application from a `ServerConfig`.
 *
 * # Initialization Process
 *
 * 1. Create the workspace store and provision the guest workspace
 * 2. Build OAuth clients for every configured provider
 * 3. Open the session store and start expired-session cleanup
 * 4. Create the identity resolver
 * 5. Create and configure the router
 *
 * Tests call `build_app` directly to substitute the OAuth collaborator.
 */
use std::sync::Arc;

use axum::Router;
use thiserror::Error;

use crate::backend::auth::{IdentityError, IdentityResolver, OAuthClients, OAuthExchange};
use crate::backend::routes::router::create_router;
use crate::backend::server::config::ServerConfig;
use crate::backend::server::sessions::{
    open_session_store, spawn_expired_deletion, EXPIRED_SESSION_SWEEP, SESSION_STORE_FILE,
};
use crate::backend::server::state::AppState;
use crate::backend::workspace::{WorkspaceError, WorkspaceStore};
use crate::shared::GUEST_USER_ID;

/// Startup failures
#[derive(Debug, Error)]
pub enum InitError {
    #[error("Failed to prepare workspace root: {0}")]
    Workspace(#[from] WorkspaceError),

    #[error("Failed to configure identity providers: {0}")]
    Identity(#[from] IdentityError),

    #[error("Failed to open session store: {0}")]
    Sessions(#[from] sqlx::Error),
}

/// Create and configure the Axum application
///
/// # Errors
///
/// Fails if the workspace root or session store cannot be created, or a
/// provider's endpoints cannot be parsed. Missing provider credentials are
/// not an error.
pub async fn create_app(config: ServerConfig) -> Result<Router, InitError> {
    let oauth = OAuthClients::from_config(&config)?;
    build_app(config, Arc::new(oauth)).await
}

/// Build the application around a given OAuth collaborator
pub async fn build_app(
    config: ServerConfig,
    oauth: Arc<dyn OAuthExchange>,
) -> Result<Router, InitError> {
    tracing::info!("Initializing flowspace backend server");

    let workspaces = WorkspaceStore::new(config.workspace_root.clone());
    tracing::info!("Workspace root: {}", workspaces.root().display());
    let guest_dir = workspaces.provision(GUEST_USER_ID)?;
    tracing::info!("Guest workspace ready at {}", guest_dir.display());

    let session_path = config
        .session_store
        .clone()
        .unwrap_or_else(|| workspaces.root().join(SESSION_STORE_FILE));
    let sessions = open_session_store(&session_path).await?;
    spawn_expired_deletion(sessions.clone(), EXPIRED_SESSION_SWEEP);
    tracing::info!("Session store ready at {}", session_path.display());

    let identity = Arc::new(IdentityResolver::new(oauth, workspaces.clone()));

    let app_state = AppState {
        config: Arc::new(config),
        workspaces,
        identity,
    };

    let app = create_router(app_state, sessions);
    tracing::info!("Router configured");
    Ok(app)
}
