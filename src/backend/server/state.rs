/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct holds:
 * - The loaded server configuration
 * - The workspace store
 * - The identity resolver (with its OAuth collaborator)
 *
 * Per-user state lives in the session store and on disk, never here, so
 * every field is cheap to clone and shared read-only.
 *
 * # Example
 *
 * ```rust,no_run
 * use axum::extract::State;
 * use flowspace::backend::WorkspaceStore;
 *
 * async fn handler(State(store): State<WorkspaceStore>) {
 *     let _root = store.root();
 * }
 * ```
 */
use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::auth::IdentityResolver;
use crate::backend::server::config::ServerConfig;
use crate::backend::workspace::WorkspaceStore;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// Configuration the server was started with
    pub config: Arc<ServerConfig>,

    /// Document storage rooted at `config.workspace_root`
    pub workspaces: WorkspaceStore,

    /// Resolves the caller's identity from the session
    pub identity: Arc<IdentityResolver>,
}

impl FromRef<AppState> for Arc<ServerConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}

impl FromRef<AppState> for WorkspaceStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.workspaces.clone()
    }
}

/// Lets handlers and the identity middleware extract
/// `State<Arc<IdentityResolver>>` directly.
impl FromRef<AppState> for Arc<IdentityResolver> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.identity.clone()
    }
}
