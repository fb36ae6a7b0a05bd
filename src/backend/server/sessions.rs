/**
 * Session Store
 *
 * Sessions are kept in a SQLite file through `tower-sessions-sqlx-store`,
 * so logins survive a restart. Every request without a cookie creates a
 * record, and a background task removes records once they expire.
 */
use std::path::Path;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use tokio::task::JoinHandle;
use tower_sessions::session_store::ExpiredDeletion;
use tower_sessions_sqlx_store::SqliteStore;

/// Session database file name inside the workspace root
pub const SESSION_STORE_FILE: &str = "sessions.db";

/// Interval between expired-session sweeps
pub const EXPIRED_SESSION_SWEEP: Duration = Duration::from_secs(60);

/// Open (creating if needed) the session database at `path`
pub async fn open_session_store(path: &Path) -> Result<SqliteStore, sqlx::Error> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(options).await?;

    let store = SqliteStore::new(pool);
    store.migrate().await?;
    Ok(store)
}

/// Delete expired sessions every `period` until the runtime shuts down
pub fn spawn_expired_deletion(store: SqliteStore, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(e) = store.continuously_delete_expired(period).await {
            tracing::error!("Expired session cleanup stopped: {}", e);
        }
    })
}
