/**
 * API Routes
 *
 * This module wires the `/api` endpoints to their handlers. Every route
 * here runs behind the session and identity middleware.
 */
use axum::{
    routing::{get, post},
    Router,
};

use crate::backend::auth::handlers::{begin_login, complete_login, logout, user_info};
use crate::backend::server::state::AppState;
use crate::backend::workspace::handlers::{
    create_file, delete_file, list_files, read_file, update_file,
};

/// Configure API routes
///
/// ## Document Routes
/// - `GET|POST /api/files`
/// - `GET|PUT|DELETE /api/files/{filename}`
///
/// ## Identity Routes
/// - `GET /api/login/{provider}`
/// - `GET /api/auth/{provider}/callback`
/// - `POST /api/logout`
/// - `GET /api/user/info`
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Document endpoints
        .route("/api/files", get(list_files).post(create_file))
        .route(
            "/api/files/{filename}",
            get(read_file).put(update_file).delete(delete_file),
        )
        // Identity endpoints
        .route("/api/login/{provider}", get(begin_login))
        .route("/api/auth/{provider}/callback", get(complete_login))
        .route("/api/logout", post(logout))
        .route("/api/user/info", get(user_info))
}
