/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all routes and the middleware stack into a single Axum router.
 *
 * # Middleware Order (outermost first)
 *
 * 1. Tracing of every request
 * 2. CORS for the configured client origins, with credentials
 * 3. Session cookie management (SQLite store)
 * 4. Identity resolution into request extensions
 *
 * `/health` sits outside the session and identity layers so health checks never
 * create sessions.
 */
use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    middleware,
    routing::get,
    Json, Router,
};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::backend::error::ApiError;
use crate::backend::middleware::identity_middleware;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::config::ServerConfig;
use crate::backend::server::state::AppState;

/// Name of the session cookie
pub const SESSION_COOKIE_NAME: &str = "flowspace.sid";

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state (config, workspace store, identity resolver)
/// * `sessions` - Store backing the session cookie
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState, sessions: SqliteStore) -> Router<()> {
    let config = app_state.config.clone();

    // Identity layer first so the session layer wraps it
    let api = configure_api_routes(Router::new())
        .layer(middleware::from_fn_with_state(
            app_state.clone(),
            identity_middleware,
        ))
        .layer(session_layer(&config, sessions));

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .fallback(|| async { ApiError::handler(StatusCode::NOT_FOUND, "Not found") })
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&config)),
        )
        .with_state(app_state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

fn session_layer(config: &ServerConfig, store: SqliteStore) -> SessionManagerLayer<SqliteStore> {
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_secure(config.cookie_secure)
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            config.session_lifetime_minutes,
        )))
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}
