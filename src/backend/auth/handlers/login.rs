/**
 * Login Handlers
 *
 * This module implements the two halves of the OAuth login:
 * `GET /api/login/{provider}` and `GET /api/auth/{provider}/callback`.
 *
 * # Login Process
 *
 * 1. Parse the provider from the path (unknown providers are 404)
 * 2. Store a fresh CSRF state in the session
 * 3. Redirect the browser to the provider's consent screen
 * 4. On callback, verify the state, exchange the code and fetch the profile
 * 5. Provision the workspace, store the identity, redirect to the client app
 *
 * # Errors
 *
 * * `404 Not Found` - Unknown provider
 * * `503 Service Unavailable` - Provider credentials are not configured
 * * `400 Bad Request` - State mismatch, denied consent or missing code
 * * `500 Internal Server Error` - Token exchange or profile request failed
 */
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::Redirect,
};
use tower_sessions::Session;

use crate::backend::auth::oauth::CallbackParams;
use crate::backend::auth::provider::Provider;
use crate::backend::auth::resolver::IdentityResolver;
use crate::backend::error::ApiError;
use crate::backend::server::config::ServerConfig;

/// Begin a login with `provider`
///
/// # Example Request
///
/// ```http
/// GET /api/login/github HTTP/1.1
/// ```
///
/// Responds `303 See Other` with `Location` set to the provider's
/// authorization URL.
pub async fn begin_login(
    State(resolver): State<Arc<IdentityResolver>>,
    session: Session,
    Path(provider): Path<String>,
) -> Result<Redirect, ApiError> {
    let provider: Provider = provider.parse()?;
    let url = resolver.begin_login(&session, provider).await?;
    Ok(Redirect::to(&url))
}

/// Provider callback
///
/// On success the browser is sent back to the client application with the
/// new identity already stored in the session.
pub async fn complete_login(
    State(resolver): State<Arc<IdentityResolver>>,
    State(config): State<Arc<ServerConfig>>,
    session: Session,
    Path(provider): Path<String>,
    Query(params): Query<CallbackParams>,
) -> Result<Redirect, ApiError> {
    let provider: Provider = provider.parse()?;
    resolver.complete_login(&session, provider, &params).await?;
    Ok(Redirect::to(&config.client_app_url))
}
