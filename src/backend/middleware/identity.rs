/**
 * Identity Middleware
 *
 * Runs inside the session layer on every request. It resolves the caller's
 * identity (making the session guest if it holds none) and attaches it to
 * the request extensions, where handlers pick it up with `CurrentUser`.
 */
use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use tower_sessions::Session;

use crate::backend::auth::{IdentityError, IdentityResolver};
use crate::backend::error::ApiError;
use crate::shared::Identity;

/// Identity middleware
///
/// 1. Reads the identity from the session
/// 2. Stores the guest identity if there is none
/// 3. Attaches the identity to request extensions
///
/// Returns 503 if the session store cannot be used.
pub async fn identity_middleware(
    State(resolver): State<Arc<IdentityResolver>>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = resolver.ensure_session(&session).await?;
    request.extensions_mut().insert(CurrentUser(identity));
    Ok(next.run(request).await)
}

/// Axum extractor for the caller's identity
///
/// Requires `identity_middleware` to have run for the request.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub Identity);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<CurrentUser>().cloned().ok_or_else(|| {
            tracing::warn!("CurrentUser not found in request extensions");
            IdentityError::session("identity middleware did not run").into()
        })
    }
}
