/**
 * Logout Handler
 *
 * `POST /api/logout` ends a provider login and returns the session to
 * guest. Guests have nothing to end and get `400 Bad Request`.
 */
use std::sync::Arc;

use axum::{extract::State, response::Json};
use tower_sessions::Session;

use crate::backend::auth::error::IdentityError;
use crate::backend::auth::resolver::IdentityResolver;
use crate::backend::error::ApiError;
use crate::shared::MessageResponse;

/// Log the caller out
///
/// # Example Response
///
/// ```json
/// { "message": "Logged out successfully" }
/// ```
pub async fn logout(
    State(resolver): State<Arc<IdentityResolver>>,
    session: Session,
) -> Result<Json<MessageResponse>, ApiError> {
    match resolver.logout(&session).await? {
        Some(_) => Ok(Json(MessageResponse::new("Logged out successfully"))),
        None => {
            tracing::warn!("Logout requested by guest session");
            Err(IdentityError::GuestLogout.into())
        }
    }
}
