/**
 * Current User Handler
 *
 * `GET /api/user/info` returns the identity of the caller. Sessions without
 * an identity have already been made guest by the identity middleware, so
 * this endpoint always answers.
 */
use axum::response::Json;

use crate::backend::middleware::CurrentUser;
use crate::shared::Identity;

/// Current identity
///
/// # Example Response
///
/// ```json
/// {
///   "user_id": "guest",
///   "user_name": "Guest",
///   "user_type": "guest",
///   "avatar_url": null,
///   "email": null
/// }
/// ```
pub async fn user_info(CurrentUser(identity): CurrentUser) -> Json<Identity> {
    Json(identity)
}
