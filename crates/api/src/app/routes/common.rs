use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;

use mobicorp_core::UserId;

use crate::app::errors;

/// Requesting actor, carried in the `x-user-id` header.
///
/// Stand-in for the authentication layer this deployment does not ship:
/// handlers that record an actor identity require the header and reject
/// requests without it.
pub struct Actor(pub UserId);

#[axum::async_trait]
impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = axum::response::Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                errors::json_error(
                    StatusCode::BAD_REQUEST,
                    "missing_actor",
                    "x-user-id header is required",
                )
            })?;

        let user_id: UserId = raw.parse().map_err(|_| {
            errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_actor",
                "x-user-id must be a UUID",
            )
        })?;

        Ok(Actor(user_id))
    }
}
