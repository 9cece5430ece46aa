use axum::body::Bytes;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use domains::Payload;

use crate::{ApiError, AppState};

/// The authenticated caller's user id, taken from `Authorization: Bearer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser(pub String);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(ApiError::MissingAuthentication)?;

        let user_id = state.tokens.decode_user_id(token)?;
        Ok(AuthUser(user_id))
    }
}

/// Parses a request body into a [`Payload`]. An empty body is an empty
/// payload so that field validation reports what is missing.
pub fn parse_body(body: &Bytes) -> Result<Payload, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Payload::new());
    }
    serde_json::from_slice(body)
        .map(Payload::from_value)
        .map_err(|_| ApiError::MalformedBody)
}
