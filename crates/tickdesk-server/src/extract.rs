//! Request extractors.
//!
//! Identity travels with each request as a bearer token and is resolved
//! here, per request — there is no ambient or process-wide credential
//! state anywhere in the server.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tickdesk_core::TickdeskError;
use tickdesk_core::models::user::User;

use crate::error::ApiError;
use crate::state::AppState;

/// Extractor that requires a valid bearer token.
///
/// Verifies the token and loads the current user from the store, so
/// handlers always see the user's present role — not the one they had
/// when the token was minted.
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| unauthorized("no token, authorization denied"))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| unauthorized("malformed authorization header"))?;

        let user = state.auth.authenticate(token).await?;
        Ok(Self(user))
    }
}

fn unauthorized(reason: &str) -> ApiError {
    TickdeskError::Unauthorized {
        reason: reason.into(),
    }
    .into()
}
