//! Unified error handling for the API surface.
//!
//! Route handlers return `Result<T, ApiError>`; the `IntoResponse`
//! impl maps the domain taxonomy onto HTTP statuses. Server-side
//! failures are logged in full and answered with a generic message —
//! internal detail never reaches the client.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tickdesk_core::error::TickdeskError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] TickdeskError),

    /// Login with a bad email/password pair. Reported as 400 — the
    /// contract the shipped clients rely on — unlike token failures on
    /// protected routes, which are 401.
    #[error("invalid credentials")]
    BadCredentials,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadCredentials => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": "Invalid credentials" })),
            )
                .into_response(),

            ApiError::Domain(err) => {
                let (status, body) = match &err {
                    TickdeskError::Validation { field, message } => (
                        StatusCode::BAD_REQUEST,
                        json!({ "errors": [{ "field": field, "message": message }] }),
                    ),
                    TickdeskError::AlreadyExists { entity } => (
                        StatusCode::BAD_REQUEST,
                        json!({ "message": format!("{entity} already exists") }),
                    ),
                    TickdeskError::Unauthorized { .. } => (
                        StatusCode::UNAUTHORIZED,
                        json!({ "message": "Token is not valid" }),
                    ),
                    TickdeskError::Forbidden { .. } => {
                        (StatusCode::FORBIDDEN, json!({ "message": "Access denied" }))
                    }
                    TickdeskError::NotFound { entity, .. } => (
                        StatusCode::NOT_FOUND,
                        json!({ "message": format!("{entity} not found") }),
                    ),
                    TickdeskError::Database(_)
                    | TickdeskError::Crypto(_)
                    | TickdeskError::Internal(_) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        json!({ "message": "Server error" }),
                    ),
                };

                if status == StatusCode::INTERNAL_SERVER_ERROR {
                    tracing::error!(error = %err, "request failed");
                } else {
                    tracing::debug!(error = %err, status = %status, "request rejected");
                }

                (status, Json(body)).into_response()
            }
        }
    }
}

/// Result type alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn taxonomy_maps_to_expected_statuses() {
        assert_eq!(
            status_of(TickdeskError::validation("subject", "required").into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(
                TickdeskError::Unauthorized {
                    reason: "expired".into()
                }
                .into()
            ),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(TickdeskError::forbidden("scope").into()),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(
                TickdeskError::NotFound {
                    entity: "ticket".into(),
                    id: "x".into()
                }
                .into()
            ),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(TickdeskError::Database("boom".into()).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(status_of(ApiError::BadCredentials), StatusCode::BAD_REQUEST);
    }
}
