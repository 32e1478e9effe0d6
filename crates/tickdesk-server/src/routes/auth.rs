//! Login and current-user endpoints.

use axum::Json;
use axum::extract::State;
use tickdesk_auth::LoginInput;
use tickdesk_core::TickdeskError;

use crate::dto::{LoginRequest, LoginResponse, MeResponse, UserDto};
use crate::error::{ApiError, ApiResult};
use crate::extract::CurrentUser;
use crate::state::AppState;

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let output = state
        .auth
        .login(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await
        .map_err(|err| match err {
            TickdeskError::Unauthorized { .. } => ApiError::BadCredentials,
            other => other.into(),
        })?;

    Ok(Json(LoginResponse {
        token: output.token,
        user: output.user.into(),
    }))
}

/// `GET /api/auth/me`
pub async fn me(CurrentUser(user): CurrentUser) -> Json<MeResponse> {
    Json(MeResponse {
        user: UserDto::from(user),
    })
}
