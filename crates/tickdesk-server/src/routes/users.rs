//! User management endpoints — admin only.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::{Value, json};
use tickdesk_core::TickdeskError;
use tickdesk_core::models::user::CreateUser;
use tickdesk_core::policy;
use tickdesk_core::repository::UserRepository;
use uuid::Uuid;

use crate::dto::{CreateUserRequest, UserDto};
use crate::error::ApiResult;
use crate::extract::CurrentUser;
use crate::state::AppState;

/// `GET /api/users`
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
) -> ApiResult<Json<Vec<UserDto>>> {
    if !policy::can_manage_users(caller.role) {
        return Err(TickdeskError::forbidden("user management is admin-only").into());
    }

    let users = state.users.list().await?;
    Ok(Json(users.into_iter().map(UserDto::from).collect()))
}

/// `POST /api/users`
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<UserDto>)> {
    if !policy::can_manage_users(caller.role) {
        return Err(TickdeskError::forbidden("user management is admin-only").into());
    }

    if req.name.is_empty() {
        return Err(TickdeskError::validation("name", "name is required").into());
    }
    if req.email.is_empty() || !req.email.contains('@') {
        return Err(TickdeskError::validation("email", "a valid email is required").into());
    }
    let min_len = state.auth.config().min_password_length;
    if req.password.len() < min_len {
        return Err(TickdeskError::validation(
            "password",
            &format!("password must be at least {min_len} characters"),
        )
        .into());
    }

    // Surface duplicates as a client error; the unique index remains
    // the backstop for the race between check and insert.
    match state.users.get_by_email(&req.email).await {
        Ok(_) => {
            return Err(TickdeskError::AlreadyExists {
                entity: "user".into(),
            }
            .into());
        }
        Err(TickdeskError::NotFound { .. }) => {}
        Err(other) => return Err(other.into()),
    }

    let user = state
        .users
        .create(CreateUser {
            name: req.name,
            email: req.email,
            password: req.password,
            role: req.role,
        })
        .await?;

    tracing::info!(user_id = %user.id, role = %user.role, "user created");

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// `DELETE /api/users/:id`
///
/// Hard delete. Tickets referencing the user keep their ids; those
/// references resolve to `null` from now on.
pub async fn remove(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Value>> {
    if !policy::can_manage_users(caller.role) {
        return Err(TickdeskError::forbidden("user management is admin-only").into());
    }

    state.users.delete(id).await?;
    tracing::info!(user_id = %id, "user deleted");

    Ok(Json(json!({ "message": "User deleted" })))
}
