//! Ticket endpoints. All of the actual rules live in the ticket
//! service; these handlers only translate between wire types and the
//! domain.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tickdesk_core::models::ticket::TicketUpdate;
use tickdesk_tickets::NewTicket;
use uuid::Uuid;

use crate::dto::{CommentRequest, CreateTicketRequest, TicketDto, UpdateTicketRequest};
use crate::error::ApiResult;
use crate::extract::CurrentUser;
use crate::state::AppState;

/// `GET /api/tickets` — role-filtered, newest first.
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Vec<TicketDto>>> {
    let tickets = state.tickets.list(&user).await?;
    Ok(Json(tickets.into_iter().map(TicketDto::from).collect()))
}

/// `POST /api/tickets`
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<CreateTicketRequest>,
) -> ApiResult<(StatusCode, Json<TicketDto>)> {
    let created = state
        .tickets
        .create(
            &user,
            NewTicket {
                subject: req.subject,
                description: req.description,
                priority: req.priority,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// `PUT /api/tickets/:id` — status change and/or reassignment.
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTicketRequest>,
) -> ApiResult<Json<TicketDto>> {
    let updated = state
        .tickets
        .update(
            &user,
            id,
            TicketUpdate {
                status: req.status,
                assigned_to: req.assigned_to,
            },
        )
        .await?;

    Ok(Json(updated.into()))
}

/// `POST /api/tickets/:id/comments`
pub async fn add_comment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<CommentRequest>,
) -> ApiResult<Json<TicketDto>> {
    let updated = state.tickets.add_comment(&user, id, &req.text).await?;
    Ok(Json(updated.into()))
}
