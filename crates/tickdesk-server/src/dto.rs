//! Wire types for the JSON API.
//!
//! Field names are camelCase to match what the shipped clients expect;
//! enum values stay snake_case (`in_progress`, `support_agent`). The
//! password hash never appears in any response type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tickdesk_core::models::ticket::{Comment, PopulatedTicket, Priority, Status};
use tickdesk_core::models::user::{Role, User, UserSummary};
use uuid::Uuid;

// -----------------------------------------------------------------------
// Responses
// -----------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            last_login: user.last_login,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    pub user: Uuid,
    pub user_name: String,
    pub user_role: Role,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentDto {
    fn from(comment: Comment) -> Self {
        Self {
            user: comment.user,
            user_name: comment.user_name,
            user_role: comment.user_role,
            text: comment.text,
            created_at: comment.created_at,
        }
    }
}

/// A ticket with `createdBy`/`assignedTo` resolved to user summaries;
/// `null` where the reference dangles or the ticket is unassigned.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketDto {
    pub id: Uuid,
    pub subject: String,
    pub description: String,
    pub priority: Priority,
    pub status: Status,
    pub created_by: Option<UserSummary>,
    pub assigned_to: Option<UserSummary>,
    pub comments: Vec<CommentDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PopulatedTicket> for TicketDto {
    fn from(populated: PopulatedTicket) -> Self {
        let ticket = populated.ticket;
        Self {
            id: ticket.id,
            subject: ticket.subject,
            description: ticket.description,
            priority: ticket.priority,
            status: ticket.status,
            created_by: populated.created_by,
            assigned_to: populated.assigned_to,
            comments: ticket.comments.into_iter().map(CommentDto::from).collect(),
            created_at: ticket.created_at,
            updated_at: ticket.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserDto,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: UserDto,
}

// -----------------------------------------------------------------------
// Requests
// -----------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateTicketRequest {
    pub subject: String,
    pub description: String,
    pub priority: Option<Priority>,
}

/// `PUT /api/tickets/:id` body. `assignedTo` distinguishes an absent
/// field (leave as-is) from an explicit `null` (clear the assignment).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTicketRequest {
    pub status: Option<Status>,
    #[serde(default, deserialize_with = "double_option")]
    pub assigned_to: Option<Option<Uuid>>,
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Deserialize)]
pub struct AnalyticsQuery {
    pub period: Option<String>,
}

/// Deserialize a present-but-possibly-null field into `Some(inner)`,
/// leaving `None` for the absent case (paired with `#[serde(default)]`).
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_assigned_to_is_no_change() {
        let req: UpdateTicketRequest = serde_json::from_str(r#"{"status":"closed"}"#).unwrap();
        assert_eq!(req.status, Some(Status::Closed));
        assert!(req.assigned_to.is_none());
    }

    #[test]
    fn null_assigned_to_clears() {
        let req: UpdateTicketRequest = serde_json::from_str(r#"{"assignedTo":null}"#).unwrap();
        assert_eq!(req.assigned_to, Some(None));
    }

    #[test]
    fn uuid_assigned_to_sets() {
        let id = Uuid::new_v4();
        let req: UpdateTicketRequest =
            serde_json::from_str(&format!(r#"{{"assignedTo":"{id}"}}"#)).unwrap();
        assert_eq!(req.assigned_to, Some(Some(id)));
    }
}
