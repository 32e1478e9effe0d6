//! Ticket domain model.
//!
//! A ticket owns its comment sequence (embedded, same lifetime). The
//! `created_by`/`assigned_to` fields are non-owning references to users —
//! deleting a user does not touch the tickets that mention them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::{Role, UserSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Open => "open",
            Status::InProgress => "in_progress",
            Status::Resolved => "resolved",
            Status::Closed => "closed",
        }
    }

    /// Resolved and closed tickets both count as settled for analytics.
    pub fn is_settled(&self) -> bool {
        matches!(self, Status::Resolved | Status::Closed)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Status::Open),
            "in_progress" => Ok(Status::InProgress),
            "resolved" => Ok(Status::Resolved),
            "closed" => Ok(Status::Closed),
            other => Err(format!("unknown status: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}

/// A comment embedded in a ticket. Immutable once appended.
///
/// `user_name` and `user_role` are a snapshot of the author at comment
/// time — later profile edits do not rewrite comment history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub user: Uuid,
    pub user_name: String,
    pub user_role: Role,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: Uuid,
    pub subject: String,
    pub description: String,
    pub priority: Priority,
    pub status: Status,
    /// Set once at creation to the requesting user; never changes.
    pub created_by: Uuid,
    pub assigned_to: Option<Uuid>,
    /// Append-only; entries are never edited or removed.
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for ticket creation. Status is always `open` and assignment is
/// always empty on a fresh ticket, so neither is accepted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTicket {
    pub subject: String,
    pub description: String,
    pub priority: Option<Priority>,
    pub created_by: Uuid,
}

/// Partial update of the two externally mutable fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TicketUpdate {
    pub status: Option<Status>,
    /// `Some(Some(agent))` = assign, `Some(None)` = clear, `None` = no change.
    pub assigned_to: Option<Option<Uuid>>,
}

impl TicketUpdate {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.assigned_to.is_none()
    }
}

/// A ticket with its user references resolved to embedded summaries.
///
/// A `None` summary means the reference dangles (the user was deleted);
/// it serializes as `null`, matching the store's populate semantics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulatedTicket {
    pub ticket: Ticket,
    pub created_by: Option<UserSummary>,
    pub assigned_to: Option<UserSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_str() {
        for status in [
            Status::Open,
            Status::InProgress,
            Status::Resolved,
            Status::Closed,
        ] {
            assert_eq!(status.as_str().parse::<Status>().unwrap(), status);
        }
    }

    #[test]
    fn settled_statuses() {
        assert!(Status::Resolved.is_settled());
        assert!(Status::Closed.is_settled());
        assert!(!Status::Open.is_settled());
        assert!(!Status::InProgress.is_settled());
    }

    #[test]
    fn priority_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
        assert_eq!(
            serde_json::to_string(&Status::InProgress).unwrap(),
            "\"in_progress\""
        );
    }

    #[test]
    fn empty_update_is_detected() {
        assert!(TicketUpdate::default().is_empty());
        assert!(
            !TicketUpdate {
                status: Some(Status::Closed),
                assigned_to: None,
            }
            .is_empty()
        );
    }
}
