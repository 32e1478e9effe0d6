//! SurrealDB implementation of [`TicketRepository`].
//!
//! Tickets embed their comment sequence; a comment append is a single
//! atomic document write (`comments += $comment`). `updated_at` is
//! advanced on every mutation.

use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tickdesk_core::error::TickdeskResult;
use tickdesk_core::models::ticket::{Comment, CreateTicket, Priority, Status, Ticket, TicketUpdate};
use tickdesk_core::policy::TicketScope;
use tickdesk_core::repository::TicketRepository;
use uuid::Uuid;

use crate::error::DbError;

/// Embedded comment as stored in the ticket document.
#[derive(Debug, Clone, SurrealValue)]
struct CommentRow {
    user: String,
    user_name: String,
    user_role: String,
    text: String,
    created_at: DateTime<Utc>,
}

impl CommentRow {
    fn from_comment(comment: &Comment) -> Self {
        Self {
            user: comment.user.to_string(),
            user_name: comment.user_name.clone(),
            user_role: comment.user_role.as_str().to_string(),
            text: comment.text.clone(),
            created_at: comment.created_at,
        }
    }

    fn try_into_comment(self) -> Result<Comment, DbError> {
        Ok(Comment {
            user: Uuid::parse_str(&self.user)
                .map_err(|e| DbError::Decode(format!("invalid comment author UUID: {e}")))?,
            user_name: self.user_name,
            user_role: self.user_role.parse().map_err(DbError::Decode)?,
            text: self.text,
            created_at: self.created_at,
        })
    }
}

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct TicketRow {
    subject: String,
    description: String,
    priority: String,
    status: String,
    created_by: String,
    assigned_to: Option<String>,
    comments: Vec<CommentRow>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct TicketRowWithId {
    record_id: String,
    subject: String,
    description: String,
    priority: String,
    status: String,
    created_by: String,
    assigned_to: Option<String>,
    comments: Vec<CommentRow>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_uuid(field: &str, s: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(s).map_err(|e| DbError::Decode(format!("invalid {field} UUID: {e}")))
}

impl TicketRow {
    fn into_ticket(self, id: Uuid) -> Result<Ticket, DbError> {
        Ok(Ticket {
            id,
            subject: self.subject,
            description: self.description,
            priority: self.priority.parse::<Priority>().map_err(DbError::Decode)?,
            status: self.status.parse::<Status>().map_err(DbError::Decode)?,
            created_by: parse_uuid("created_by", &self.created_by)?,
            assigned_to: self
                .assigned_to
                .as_deref()
                .map(|s| parse_uuid("assigned_to", s))
                .transpose()?,
            comments: self
                .comments
                .into_iter()
                .map(CommentRow::try_into_comment)
                .collect::<Result<Vec<_>, DbError>>()?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl TicketRowWithId {
    fn try_into_ticket(self) -> Result<Ticket, DbError> {
        let id = parse_uuid("record", &self.record_id)?;
        let row = TicketRow {
            subject: self.subject,
            description: self.description,
            priority: self.priority,
            status: self.status,
            created_by: self.created_by,
            assigned_to: self.assigned_to,
            comments: self.comments,
            created_at: self.created_at,
            updated_at: self.updated_at,
        };
        row.into_ticket(id)
    }
}

/// SurrealDB implementation of the Ticket repository.
#[derive(Clone)]
pub struct SurrealTicketRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealTicketRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    fn rows_into_tickets(rows: Vec<TicketRowWithId>) -> Result<Vec<Ticket>, DbError> {
        rows.into_iter()
            .map(TicketRowWithId::try_into_ticket)
            .collect()
    }
}

impl<C: Connection> TicketRepository for SurrealTicketRepository<C> {
    async fn create(&self, input: CreateTicket) -> TickdeskResult<Ticket> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let priority = input.priority.unwrap_or(Priority::Medium);

        let result = self
            .db
            .query(
                "CREATE type::record('ticket', $id) SET \
                 subject = $subject, \
                 description = $description, \
                 priority = $priority, \
                 status = 'open', \
                 created_by = $created_by, \
                 assigned_to = NONE, \
                 comments = []",
            )
            .bind(("id", id_str.clone()))
            .bind(("subject", input.subject))
            .bind(("description", input.description))
            .bind(("priority", priority.as_str().to_string()))
            .bind(("created_by", input.created_by.to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<TicketRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "ticket".into(),
            id: id_str,
        })?;

        Ok(row.into_ticket(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> TickdeskResult<Ticket> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('ticket', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TicketRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "ticket".into(),
            id: id_str,
        })?;

        Ok(row.into_ticket(id)?)
    }

    async fn update(&self, id: Uuid, input: TicketUpdate) -> TickdeskResult<Ticket> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.status.is_some() {
            sets.push("status = $status");
        }
        if input.assigned_to.is_some() {
            sets.push("assigned_to = $assigned_to");
        }
        sets.push("updated_at = time::now()");

        let query = format!("UPDATE type::record('ticket', $id) SET {}", sets.join(", "));

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(status) = input.status {
            builder = builder.bind(("status", status.as_str().to_string()));
        }
        if let Some(assigned_to) = input.assigned_to {
            // assigned_to is Option<Option<Uuid>>: Some(Some(v)) = set,
            // Some(None) = clear.
            builder = builder.bind(("assigned_to", assigned_to.map(|u| u.to_string())));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<TicketRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "ticket".into(),
            id: id_str,
        })?;

        Ok(row.into_ticket(id)?)
    }

    async fn add_comment(&self, id: Uuid, comment: Comment) -> TickdeskResult<Ticket> {
        let id_str = id.to_string();
        let row = CommentRow::from_comment(&comment);

        let mut result = self
            .db
            .query(
                "UPDATE type::record('ticket', $id) SET \
                 comments += $comment, updated_at = time::now()",
            )
            .bind(("id", id_str.clone()))
            .bind(("comment", row))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TicketRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "ticket".into(),
            id: id_str,
        })?;

        Ok(row.into_ticket(id)?)
    }

    async fn list(&self, scope: TicketScope) -> TickdeskResult<Vec<Ticket>> {
        // The WHERE clauses here must stay in lockstep with
        // `TicketScope::permits`.
        let mut result = match scope {
            TicketScope::All => self
                .db
                .query(
                    "SELECT meta::id(id) AS record_id, * FROM ticket \
                     ORDER BY created_at DESC",
                )
                .await
                .map_err(DbError::from)?,
            TicketScope::AgentQueue(agent) => self
                .db
                .query(
                    "SELECT meta::id(id) AS record_id, * FROM ticket \
                     WHERE assigned_to = $agent OR status = 'open' \
                     ORDER BY created_at DESC",
                )
                .bind(("agent", agent.to_string()))
                .await
                .map_err(DbError::from)?,
            TicketScope::CreatedBy(user) => self
                .db
                .query(
                    "SELECT meta::id(id) AS record_id, * FROM ticket \
                     WHERE created_by = $user \
                     ORDER BY created_at DESC",
                )
                .bind(("user", user.to_string()))
                .await
                .map_err(DbError::from)?,
        };

        let rows: Vec<TicketRowWithId> = result.take(0).map_err(DbError::from)?;
        Ok(Self::rows_into_tickets(rows)?)
    }

    async fn list_created_between(
        &self,
        from: Option<DateTime<Utc>>,
        to: DateTime<Utc>,
    ) -> TickdeskResult<Vec<Ticket>> {
        let mut result = match from {
            Some(from) => self
                .db
                .query(
                    "SELECT meta::id(id) AS record_id, * FROM ticket \
                     WHERE created_at >= $from AND created_at <= $to \
                     ORDER BY created_at DESC",
                )
                .bind(("from", from))
                .bind(("to", to))
                .await
                .map_err(DbError::from)?,
            None => self
                .db
                .query(
                    "SELECT meta::id(id) AS record_id, * FROM ticket \
                     WHERE created_at <= $to \
                     ORDER BY created_at DESC",
                )
                .bind(("to", to))
                .await
                .map_err(DbError::from)?,
        };

        let rows: Vec<TicketRowWithId> = result.take(0).map_err(DbError::from)?;
        Ok(Self::rows_into_tickets(rows)?)
    }
}
