//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. The document store assigns ids,
//! maintains `created_at`/`updated_at`, and provides per-document atomic
//! writes; no multi-document transactions are assumed.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::TickdeskResult;
use crate::models::ticket::{Comment, CreateTicket, Ticket, TicketUpdate};
use crate::models::user::{CreateUser, Role, User};
use crate::policy::TicketScope;

pub trait UserRepository: Send + Sync {
    /// Create a user. The raw password in the input is hashed before
    /// storage; the unique-email index is the backstop against
    /// duplicate identities.
    fn create(&self, input: CreateUser) -> impl Future<Output = TickdeskResult<User>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = TickdeskResult<User>> + Send;
    fn get_by_email(&self, email: &str) -> impl Future<Output = TickdeskResult<User>> + Send;
    fn list(&self) -> impl Future<Output = TickdeskResult<Vec<User>>> + Send;
    fn list_by_role(&self, role: Role) -> impl Future<Output = TickdeskResult<Vec<User>>> + Send;
    /// Stamp a successful login.
    fn record_login(
        &self,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> impl Future<Output = TickdeskResult<()>> + Send;
    /// Hard delete. Tickets referencing the user are left untouched;
    /// their references resolve to nothing from then on.
    fn delete(&self, id: Uuid) -> impl Future<Output = TickdeskResult<()>> + Send;
}

pub trait TicketRepository: Send + Sync {
    fn create(&self, input: CreateTicket) -> impl Future<Output = TickdeskResult<Ticket>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = TickdeskResult<Ticket>> + Send;
    /// Apply a partial update; the store advances `updated_at`.
    fn update(
        &self,
        id: Uuid,
        input: TicketUpdate,
    ) -> impl Future<Output = TickdeskResult<Ticket>> + Send;
    /// Append a comment. Comments are never edited or removed.
    fn add_comment(
        &self,
        id: Uuid,
        comment: Comment,
    ) -> impl Future<Output = TickdeskResult<Ticket>> + Send;
    /// Tickets visible under the scope, newest-created first. The
    /// store-side filter must match [`TicketScope::permits`].
    fn list(&self, scope: TicketScope) -> impl Future<Output = TickdeskResult<Vec<Ticket>>> + Send;
    /// Tickets created inside a trailing window (`from` unset = all
    /// time), for the analytics aggregator.
    fn list_created_between(
        &self,
        from: Option<DateTime<Utc>>,
        to: DateTime<Utc>,
    ) -> impl Future<Output = TickdeskResult<Vec<Ticket>>> + Send;
}
