//! Ticket service — lifecycle and mutation rules.

use chrono::Utc;
use std::collections::HashMap;
use tickdesk_core::error::{TickdeskError, TickdeskResult};
use tickdesk_core::models::ticket::{
    Comment, CreateTicket, PopulatedTicket, Priority, Ticket, TicketUpdate,
};
use tickdesk_core::models::user::{Role, User, UserSummary};
use tickdesk_core::policy::{self, TicketAction};
use tickdesk_core::repository::{TicketRepository, UserRepository};
use uuid::Uuid;

/// Input for ticket creation. The creator and the initial status are
/// never caller-supplied.
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub subject: String,
    pub description: String,
    pub priority: Option<Priority>,
}

/// Ticket service.
///
/// Generic over repository implementations so that the domain layer
/// has no dependency on the database crate.
pub struct TicketService<T: TicketRepository, U: UserRepository> {
    tickets: T,
    users: U,
}

impl<T: TicketRepository, U: UserRepository> TicketService<T, U> {
    pub fn new(tickets: T, users: U) -> Self {
        Self { tickets, users }
    }

    /// Create a ticket on behalf of `actor`: status `open`, unassigned,
    /// `created_by` pinned to the actor forever.
    pub async fn create(&self, actor: &User, input: NewTicket) -> TickdeskResult<PopulatedTicket> {
        if input.subject.is_empty() {
            return Err(TickdeskError::validation("subject", "subject is required"));
        }
        if input.description.is_empty() {
            return Err(TickdeskError::validation(
                "description",
                "description is required",
            ));
        }

        let ticket = self
            .tickets
            .create(CreateTicket {
                subject: input.subject,
                description: input.description,
                priority: input.priority,
                created_by: actor.id,
            })
            .await?;

        tracing::info!(ticket_id = %ticket.id, user_id = %actor.id, "ticket created");

        self.populate_one(ticket).await
    }

    /// Apply a status change and/or reassignment.
    ///
    /// Both fields are checked against the policy before anything is
    /// written, so a half-permitted update mutates nothing. Status may
    /// move between any two values — there is deliberately no
    /// transition graph.
    pub async fn update(
        &self,
        actor: &User,
        ticket_id: Uuid,
        update: TicketUpdate,
    ) -> TickdeskResult<PopulatedTicket> {
        let ticket = self.tickets.get_by_id(ticket_id).await?;

        if !policy::can_act_on_ticket(actor.role, actor.id, TicketAction::View, &ticket) {
            return Err(TickdeskError::forbidden("ticket is outside caller scope"));
        }

        if update.status.is_some()
            && !policy::can_act_on_ticket(actor.role, actor.id, TicketAction::ChangeStatus, &ticket)
        {
            return Err(TickdeskError::forbidden("status change not permitted"));
        }

        if let Some(assignment) = update.assigned_to {
            if !policy::can_act_on_ticket(actor.role, actor.id, TicketAction::Reassign, &ticket) {
                return Err(TickdeskError::forbidden("reassignment not permitted"));
            }
            if let Some(assignee) = assignment {
                self.ensure_support_agent(assignee).await?;
            }
        }

        if update.is_empty() {
            return self.populate_one(ticket).await;
        }

        let updated = self.tickets.update(ticket_id, update).await?;
        tracing::info!(ticket_id = %ticket_id, user_id = %actor.id, "ticket updated");

        self.populate_one(updated).await
    }

    /// Append a comment snapshotting the actor's current name and role.
    pub async fn add_comment(
        &self,
        actor: &User,
        ticket_id: Uuid,
        text: &str,
    ) -> TickdeskResult<PopulatedTicket> {
        if text.is_empty() {
            return Err(TickdeskError::validation("text", "comment text is required"));
        }

        let ticket = self.tickets.get_by_id(ticket_id).await?;

        if !policy::can_act_on_ticket(actor.role, actor.id, TicketAction::Comment, &ticket) {
            return Err(TickdeskError::forbidden("commenting not permitted"));
        }

        let comment = Comment {
            user: actor.id,
            user_name: actor.name.clone(),
            user_role: actor.role,
            text: text.to_string(),
            created_at: Utc::now(),
        };

        let updated = self.tickets.add_comment(ticket_id, comment).await?;
        self.populate_one(updated).await
    }

    /// List the tickets the actor may see, newest-created first.
    pub async fn list(&self, actor: &User) -> TickdeskResult<Vec<PopulatedTicket>> {
        let scope = policy::list_scope(actor.role, actor.id);
        let tickets = self.tickets.list(scope).await?;
        self.populate(tickets).await
    }

    /// Reject assignment to anyone who is not an existing support
    /// agent. (The store itself accepts any string here.)
    async fn ensure_support_agent(&self, assignee: Uuid) -> TickdeskResult<()> {
        let user = match self.users.get_by_id(assignee).await {
            Ok(user) => user,
            Err(TickdeskError::NotFound { .. }) => {
                return Err(TickdeskError::validation(
                    "assignedTo",
                    "assignee must be an existing support agent",
                ));
            }
            Err(e) => return Err(e),
        };

        if user.role != Role::SupportAgent {
            return Err(TickdeskError::validation(
                "assignedTo",
                "assignee must be an existing support agent",
            ));
        }

        Ok(())
    }

    /// Resolve `created_by`/`assigned_to` for a batch of tickets with a
    /// single user fetch. Dangling references resolve to `None`.
    async fn populate(&self, tickets: Vec<Ticket>) -> TickdeskResult<Vec<PopulatedTicket>> {
        let users = self.users.list().await?;
        let summaries: HashMap<Uuid, UserSummary> = users
            .iter()
            .map(|user| (user.id, UserSummary::from(user)))
            .collect();

        Ok(tickets
            .into_iter()
            .map(|ticket| {
                let created_by = summaries.get(&ticket.created_by).cloned();
                let assigned_to = ticket
                    .assigned_to
                    .and_then(|id| summaries.get(&id).cloned());
                PopulatedTicket {
                    ticket,
                    created_by,
                    assigned_to,
                }
            })
            .collect())
    }

    async fn populate_one(&self, ticket: Ticket) -> TickdeskResult<PopulatedTicket> {
        let created_by = self.resolve_summary(ticket.created_by).await?;
        let assigned_to = match ticket.assigned_to {
            Some(id) => self.resolve_summary(id).await?,
            None => None,
        };
        Ok(PopulatedTicket {
            ticket,
            created_by,
            assigned_to,
        })
    }

    async fn resolve_summary(&self, id: Uuid) -> TickdeskResult<Option<UserSummary>> {
        match self.users.get_by_id(id).await {
            Ok(user) => Ok(Some(UserSummary::from(&user))),
            Err(TickdeskError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
