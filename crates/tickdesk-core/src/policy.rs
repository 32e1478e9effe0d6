//! Authorization policy — pure decision tables over roles and actions.
//!
//! Every table is an exhaustive `match`, so adding a role or an action
//! refuses to compile until each combination has an explicit decision.
//! Nothing here touches the store; callers load the resource first and
//! ask the policy afterwards.

use uuid::Uuid;

use crate::models::ticket::{Status, Ticket};
use crate::models::user::Role;

/// The mutations and reads a caller can attempt on a single ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketAction {
    View,
    Comment,
    ChangeStatus,
    Reassign,
}

/// Decide whether `actor` (holding `role`) may perform `action` on
/// `ticket`.
///
/// Support agents operate on their queue: tickets assigned to them, or
/// open tickets nobody has picked up yet. Regular users are confined to
/// tickets they created and may never touch assignment.
pub fn can_act_on_ticket(role: Role, actor: Uuid, action: TicketAction, ticket: &Ticket) -> bool {
    match (role, action) {
        (Role::Admin, _) => true,

        (
            Role::SupportAgent,
            TicketAction::View
            | TicketAction::Comment
            | TicketAction::ChangeStatus
            | TicketAction::Reassign,
        ) => in_agent_queue(actor, ticket),

        (Role::User, TicketAction::View | TicketAction::Comment | TicketAction::ChangeStatus) => {
            ticket.created_by == actor
        }
        (Role::User, TicketAction::Reassign) => false,
    }
}

fn in_agent_queue(actor: Uuid, ticket: &Ticket) -> bool {
    match ticket.assigned_to {
        Some(assignee) => assignee == actor,
        None => ticket.status == Status::Open,
    }
}

/// The slice of the ticket collection a caller is allowed to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketScope {
    /// Every ticket.
    All,
    /// Tickets assigned to this agent, plus every open ticket.
    AgentQueue(Uuid),
    /// Tickets this user created.
    CreatedBy(Uuid),
}

impl TicketScope {
    /// Pure membership predicate; the repository's query filters must
    /// agree with this exactly (the list property test holds both to it).
    pub fn permits(&self, ticket: &Ticket) -> bool {
        match self {
            TicketScope::All => true,
            TicketScope::AgentQueue(agent) => {
                ticket.assigned_to == Some(*agent) || ticket.status == Status::Open
            }
            TicketScope::CreatedBy(user) => ticket.created_by == *user,
        }
    }
}

/// Which scope a `list` call resolves to for the given caller.
pub fn list_scope(role: Role, actor: Uuid) -> TicketScope {
    match role {
        Role::Admin => TicketScope::All,
        Role::SupportAgent => TicketScope::AgentQueue(actor),
        Role::User => TicketScope::CreatedBy(actor),
    }
}

/// Route-level gate: user management is admin-only.
pub fn can_manage_users(role: Role) -> bool {
    match role {
        Role::Admin => true,
        Role::SupportAgent | Role::User => false,
    }
}

/// Route-level gate: analytics are for staff.
pub fn can_view_analytics(role: Role) -> bool {
    match role {
        Role::Admin | Role::SupportAgent => true,
        Role::User => false,
    }
}
