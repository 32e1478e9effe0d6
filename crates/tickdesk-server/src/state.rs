//! Shared application state.

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::any::Any;
use tickdesk_auth::{AuthConfig, AuthService};
use tickdesk_db::repository::{SurrealTicketRepository, SurrealUserRepository};
use tickdesk_tickets::TicketService;

pub type UserRepo = SurrealUserRepository<Any>;
pub type TicketRepo = SurrealTicketRepository<Any>;

/// Per-process state handed to every handler. Everything inside is
/// cheap to clone; there is no cross-request mutable state here — the
/// document store holds all of it.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService<UserRepo>>,
    pub tickets: Arc<TicketService<TicketRepo, UserRepo>>,
    /// Direct repository handles for user management and analytics.
    pub users: UserRepo,
    pub ticket_repo: TicketRepo,
}

impl AppState {
    pub fn new(db: Surreal<Any>, auth_config: AuthConfig) -> Self {
        let users = match &auth_config.pepper {
            Some(pepper) => SurrealUserRepository::with_pepper(db.clone(), pepper.clone()),
            None => SurrealUserRepository::new(db.clone()),
        };
        let ticket_repo = SurrealTicketRepository::new(db);

        Self {
            auth: Arc::new(AuthService::new(users.clone(), auth_config)),
            tickets: Arc::new(TicketService::new(ticket_repo.clone(), users.clone())),
            users,
            ticket_repo,
        }
    }
}
