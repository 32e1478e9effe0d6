//! Development seed routine.
//!
//! Mirrors the well-known demo accounts: one admin, two support agents,
//! two regular users. Clears the user collection first, so it is only
//! meant for fresh or throwaway databases.

use tickdesk_core::TickdeskResult;
use tickdesk_core::models::user::{CreateUser, Role};
use tickdesk_core::repository::UserRepository;
use tracing::info;

const SEED_USERS: &[(&str, &str, &str, Role)] = &[
    ("Admin User", "admin@ticketsystem.com", "admin123", Role::Admin),
    (
        "Support Agent 1",
        "agent1@ticketsystem.com",
        "agent123",
        Role::SupportAgent,
    ),
    (
        "Support Agent 2",
        "agent2@ticketsystem.com",
        "agent123",
        Role::SupportAgent,
    ),
    (
        "Regular User 1",
        "user1@ticketsystem.com",
        "user123",
        Role::User,
    ),
    (
        "Regular User 2",
        "user2@ticketsystem.com",
        "user123",
        Role::User,
    ),
];

/// Replace the user collection with the seed accounts.
pub async fn seed_users<U: UserRepository>(users: &U) -> TickdeskResult<()> {
    let existing = users.list().await?;
    for user in existing {
        users.delete(user.id).await?;
    }
    info!("cleared existing users");

    for (name, email, password, role) in SEED_USERS {
        let user = users
            .create(CreateUser {
                name: (*name).to_string(),
                email: (*email).to_string(),
                password: (*password).to_string(),
                role: *role,
            })
            .await?;
        info!(email = %user.email, role = %user.role, "created user");
    }

    info!("user seeding completed");
    Ok(())
}
