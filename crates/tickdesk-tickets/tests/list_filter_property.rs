//! Property test: for every role, `list` returns exactly the tickets
//! permitted by the scope predicate, over a randomly generated ticket
//! population.

use std::collections::BTreeSet;

use rand::Rng;
use rand::seq::IndexedRandom;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use tickdesk_core::models::ticket::{CreateTicket, Status, TicketUpdate};
use tickdesk_core::models::user::{CreateUser, Role, User};
use tickdesk_core::policy;
use tickdesk_core::repository::{TicketRepository, UserRepository};
use tickdesk_db::repository::{SurrealTicketRepository, SurrealUserRepository};
use tickdesk_tickets::{NewTicket, TicketService};
use uuid::Uuid;

const TICKET_COUNT: usize = 40;

#[tokio::test]
async fn list_matches_scope_predicate_for_every_role() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    tickdesk_db::run_migrations(&db).await.unwrap();

    let users = SurrealUserRepository::new(db.clone());
    let tickets = SurrealTicketRepository::new(db.clone());

    let mut cast: Vec<User> = Vec::new();
    for (i, role) in [
        Role::Admin,
        Role::SupportAgent,
        Role::SupportAgent,
        Role::User,
        Role::User,
        Role::User,
    ]
    .into_iter()
    .enumerate()
    {
        cast.push(
            users
                .create(CreateUser {
                    name: format!("Member {i}"),
                    email: format!("member{i}@example.com"),
                    password: "password1".into(),
                    role,
                })
                .await
                .unwrap(),
        );
    }
    let agents: Vec<Uuid> = cast
        .iter()
        .filter(|u| u.role == Role::SupportAgent)
        .map(|u| u.id)
        .collect();
    let creators: Vec<Uuid> = cast
        .iter()
        .filter(|u| u.role == Role::User)
        .map(|u| u.id)
        .collect();

    // Random population: varied creator, status and assignment.
    let mut rng = rand::rng();
    let statuses = [
        Status::Open,
        Status::InProgress,
        Status::Resolved,
        Status::Closed,
    ];
    for i in 0..TICKET_COUNT {
        let creator = *creators.choose(&mut rng).unwrap();
        let ticket = tickets
            .create(CreateTicket {
                subject: format!("Ticket {i}"),
                description: "generated".into(),
                priority: None,
                created_by: creator,
            })
            .await
            .unwrap();

        let status = *statuses.choose(&mut rng).unwrap();
        let assigned_to = if rng.random_bool(0.5) {
            Some(Some(*agents.choose(&mut rng).unwrap()))
        } else {
            None
        };
        tickets
            .update(
                ticket.id,
                TicketUpdate {
                    status: Some(status),
                    assigned_to,
                },
            )
            .await
            .unwrap();
    }

    let all = tickets.list(policy::TicketScope::All).await.unwrap();
    assert_eq!(all.len(), TICKET_COUNT);

    let service = TicketService::new(tickets, users);

    for member in &cast {
        let scope = policy::list_scope(member.role, member.id);

        let expected: BTreeSet<Uuid> = all
            .iter()
            .filter(|t| scope.permits(t))
            .map(|t| t.id)
            .collect();

        let listed = service.list(member).await.unwrap();
        let actual: BTreeSet<Uuid> = listed.iter().map(|t| t.ticket.id).collect();

        assert_eq!(
            actual, expected,
            "scope mismatch for {:?} {}",
            member.role, member.id
        );
    }
}

/// The service create path feeds the same predicate: anything a user
/// creates shows up in their own list.
#[tokio::test]
async fn fresh_ticket_is_visible_to_its_creator() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    tickdesk_db::run_migrations(&db).await.unwrap();

    let users = SurrealUserRepository::new(db.clone());
    let creator = users
        .create(CreateUser {
            name: "Alice".into(),
            email: "alice@example.com".into(),
            password: "password1".into(),
            role: Role::User,
        })
        .await
        .unwrap();

    let service = TicketService::new(SurrealTicketRepository::new(db.clone()), users);
    let created = service
        .create(
            &creator,
            NewTicket {
                subject: "Subject".into(),
                description: "Desc".into(),
                priority: None,
            },
        )
        .await
        .unwrap();

    let listed = service.list(&creator).await.unwrap();
    assert!(listed.iter().any(|t| t.ticket.id == created.ticket.id));
}
