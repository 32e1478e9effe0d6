//! Integration tests for the Ticket repository using in-memory SurrealDB.

use chrono::{Duration, Utc};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use tickdesk_core::error::TickdeskError;
use tickdesk_core::models::ticket::{Comment, CreateTicket, Priority, Status, TicketUpdate};
use tickdesk_core::models::user::Role;
use tickdesk_core::policy::TicketScope;
use tickdesk_core::repository::TicketRepository;
use tickdesk_db::repository::SurrealTicketRepository;
use uuid::Uuid;

async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    tickdesk_db::run_migrations(&db).await.unwrap();
    db
}

fn new_ticket(created_by: Uuid) -> CreateTicket {
    CreateTicket {
        subject: "Printer broken".into(),
        description: "It only prints test pages".into(),
        priority: Some(Priority::High),
        created_by,
    }
}

#[tokio::test]
async fn create_defaults() {
    let db = setup().await;
    let repo = SurrealTicketRepository::new(db);
    let creator = Uuid::new_v4();

    let ticket = repo.create(new_ticket(creator)).await.unwrap();

    assert_eq!(ticket.subject, "Printer broken");
    assert_eq!(ticket.status, Status::Open);
    assert_eq!(ticket.priority, Priority::High);
    assert_eq!(ticket.created_by, creator);
    assert!(ticket.assigned_to.is_none());
    assert!(ticket.comments.is_empty());
}

#[tokio::test]
async fn priority_defaults_to_medium() {
    let db = setup().await;
    let repo = SurrealTicketRepository::new(db);

    let ticket = repo
        .create(CreateTicket {
            priority: None,
            ..new_ticket(Uuid::new_v4())
        })
        .await
        .unwrap();

    assert_eq!(ticket.priority, Priority::Medium);
}

#[tokio::test]
async fn update_status_and_assignment() {
    let db = setup().await;
    let repo = SurrealTicketRepository::new(db);
    let agent = Uuid::new_v4();

    let ticket = repo.create(new_ticket(Uuid::new_v4())).await.unwrap();

    let updated = repo
        .update(
            ticket.id,
            TicketUpdate {
                status: Some(Status::InProgress),
                assigned_to: Some(Some(agent)),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.status, Status::InProgress);
    assert_eq!(updated.assigned_to, Some(agent));
    assert!(updated.updated_at >= ticket.updated_at);

    // Clearing assignment with an explicit null.
    let cleared = repo
        .update(
            ticket.id,
            TicketUpdate {
                status: None,
                assigned_to: Some(None),
            },
        )
        .await
        .unwrap();

    assert!(cleared.assigned_to.is_none());
    // Status untouched by the partial update.
    assert_eq!(cleared.status, Status::InProgress);
}

#[tokio::test]
async fn update_missing_ticket_is_not_found() {
    let db = setup().await;
    let repo = SurrealTicketRepository::new(db);

    let result = repo
        .update(
            Uuid::new_v4(),
            TicketUpdate {
                status: Some(Status::Closed),
                assigned_to: None,
            },
        )
        .await;

    assert!(matches!(result, Err(TickdeskError::NotFound { .. })));
}

#[tokio::test]
async fn comments_are_append_only() {
    let db = setup().await;
    let repo = SurrealTicketRepository::new(db);
    let author = Uuid::new_v4();

    let ticket = repo.create(new_ticket(author)).await.unwrap();

    let first = Comment {
        user: author,
        user_name: "Alice".into(),
        user_role: Role::User,
        text: "Any update?".into(),
        created_at: Utc::now(),
    };
    let after_first = repo.add_comment(ticket.id, first.clone()).await.unwrap();
    assert_eq!(after_first.comments.len(), 1);

    let second = Comment {
        user: author,
        user_name: "Alice".into(),
        user_role: Role::User,
        text: "Still broken".into(),
        created_at: Utc::now(),
    };
    let after_second = repo.add_comment(ticket.id, second).await.unwrap();
    assert_eq!(after_second.comments.len(), 2);

    // The earlier comment is untouched by the second append.
    assert_eq!(after_second.comments[0], first);
    assert_eq!(after_second.comments[1].text, "Still broken");
}

#[tokio::test]
async fn list_scopes_match_policy_predicate() {
    let db = setup().await;
    let repo = SurrealTicketRepository::new(db);

    let user_a = Uuid::new_v4();
    let user_b = Uuid::new_v4();
    let agent = Uuid::new_v4();

    let t1 = repo.create(new_ticket(user_a)).await.unwrap();
    let t2 = repo.create(new_ticket(user_b)).await.unwrap();
    let t3 = repo.create(new_ticket(user_b)).await.unwrap();

    // t2 assigned to the agent and moved off `open`; t3 closed without
    // assignment.
    repo.update(
        t2.id,
        TicketUpdate {
            status: Some(Status::InProgress),
            assigned_to: Some(Some(agent)),
        },
    )
    .await
    .unwrap();
    repo.update(
        t3.id,
        TicketUpdate {
            status: Some(Status::Closed),
            assigned_to: None,
        },
    )
    .await
    .unwrap();

    let all = repo.list(TicketScope::All).await.unwrap();
    assert_eq!(all.len(), 3);

    let queue = repo.list(TicketScope::AgentQueue(agent)).await.unwrap();
    let queue_ids: Vec<_> = queue.iter().map(|t| t.id).collect();
    assert!(queue_ids.contains(&t1.id)); // open
    assert!(queue_ids.contains(&t2.id)); // assigned to agent
    assert!(!queue_ids.contains(&t3.id)); // closed, unassigned

    let mine = repo.list(TicketScope::CreatedBy(user_b)).await.unwrap();
    let mine_ids: Vec<_> = mine.iter().map(|t| t.id).collect();
    assert_eq!(mine.len(), 2);
    assert!(mine_ids.contains(&t2.id));
    assert!(mine_ids.contains(&t3.id));
}

#[tokio::test]
async fn list_is_newest_first() {
    let db = setup().await;
    let repo = SurrealTicketRepository::new(db);

    for _ in 0..3 {
        repo.create(new_ticket(Uuid::new_v4())).await.unwrap();
    }

    let all = repo.list(TicketScope::All).await.unwrap();
    for pair in all.windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
    }
}

#[tokio::test]
async fn window_query_brackets_created_at() {
    let db = setup().await;
    let repo = SurrealTicketRepository::new(db);

    let ticket = repo.create(new_ticket(Uuid::new_v4())).await.unwrap();
    let now = Utc::now();

    // A window covering now must include the fresh ticket.
    let within = repo
        .list_created_between(Some(now - Duration::days(7)), now + Duration::seconds(5))
        .await
        .unwrap();
    assert!(within.iter().any(|t| t.id == ticket.id));

    // A window that ended yesterday must not.
    let stale = repo
        .list_created_between(Some(now - Duration::days(8)), now - Duration::days(1))
        .await
        .unwrap();
    assert!(stale.is_empty());

    // All-time (no lower bound) includes it.
    let all_time = repo
        .list_created_between(None, now + Duration::seconds(5))
        .await
        .unwrap();
    assert_eq!(all_time.len(), 1);
}
