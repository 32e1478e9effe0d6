//! Integration tests for the User repository using in-memory SurrealDB.

use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use tickdesk_core::error::TickdeskError;
use tickdesk_core::models::user::{CreateUser, Role};
use tickdesk_core::repository::UserRepository;
use tickdesk_db::repository::SurrealUserRepository;

/// Helper: spin up an in-memory DB and run migrations.
async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    tickdesk_db::run_migrations(&db).await.unwrap();
    db
}

fn alice() -> CreateUser {
    CreateUser {
        name: "Alice".into(),
        email: "alice@example.com".into(),
        password: "SuperSecret123!".into(),
        role: Role::User,
    }
}

#[tokio::test]
async fn create_and_get_user() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    let user = repo.create(alice()).await.unwrap();

    assert_eq!(user.name, "Alice");
    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.role, Role::User);
    assert!(user.last_login.is_none());

    // Password should be hashed, not stored in plaintext.
    assert_ne!(user.password_hash, "SuperSecret123!");
    assert!(user.password_hash.starts_with("$argon2id$"));

    // Get by ID should return the same user.
    let fetched = repo.get_by_id(user.id).await.unwrap();
    assert_eq!(fetched.id, user.id);
    assert_eq!(fetched.email, "alice@example.com");

    // Get by email too.
    let by_email = repo.get_by_email("alice@example.com").await.unwrap();
    assert_eq!(by_email.id, user.id);
}

#[tokio::test]
async fn duplicate_email_is_rejected_by_unique_index() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    repo.create(alice()).await.unwrap();
    let result = repo
        .create(CreateUser {
            name: "Alice Again".into(),
            ..alice()
        })
        .await;

    assert!(result.is_err(), "second user with same email must fail");
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    let result = repo.get_by_email("nobody@example.com").await;
    assert!(matches!(result, Err(TickdeskError::NotFound { .. })));
}

#[tokio::test]
async fn record_login_stamps_last_login() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    let user = repo.create(alice()).await.unwrap();
    assert!(user.last_login.is_none());

    let at = chrono::Utc::now();
    repo.record_login(user.id, at).await.unwrap();

    let fetched = repo.get_by_id(user.id).await.unwrap();
    let stamped = fetched.last_login.expect("last_login should be set");
    assert!((stamped - at).num_seconds().abs() < 2);
}

#[tokio::test]
async fn list_and_list_by_role() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    repo.create(alice()).await.unwrap();
    repo.create(CreateUser {
        name: "Bob".into(),
        email: "bob@example.com".into(),
        password: "agent123".into(),
        role: Role::SupportAgent,
    })
    .await
    .unwrap();
    repo.create(CreateUser {
        name: "Carol".into(),
        email: "carol@example.com".into(),
        password: "admin123".into(),
        role: Role::Admin,
    })
    .await
    .unwrap();

    let all = repo.list().await.unwrap();
    assert_eq!(all.len(), 3);

    let agents = repo.list_by_role(Role::SupportAgent).await.unwrap();
    assert_eq!(agents.len(), 1);
    assert_eq!(agents[0].name, "Bob");
}

#[tokio::test]
async fn delete_removes_user() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    let user = repo.create(alice()).await.unwrap();
    repo.delete(user.id).await.unwrap();

    let result = repo.get_by_id(user.id).await;
    assert!(matches!(result, Err(TickdeskError::NotFound { .. })));

    // Deleting again reports not-found rather than silently succeeding.
    let again = repo.delete(user.id).await;
    assert!(matches!(again, Err(TickdeskError::NotFound { .. })));
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let db = setup().await;
    // A second run must be a no-op, not an error.
    tickdesk_db::run_migrations(&db).await.unwrap();
}
