mod common;

use common::TestApp;
use todo_backend::{
    domain::{
        models::{todo::TodoDraft, user::{UserInsert, UserUpdate}},
        ports::{CredentialHasher, TodoRepository, UserRepository},
    },
    error::AppError,
    infra::{
        database::DatabasePool,
        repositories::{sqlite_todo_repo::SqliteTodoRepo, sqlite_user_repo::SqliteUserRepo},
        security::argon2_hasher::Argon2CredentialHasher,
    },
};

fn draft(name: &str) -> TodoDraft {
    TodoDraft {
        todo_name: name.to_string(),
        description: "2L".to_string(),
        due_date: "2025-01-01".to_string(),
        user_id: 1,
    }
}

fn insert(email: &str, hasher: &Argon2CredentialHasher) -> UserInsert {
    UserInsert {
        first_name: "Amrit".to_string(),
        last_name: "Techie".to_string(),
        email: email.to_string(),
        phone_number: "0712345678".to_string(),
        user_type: None,
        password: hasher.hash("Original1").unwrap(),
    }
}

#[tokio::test]
async fn test_todo_lookups_of_absent_ids_are_none() {
    let app = TestApp::new().await;
    let repo = SqliteTodoRepo::new(app.pool.clone());

    for id in [0, 1, -5, i64::MAX] {
        assert!(repo.find_by_id(id).await.unwrap().is_none());
    }
    assert!(repo.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_todo_writes_against_missing_rows_affect_nothing() {
    let app = TestApp::new().await;
    let repo = SqliteTodoRepo::new(app.pool.clone());

    assert!(repo.update(31, &draft("x")).await.unwrap().is_none());
    assert!(!repo.delete(31).await.unwrap());
}

#[tokio::test]
async fn test_todo_create_update_delete_cycle() {
    let app = TestApp::new().await;
    let repo = SqliteTodoRepo::new(app.pool.clone());

    let created = repo.create(&draft("Buy milk")).await.unwrap().unwrap();
    let fetched = repo.find_by_id(created.todo_id).await.unwrap().unwrap();
    assert_eq!(created, fetched);

    let updated = repo.update(created.todo_id, &draft("Buy bread")).await.unwrap().unwrap();
    assert_eq!(updated.todo_name, "Buy bread");
    assert_eq!(updated.created_at, created.created_at);

    assert!(repo.delete(created.todo_id).await.unwrap());
    assert!(repo.find_by_id(created.todo_id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_todo_bulk_update_keeps_input_order() {
    let app = TestApp::new().await;
    let repo = SqliteTodoRepo::new(app.pool.clone());
    let a = repo.create(&draft("a")).await.unwrap().unwrap();
    let b = repo.create(&draft("b")).await.unwrap().unwrap();

    let results = repo
        .update_bulk(&[(b.todo_id, draft("b2")), (404, draft("ghost")), (a.todo_id, draft("a2"))])
        .await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().as_ref().unwrap().todo_name, "b2");
    assert!(results[1].as_ref().unwrap().is_none());
    assert_eq!(results[2].as_ref().unwrap().as_ref().unwrap().todo_name, "a2");
}

#[tokio::test]
async fn test_user_insert_with_taken_email_returns_none() {
    let app = TestApp::new().await;
    let repo = SqliteUserRepo::new(app.pool.clone());
    let hasher = Argon2CredentialHasher::new(1).unwrap();

    assert!(repo.create(&insert("amrit@example.com", &hasher)).await.unwrap().is_some());
    assert!(repo.create(&insert("amrit@example.com", &hasher)).await.unwrap().is_none());
    assert_eq!(repo.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_user_lookup_by_email() {
    let app = TestApp::new().await;
    let repo = SqliteUserRepo::new(app.pool.clone());
    let hasher = Argon2CredentialHasher::new(1).unwrap();
    let created = repo.create(&insert("amrit@example.com", &hasher)).await.unwrap().unwrap();

    let found = repo.find_by_email("amrit@example.com").await.unwrap().unwrap();
    assert_eq!(found.user_id, created.user_id);
    assert!(hasher.verify("Original1", &found.password));
    assert!(repo.find_by_email("nobody@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_user_update_without_password_keeps_digest_and_role() {
    let app = TestApp::new().await;
    let repo = SqliteUserRepo::new(app.pool.clone());
    let hasher = Argon2CredentialHasher::new(1).unwrap();
    let mut user = insert("amrit@example.com", &hasher);
    user.user_type = Some("admin".to_string());
    let created = repo.create(&user).await.unwrap().unwrap();

    let updated = repo.update(created.user_id, &UserUpdate {
        first_name: "Kie".to_string(),
        last_name: "Brown".to_string(),
        email: "kie@example.com".to_string(),
        phone_number: "0798765432".to_string(),
        user_type: None,
        password: None,
    }).await.unwrap().unwrap();

    assert_eq!(updated.first_name, "Kie");
    assert_eq!(updated.user_type.as_deref(), Some("admin"));
    assert_eq!(updated.password, created.password);
}

#[tokio::test]
async fn test_user_update_to_taken_email_is_a_store_error() {
    let app = TestApp::new().await;
    let repo = SqliteUserRepo::new(app.pool.clone());
    let hasher = Argon2CredentialHasher::new(1).unwrap();
    repo.create(&insert("amrit@example.com", &hasher)).await.unwrap().unwrap();
    let kie = repo.create(&insert("kie@example.com", &hasher)).await.unwrap().unwrap();

    let result = repo.update(kie.user_id, &UserUpdate {
        first_name: "Kie".to_string(),
        last_name: "Brown".to_string(),
        email: "amrit@example.com".to_string(),
        phone_number: "0798765432".to_string(),
        user_type: None,
        password: None,
    }).await;

    assert!(matches!(result, Err(AppError::Database(_))));
}

#[tokio::test]
async fn test_acquire_hands_out_the_same_pool() {
    let app = TestApp::new().await;
    let database = DatabasePool::from_sqlite(app.pool.clone()).await.unwrap();

    let first = database.acquire();
    let second = database.acquire();
    assert_eq!(first.backend(), "sqlite");

    // Both handles see writes made through the other.
    let (DatabasePool::Sqlite(a), DatabasePool::Sqlite(b)) = (first, second) else {
        panic!("expected sqlite pools");
    };
    let created = SqliteTodoRepo::new(a).create(&draft("shared")).await.unwrap().unwrap();
    assert!(SqliteTodoRepo::new(b).find_by_id(created.todo_id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_user_bulk_update_reports_each_row() {
    let app = TestApp::new().await;
    let repo = SqliteUserRepo::new(app.pool.clone());
    let hasher = Argon2CredentialHasher::new(1).unwrap();
    let created = repo.create(&insert("amrit@example.com", &hasher)).await.unwrap().unwrap();

    let replacement = |email: &str| UserUpdate {
        first_name: "Amrit".to_string(),
        last_name: "Renamed".to_string(),
        email: email.to_string(),
        phone_number: "0712345678".to_string(),
        user_type: None,
        password: None,
    };

    let results = repo
        .update_bulk(&[(808, replacement("ghost@example.com")), (created.user_id, replacement("amrit@example.com"))])
        .await;

    assert_eq!(results.len(), 2);
    assert!(results[0].as_ref().unwrap().is_none());
    assert_eq!(results[1].as_ref().unwrap().as_ref().unwrap().last_name, "Renamed");
}
