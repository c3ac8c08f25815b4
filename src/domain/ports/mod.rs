use crate::domain::models::{
    todo::{Todo, TodoDraft},
    user::{PasswordDigest, User, UserInsert, UserUpdate},
};
use crate::error::AppError;
use async_trait::async_trait;

/// Data access for the `todos` table.
///
/// Writes that match no row come back as `Ok(None)` / `Ok(false)`; only store
/// failures are errors.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Todo>, AppError>;
    async fn find_by_id(&self, todo_id: i64) -> Result<Option<Todo>, AppError>;
    async fn create(&self, draft: &TodoDraft) -> Result<Option<Todo>, AppError>;
    async fn update(&self, todo_id: i64, draft: &TodoDraft) -> Result<Option<Todo>, AppError>;
    async fn delete(&self, todo_id: i64) -> Result<bool, AppError>;

    /// Applies each update in order. A failing record does not stop the rest.
    async fn update_bulk(&self, updates: &[(i64, TodoDraft)]) -> Vec<Result<Option<Todo>, AppError>> {
        let mut results = Vec::with_capacity(updates.len());
        for (todo_id, draft) in updates {
            results.push(self.update(*todo_id, draft).await);
        }
        results
    }
}

/// Data access for the `users` table.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<User>, AppError>;
    async fn find_by_id(&self, user_id: i64) -> Result<Option<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    /// `Ok(None)` when the email is already taken.
    async fn create(&self, user: &UserInsert) -> Result<Option<User>, AppError>;
    async fn update(&self, user_id: i64, user: &UserUpdate) -> Result<Option<User>, AppError>;
    async fn delete(&self, user_id: i64) -> Result<bool, AppError>;

    async fn update_bulk(&self, updates: &[(i64, UserUpdate)]) -> Vec<Result<Option<User>, AppError>> {
        let mut results = Vec::with_capacity(updates.len());
        for (user_id, user) in updates {
            results.push(self.update(*user_id, user).await);
        }
        results
    }
}

pub trait CredentialHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> Result<PasswordDigest, AppError>;
    fn verify(&self, plaintext: &str, digest: &PasswordDigest) -> bool;
}
