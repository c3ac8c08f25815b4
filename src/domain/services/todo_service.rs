use std::sync::Arc;
use tracing::info;

use crate::domain::{
    models::{
        batch::BatchItemResult,
        todo::{Todo, TodoChanges, TodoDraft},
    },
    ports::TodoRepository,
};
use crate::error::AppError;

/// Pre-conditions and orchestration around [`TodoRepository`].
pub struct TodoService {
    repo: Arc<dyn TodoRepository>,
}

impl TodoService {
    pub fn new(repo: Arc<dyn TodoRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<Todo>, AppError> {
        self.repo.list_all().await
    }

    pub async fn get(&self, todo_id: i64) -> Result<Option<Todo>, AppError> {
        self.repo.find_by_id(todo_id).await
    }

    pub async fn create(&self, draft: TodoDraft) -> Result<Todo, AppError> {
        let created = self.repo.create(&draft).await?
            .ok_or_else(|| AppError::NoRowsAffected("Failed to create todo".into()))?;

        info!("Created todo {} for user {}", created.todo_id, created.user_id);
        Ok(created)
    }

    /// Overlays `changes` on the stored row and writes the result back.
    ///
    /// The existence check and the write are separate statements; a delete
    /// landing in between surfaces as `NoRowsAffected`.
    pub async fn update(&self, todo_id: i64, changes: TodoChanges) -> Result<Todo, AppError> {
        let current = self.repo.find_by_id(todo_id).await?
            .ok_or_else(|| not_found(todo_id))?;

        let draft = changes.merge_into(&current);
        let updated = self.repo.update(todo_id, &draft).await?
            .ok_or_else(|| AppError::NoRowsAffected(format!("Failed to update todo {}", todo_id)))?;

        info!("Updated todo {}", todo_id);
        Ok(updated)
    }

    /// Full replacement of each listed todo, in order, without existence
    /// checks. Every input gets exactly one result.
    pub async fn update_bulk(&self, updates: Vec<(i64, TodoDraft)>) -> Vec<BatchItemResult<Todo>> {
        let results = self.repo.update_bulk(&updates).await;

        let outcomes: Vec<_> = updates
            .iter()
            .zip(results)
            .map(|((todo_id, _), result)| BatchItemResult::from_write(*todo_id, result))
            .collect();

        info!(
            "Bulk todo update: {} of {} records updated",
            outcomes.iter().filter(|o| o.is_updated()).count(),
            outcomes.len()
        );
        outcomes
    }

    pub async fn delete(&self, todo_id: i64) -> Result<(), AppError> {
        if self.repo.find_by_id(todo_id).await?.is_none() {
            return Err(not_found(todo_id));
        }

        if !self.repo.delete(todo_id).await? {
            return Err(AppError::NoRowsAffected(format!("Failed to delete todo {}", todo_id)));
        }

        info!("Deleted todo {}", todo_id);
        Ok(())
    }
}

fn not_found(todo_id: i64) -> AppError {
    AppError::NotFound(format!("Todo {} not found", todo_id))
}
