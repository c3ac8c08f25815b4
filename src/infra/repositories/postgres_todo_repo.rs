use crate::domain::{models::todo::{Todo, TodoDraft}, ports::TodoRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::error;

pub struct PostgresTodoRepo {
    pool: PgPool,
}

impl PostgresTodoRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoRepository for PostgresTodoRepo {
    async fn list_all(&self) -> Result<Vec<Todo>, AppError> {
        sqlx::query_as::<_, Todo>(
            "SELECT todo_id, todo_name, description, due_date, user_id, created_at FROM todos ORDER BY todo_id ASC"
        )
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, todo_id: i64) -> Result<Option<Todo>, AppError> {
        sqlx::query_as::<_, Todo>(
            "SELECT todo_id, todo_name, description, due_date, user_id, created_at FROM todos WHERE todo_id = $1",
        )
            .bind(todo_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn create(&self, draft: &TodoDraft) -> Result<Option<Todo>, AppError> {
        sqlx::query_as::<_, Todo>(
            "INSERT INTO todos (todo_name, description, due_date, user_id, created_at) VALUES ($1, $2, $3, $4, $5) RETURNING todo_id, todo_name, description, due_date, user_id, created_at",
        )
            .bind(&draft.todo_name)
            .bind(&draft.description)
            .bind(&draft.due_date)
            .bind(draft.user_id)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!("Postgres Todo Insert Failed: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn update(&self, todo_id: i64, draft: &TodoDraft) -> Result<Option<Todo>, AppError> {
        sqlx::query_as::<_, Todo>(
            "UPDATE todos SET todo_name = $1, description = $2, due_date = $3, user_id = $4 WHERE todo_id = $5 RETURNING todo_id, todo_name, description, due_date, user_id, created_at",
        )
            .bind(&draft.todo_name)
            .bind(&draft.description)
            .bind(&draft.due_date)
            .bind(draft.user_id)
            .bind(todo_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!("Postgres Todo Update Failed: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn delete(&self, todo_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM todos WHERE todo_id = $1")
            .bind(todo_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Postgres Todo Deletion Failed: {:?}", e);
                AppError::Database(e)
            })?;
        Ok(result.rows_affected() == 1)
    }
}
