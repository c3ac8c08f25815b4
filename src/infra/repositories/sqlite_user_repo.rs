use crate::domain::{models::user::{User, UserInsert, UserUpdate}, ports::UserRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::error;

pub struct SqliteUserRepo {
    pool: SqlitePool,
}

impl SqliteUserRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepo {
    async fn list_all(&self) -> Result<Vec<User>, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT user_id, first_name, last_name, email, phone_number, user_type, password FROM users ORDER BY user_id ASC"
        )
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, user_id: i64) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT user_id, first_name, last_name, email, phone_number, user_type, password FROM users WHERE user_id = ?",
        )
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT user_id, first_name, last_name, email, phone_number, user_type, password FROM users WHERE email = ?",
        )
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn create(&self, user: &UserInsert) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (first_name, last_name, email, phone_number, user_type, password) VALUES (?, ?, ?, ?, ?, ?) ON CONFLICT(email) DO NOTHING RETURNING user_id, first_name, last_name, email, phone_number, user_type, password",
        )
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email)
            .bind(&user.phone_number)
            .bind(&user.user_type)
            .bind(&user.password)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!("SQLite User Insert Failed: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn update(&self, user_id: i64, user: &UserUpdate) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET first_name = ?, last_name = ?, email = ?, phone_number = ?, user_type = COALESCE(?, user_type), password = COALESCE(?, password) WHERE user_id = ? RETURNING user_id, first_name, last_name, email, phone_number, user_type, password",
        )
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email)
            .bind(&user.phone_number)
            .bind(&user.user_type)
            .bind(&user.password)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!("SQLite User Update Failed: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn delete(&self, user_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("SQLite User Deletion Failed: {:?}", e);
                AppError::Database(e)
            })?;
        Ok(result.rows_affected() == 1)
    }
}
