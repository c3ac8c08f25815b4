use crate::domain::{models::user::{User, UserInsert, UserUpdate}, ports::UserRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::error;

pub struct PostgresUserRepo {
    pool: PgPool,
}

impl PostgresUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepo {
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
            "SELECT user_id, first_name, last_name, email, phone_number, user_type, password FROM users WHERE user_id = $1",
        )
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT user_id, first_name, last_name, email, phone_number, user_type, password FROM users WHERE email = $1",
        )
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn create(&self, user: &UserInsert) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (first_name, last_name, email, phone_number, user_type, password) VALUES ($1, $2, $3, $4, $5, $6) ON CONFLICT (email) DO NOTHING RETURNING user_id, first_name, last_name, email, phone_number, user_type, password",
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
                error!("Postgres User Insert Failed: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn update(&self, user_id: i64, user: &UserUpdate) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET first_name = $1, last_name = $2, email = $3, phone_number = $4, user_type = COALESCE($5, user_type), password = COALESCE($6, password) WHERE user_id = $7 RETURNING user_id, first_name, last_name, email, phone_number, user_type, password",
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
                error!("Postgres User Update Failed: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn delete(&self, user_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Postgres User Deletion Failed: {:?}", e);
                AppError::Database(e)
            })?;
        Ok(result.rows_affected() == 1)
    }
}
