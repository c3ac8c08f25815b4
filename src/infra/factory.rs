use std::num::NonZeroU32;
use std::sync::Arc;
use governor::{Quota, RateLimiter};
use tracing::info;

use crate::config::Config;
use crate::domain::ports::{CredentialHasher, TodoRepository, UserRepository};
use crate::domain::services::{auth_service::AuthService, todo_service::TodoService, user_service::UserService};
use crate::error::AppError;
use crate::infra::database::DatabasePool;
use crate::infra::security::argon2_hasher::Argon2CredentialHasher;
use crate::infra::repositories::{
    postgres_todo_repo::PostgresTodoRepo, postgres_user_repo::PostgresUserRepo,
    sqlite_todo_repo::SqliteTodoRepo, sqlite_user_repo::SqliteUserRepo,
};
use crate::state::AppState;

/// Connects to the store and wires every service. Nothing is served until
/// this has returned `Ok`.
pub async fn bootstrap_state(config: &Config) -> Result<AppState, AppError> {
    let pool = DatabasePool::connect(&config.database_url, config.max_connections).await?;
    info!("Database pool ready ({})", pool.backend());
    build_state(config, pool.acquire())
}

pub fn build_state(config: &Config, pool: DatabasePool) -> Result<AppState, AppError> {
    let (todo_repo, user_repo): (Arc<dyn TodoRepository>, Arc<dyn UserRepository>) = match pool {
        DatabasePool::Postgres(pool) => (
            Arc::new(PostgresTodoRepo::new(pool.clone())),
            Arc::new(PostgresUserRepo::new(pool)),
        ),
        DatabasePool::Sqlite(pool) => (
            Arc::new(SqliteTodoRepo::new(pool.clone())),
            Arc::new(SqliteUserRepo::new(pool)),
        ),
    };

    let hasher: Arc<dyn CredentialHasher> = Arc::new(Argon2CredentialHasher::new(config.password_hash_cost)?);

    let per_minute = NonZeroU32::new(config.rate_limit_per_minute)
        .ok_or_else(|| AppError::Config("RATE_LIMIT_PER_MINUTE must be greater than zero".into()))?;

    Ok(AppState {
        config: config.clone(),
        todo_service: Arc::new(TodoService::new(todo_repo)),
        user_service: Arc::new(UserService::new(user_repo, hasher)),
        auth_service: Arc::new(AuthService::new(config)?),
        rate_limiter: Arc::new(RateLimiter::keyed(Quota::per_minute(per_minute))),
    })
}
