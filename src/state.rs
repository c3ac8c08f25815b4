use std::sync::Arc;
use governor::DefaultKeyedRateLimiter;
use crate::domain::services::{auth_service::AuthService, todo_service::TodoService, user_service::UserService};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub todo_service: Arc<TodoService>,
    pub user_service: Arc<UserService>,
    pub auth_service: Arc<AuthService>,
    pub rate_limiter: Arc<DefaultKeyedRateLimiter<String>>,
}
