use serde::Deserialize;

use crate::domain::models::{
    todo::{TodoChanges, TodoDraft},
    user::{NewUser, UserChanges, UserReplacement},
};

#[derive(Deserialize)]
pub struct CreateTodoRequest {
    pub todo_name: String,
    pub description: String,
    pub due_date: String,
    pub user_id: i64,
}

impl From<CreateTodoRequest> for TodoDraft {
    fn from(req: CreateTodoRequest) -> Self {
        Self {
            todo_name: req.todo_name,
            description: req.description,
            due_date: req.due_date,
            user_id: req.user_id,
        }
    }
}

#[derive(Deserialize, Default)]
pub struct UpdateTodoRequest {
    pub todo_name: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub user_id: Option<i64>,
}

impl From<UpdateTodoRequest> for TodoChanges {
    fn from(req: UpdateTodoRequest) -> Self {
        Self {
            todo_name: req.todo_name,
            description: req.description,
            due_date: req.due_date,
            user_id: req.user_id,
        }
    }
}

#[derive(Deserialize)]
pub struct BulkTodoUpdateItem {
    pub todo_id: i64,
    #[serde(flatten)]
    pub todo: CreateTodoRequest,
}

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
}

impl From<CreateUserRequest> for NewUser {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone_number: req.phone_number,
            user_type: None,
            password: req.password,
        }
    }
}

#[derive(Deserialize, Default)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub password: Option<String>,
}

impl From<UpdateUserRequest> for UserChanges {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone_number: req.phone_number,
            user_type: None,
            password: req.password,
        }
    }
}

#[derive(Deserialize, Clone)]
pub struct BulkUserUpdateItem {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub password: Option<String>,
}

impl From<BulkUserUpdateItem> for UserReplacement {
    fn from(req: BulkUserUpdateItem) -> Self {
        Self {
            user_id: req.user_id,
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone_number: req.phone_number,
            password: req.password,
        }
    }
}

/// Admin-only role change. Self-service registration and profile updates
/// never touch `user_type`.
#[derive(Deserialize)]
pub struct RoleUpdateRequest {
    pub user_type: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}
