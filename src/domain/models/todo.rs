use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct Todo {
    pub todo_id: i64,
    pub todo_name: String,
    pub description: String,
    pub due_date: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Every persisted field of a todo except the generated ones.
#[derive(Debug, Clone, PartialEq)]
pub struct TodoDraft {
    pub todo_name: String,
    pub description: String,
    pub due_date: String,
    pub user_id: i64,
}

/// Fields a caller chose to change; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct TodoChanges {
    pub todo_name: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub user_id: Option<i64>,
}

impl TodoChanges {
    pub fn merge_into(self, current: &Todo) -> TodoDraft {
        TodoDraft {
            todo_name: self.todo_name.unwrap_or_else(|| current.todo_name.clone()),
            description: self.description.unwrap_or_else(|| current.description.clone()),
            due_date: self.due_date.unwrap_or_else(|| current.due_date.clone()),
            user_id: self.user_id.unwrap_or(current.user_id),
        }
    }
}

impl From<&Todo> for TodoDraft {
    fn from(todo: &Todo) -> Self {
        Self {
            todo_name: todo.todo_name.clone(),
            description: todo.description.clone(),
            due_date: todo.due_date.clone(),
            user_id: todo.user_id,
        }
    }
}
