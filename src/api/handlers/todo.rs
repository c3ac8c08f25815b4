use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use crate::api::extractors::rejection::{AppJson, AppPath};
use crate::state::AppState;
use crate::api::extractors::auth::AdminUser;
use crate::api::dtos::requests::{BulkTodoUpdateItem, CreateTodoRequest, UpdateTodoRequest};
use crate::api::dtos::responses::{BulkUpdateResponse, MessageResponse, RecordResponse};
use crate::domain::models::batch::BatchReport;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn list_todos(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let todos = state.todo_service.list().await?;
    info!("Admin {} listed {} todos", admin.sub, todos.len());
    Ok(Json(todos))
}

pub async fn get_todo(
    State(state): State<Arc<AppState>>,
    AppPath(todo_id): AppPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let todo = state.todo_service.get(todo_id).await?
        .ok_or_else(|| AppError::NotFound("Todo not found".into()))?;
    Ok(Json(todo))
}

pub async fn create_todo(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<CreateTodoRequest>,
) -> Result<impl IntoResponse, AppError> {
    let created = state.todo_service.create(payload.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(RecordResponse { message: "Todo Created Successfully".into(), data: created }),
    ))
}

pub async fn update_todo(
    State(state): State<Arc<AppState>>,
    AppPath(todo_id): AppPath<i64>,
    AppJson(payload): AppJson<UpdateTodoRequest>,
) -> Result<impl IntoResponse, AppError> {
    let updated = state.todo_service.update(todo_id, payload.into()).await?;
    Ok(Json(RecordResponse { message: "Todo Updated Successfully".into(), data: updated }))
}

pub async fn update_todos(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<Vec<BulkTodoUpdateItem>>,
) -> Result<impl IntoResponse, AppError> {
    if payload.is_empty() {
        return Err(AppError::Validation("Invalid or empty todo data".into()));
    }

    let updates = payload.into_iter()
        .map(|item| (item.todo_id, item.todo.into()))
        .collect();
    let results = state.todo_service.update_bulk(updates).await;

    Ok(Json(BulkUpdateResponse::from(BatchReport::from(results))))
}

pub async fn delete_todo(
    State(state): State<Arc<AppState>>,
    AppPath(todo_id): AppPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.todo_service.delete(todo_id).await?;
    Ok(Json(MessageResponse::new("Todo deleted successfully")))
}
