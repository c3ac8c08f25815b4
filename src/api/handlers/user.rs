use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use crate::api::extractors::rejection::{AppJson, AppPath};
use crate::state::AppState;
use crate::api::dtos::requests::{BulkUserUpdateItem, CreateUserRequest, RoleUpdateRequest, UpdateUserRequest};
use crate::api::extractors::auth::AdminUser;
use crate::api::dtos::responses::{BulkUpdateResponse, MessageResponse, RecordResponse};
use crate::api::validation;
use crate::domain::models::batch::BatchReport;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let users = state.user_service.list().await?;
    Ok(Json(users))
}

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    AppPath(user_id): AppPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.user_service.get(user_id).await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;
    Ok(Json(user))
}

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    AppJson(mut payload): AppJson<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    validation::validate_new_user(&mut payload)?;

    let created = state.user_service.create(payload.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(RecordResponse { message: "User created successfully".into(), data: created }),
    ))
}

pub async fn update_user(
    State(state): State<Arc<AppState>>,
    AppPath(user_id): AppPath<i64>,
    AppJson(mut payload): AppJson<UpdateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    validation::validate_user_update(&mut payload)?;

    let updated = state.user_service.update(user_id, payload.into()).await?;
    Ok(Json(RecordResponse { message: "User updated successfully".into(), data: updated }))
}

pub async fn set_user_role(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    AppPath(user_id): AppPath<i64>,
    AppJson(mut payload): AppJson<RoleUpdateRequest>,
) -> Result<impl IntoResponse, AppError> {
    validation::validate_role(&mut payload)?;

    let updated = state.user_service.set_role(user_id, payload.user_type).await?;
    info!("Admin {} set role of user {}", admin.sub, user_id);
    Ok(Json(RecordResponse { message: "User role updated successfully".into(), data: updated }))
}

pub async fn update_users(
    State(state): State<Arc<AppState>>,
    AppJson(mut payload): AppJson<Vec<BulkUserUpdateItem>>,
) -> Result<impl IntoResponse, AppError> {
    validation::validate_bulk_user_items(&mut payload)?;

    let replacements = payload.into_iter().map(Into::into).collect();
    let results = state.user_service.update_bulk(replacements).await;

    Ok(Json(BulkUpdateResponse::from(BatchReport::from(results))))
}

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    AppPath(user_id): AppPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.user_service.delete(user_id).await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
