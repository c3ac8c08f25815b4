use axum::{extract::State, response::IntoResponse, Json};
use crate::api::extractors::rejection::AppJson;
use crate::state::AppState;
use crate::error::AppError;
use crate::api::dtos::requests::LoginRequest;
use crate::api::validation;
use crate::domain::models::auth::{AuthResponse, UserProfile};
use std::sync::Arc;
use tracing::info;

pub async fn login(
    State(state): State<Arc<AppState>>,
    AppJson(mut payload): AppJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    validation::validate_login(&mut payload)?;

    let user = state.user_service.authenticate(&payload.email, &payload.password).await?;
    let token = state.auth_service.issue_token(&user)?;

    info!("User logged in: {}", user.user_id);

    Ok(Json(AuthResponse {
        token,
        user: UserProfile {
            user_id: user.user_id,
            role: user.role().to_string(),
            email: user.email,
        }
    }))
}
