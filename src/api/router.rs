use axum::{
    body::Body,
    extract::Request,
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{auth, health, todo, user};
use crate::api::middleware::rate_limit::rate_limit;
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .route("/api", get(health::api_index))

        // Auth
        .route("/api/auth/login", post(auth::login))

        // Todos
        .route("/api/todos", get(todo::list_todos).post(todo::create_todo).put(todo::update_todos))
        .route("/api/todos/{todo_id}", get(todo::get_todo).put(todo::update_todo).delete(todo::delete_todo))

        // Users
        .route("/api/users", get(user::list_users).post(user::create_user).put(user::update_users))
        .route("/api/users/{user_id}", get(user::get_user).put(user::update_user).delete(user::delete_user))
        .route("/api/users/{user_id}/role", put(user::set_user_role))

        .fallback(health::not_found)
        .layer(middleware::from_fn_with_state(state.clone(), rate_limit))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
