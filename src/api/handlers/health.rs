use axum::{extract::OriginalUri, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

pub async fn root() -> impl IntoResponse {
    Json(json!({
        "message": "Todo API Server",
        "documentation": "Visit /api for available endpoints",
        "status": "running"
    }))
}

pub async fn api_index() -> impl IntoResponse {
    Json(json!({
        "message": "Welcome to the Todo API",
        "routes": {
            "todos": {
                "getAll": "/api/todos [GET]",
                "getById": "/api/todos/{todo_id} [GET]",
                "create": "/api/todos [POST]",
                "updateMany": "/api/todos [PUT]",
                "update": "/api/todos/{todo_id} [PUT]",
                "delete": "/api/todos/{todo_id} [DELETE]"
            },
            "users": {
                "getAll": "/api/users [GET]",
                "getById": "/api/users/{user_id} [GET]",
                "create": "/api/users [POST]",
                "updateMany": "/api/users [PUT]",
                "update": "/api/users/{user_id} [PUT]",
                "delete": "/api/users/{user_id} [DELETE]",
                "setRole": "/api/users/{user_id}/role [PUT] (admin)"
            },
            "auth": {
                "login": "/api/auth/login [POST]"
            }
        }
    }))
}

pub async fn not_found(OriginalUri(uri): OriginalUri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "message": "Route not found",
            "path": uri.path()
        })),
    )
}
