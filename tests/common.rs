use todo_backend::{
    api::router::create_router,
    config::Config,
    domain::models::user::{NewUser, User},
    infra::{database::DatabasePool, factory::build_state},
    state::AppState,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::sync::Arc;
use uuid::Uuid;
use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{Request, header, StatusCode},
    response::Response,
    Router,
};
use std::net::SocketAddr;
use std::str::FromStr;
use tower::ServiceExt;
use serde_json::Value;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "AdminPass1";
pub const DEFAULT_PEER: &str = "127.0.0.1:40000";

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    pub async fn with_rate_limit(rate_limit_per_minute: u32) -> Self {
        Self::with_config(|config| config.rate_limit_per_minute = rate_limit_per_minute).await
    }

    pub async fn with_config(tweak: impl FnOnce(&mut Config)) -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        let database = DatabasePool::from_sqlite(pool.clone())
            .await
            .expect("Failed to migrate test db");

        let mut config = Config {
            database_url: db_url.clone(),
            port: 0,
            max_connections: 5,
            jwt_secret: "test-secret".to_string(),
            jwt_ttl_minutes: 60,
            password_hash_cost: 1,
            rate_limit_per_minute: 10_000,
            trust_forwarded_for: false,
        };
        tweak(&mut config);

        let state = Arc::new(build_state(&config, database).expect("Failed to build state"));
        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>, token: Option<&str>) -> Response {
        self.send_from(DEFAULT_PEER, &[], method, uri, body, token).await
    }

    /// Sends a request as if it arrived from `peer`, with extra headers.
    pub async fn send_from(
        &self,
        peer: &str,
        headers: &[(&str, &str)],
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let mut request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let peer: SocketAddr = peer.parse().expect("Invalid peer address");
        request.extensions_mut().insert(ConnectInfo(peer));

        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Sends `body` verbatim as `application/json`, well-formed or not.
    pub async fn call_raw(&self, method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
        let mut request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        request.extensions_mut().insert(ConnectInfo(DEFAULT_PEER.parse::<SocketAddr>().unwrap()));

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        (status, parse_body(response).await)
    }

    /// Sends a request and returns its status and decoded JSON body.
    pub async fn call(&self, method: &str, uri: &str, body: Option<Value>, token: Option<&str>) -> (StatusCode, Value) {
        let response = self.send(method, uri, body, token).await;
        let status = response.status();
        (status, parse_body(response).await)
    }

    pub async fn seed_user(&self, email: &str, password: &str, user_type: Option<&str>) -> User {
        self.state.user_service.create(NewUser {
            first_name: "Seeded".to_string(),
            last_name: "User".to_string(),
            email: email.to_string(),
            phone_number: "0712345678".to_string(),
            user_type: user_type.map(str::to_string),
            password: password.to_string(),
        }).await.expect("Failed to seed user")
    }

    pub async fn admin_token(&self) -> String {
        self.seed_user(ADMIN_EMAIL, ADMIN_PASSWORD, Some("admin")).await;
        self.login(ADMIN_EMAIL, ADMIN_PASSWORD).await
    }

    pub async fn login(&self, email: &str, password: &str) -> String {
        let (status, body) = self.call(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({ "email": email, "password": password })),
            None,
        ).await;

        if !status.is_success() {
            panic!("Login failed in test helper: status {}", status);
        }

        body["token"].as_str().expect("No token in body").to_string()
    }

    pub async fn stored_password(&self, user_id: i64) -> String {
        sqlx::query_scalar::<_, String>("SELECT password FROM users WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }
}

pub async fn parse_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}
