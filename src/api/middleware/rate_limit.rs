use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use governor::DefaultKeyedRateLimiter;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::state::AppState;

/// Per-client request quota. Clients are told apart by peer address; the
/// first `X-Forwarded-For` hop is used instead only when
/// `TRUST_FORWARDED_FOR` is set.
pub async fn rate_limit(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let key = client_key(peer, request.headers(), state.config.trust_forwarded_for);

    if state.rate_limiter.check_key(&key).is_err() {
        warn!("Rate limit exceeded for client {}", key);
        return Err(AppError::RateLimited);
    }

    Ok(next.run(request).await)
}

fn client_key(peer: Option<SocketAddr>, headers: &HeaderMap, trust_forwarded_for: bool) -> String {
    let forwarded = trust_forwarded_for
        .then(|| {
            headers.get("x-forwarded-for")
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.split(',').next())
                .map(str::trim)
                .filter(|ip| !ip.is_empty())
        })
        .flatten();

    match (forwarded, peer) {
        (Some(ip), _) => ip.to_string(),
        (None, Some(addr)) => addr.ip().to_string(),
        (None, None) => "unknown".to_string(),
    }
}

/// Drops limiter entries for clients whose quota has fully replenished.
pub fn prune(limiter: &DefaultKeyedRateLimiter<String>) {
    let before = limiter.len();
    limiter.retain_recent();
    limiter.shrink_to_fit();
    debug!("Rate limiter pruned: {} -> {} clients", before, limiter.len());
}

pub fn spawn_pruner(limiter: Arc<DefaultKeyedRateLimiter<String>>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            prune(&limiter);
        }
    })
}
