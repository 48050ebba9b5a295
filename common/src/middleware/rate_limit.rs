//! Per-client rate limiting middleware.
//!
//! Fixed 60-second windows keyed by client IP. Applied uniformly as a router
//! layer and driven entirely by configuration (`RATE_LIMIT_PER_MINUTE`);
//! individual endpoints never opt in or out on their own.

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tokio::sync::RwLock;

const WINDOW: Duration = Duration::from_secs(60);

/// Fixed-window request counter keyed by client IP.
pub struct RateLimiter {
    /// Requests allowed per window; 0 disables limiting entirely.
    budget: u32,
    windows: RwLock<HashMap<IpAddr, (Instant, u32)>>,
}

impl RateLimiter {
    /// Creates a limiter allowing `budget` requests per minute per client.
    pub fn new(budget: u32) -> Arc<Self> {
        Arc::new(Self {
            budget,
            windows: RwLock::new(HashMap::new()),
        })
    }

    /// Records one request from `ip` and returns whether it is within budget.
    pub async fn allow(&self, ip: IpAddr) -> bool {
        self.allow_at(ip, Instant::now()).await
    }

    async fn allow_at(&self, ip: IpAddr, now: Instant) -> bool {
        if self.budget == 0 {
            return true;
        }

        let mut windows = self.windows.write().await;
        // Drop expired windows so the map stays bounded by active clients;
        // x-forwarded-for keys are attacker-controlled.
        windows.retain(|_, (start, _)| now.duration_since(*start) < WINDOW);
        let entry = windows.entry(ip).or_insert((now, 0));
        entry.1 += 1;
        entry.1 <= self.budget
    }
}

/// Rate limiting middleware handler.
///
/// Blocks over-budget clients with 429 before the request reaches any
/// handler. The client IP comes from `x-forwarded-for` when present
/// (first hop), otherwise from the socket address.
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiter>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let ip = client_ip(&req);
    if limiter.allow(ip).await {
        next.run(req).await
    } else {
        tracing::warn!(client = %ip, "rate limit exceeded");
        (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "error": "Too many requests." })),
        )
            .into_response()
    }
}

fn client_ip(req: &Request<Body>) -> IpAddr {
    if let Some(forwarded) = req
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .and_then(|v| v.trim().parse::<IpAddr>().ok())
    {
        return forwarded;
    }

    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(last: u8) -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(10, 0, 0, last))
    }

    #[tokio::test]
    async fn blocks_beyond_budget_within_window() {
        let limiter = RateLimiter::new(60);
        let now = Instant::now();
        for _ in 0..60 {
            assert!(limiter.allow_at(ip(1), now).await);
        }
        assert!(!limiter.allow_at(ip(1), now).await);
    }

    #[tokio::test]
    async fn clients_are_tracked_independently() {
        let limiter = RateLimiter::new(1);
        let now = Instant::now();
        assert!(limiter.allow_at(ip(1), now).await);
        assert!(!limiter.allow_at(ip(1), now).await);
        assert!(limiter.allow_at(ip(2), now).await);
    }

    #[tokio::test]
    async fn window_resets_after_sixty_seconds() {
        let limiter = RateLimiter::new(1);
        let start = Instant::now();
        assert!(limiter.allow_at(ip(1), start).await);
        assert!(!limiter.allow_at(ip(1), start).await);
        assert!(limiter.allow_at(ip(1), start + WINDOW).await);
    }

    #[tokio::test]
    async fn stale_client_windows_are_evicted() {
        let limiter = RateLimiter::new(60);
        let start = Instant::now();
        for last in 1..=200u8 {
            assert!(limiter.allow_at(ip(last), start).await);
        }
        assert_eq!(limiter.windows.read().await.len(), 200);

        // One request two full windows later must sweep every stale entry.
        assert!(limiter.allow_at(ip(1), start + 2 * WINDOW).await);
        assert_eq!(limiter.windows.read().await.len(), 1);
    }

    #[tokio::test]
    async fn zero_budget_disables_limiting() {
        let limiter = RateLimiter::new(0);
        let now = Instant::now();
        for _ in 0..1000 {
            assert!(limiter.allow_at(ip(1), now).await);
        }
    }
}
