use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use parlor_types::ErrorBody;
use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::api::ApiError;
use crate::AppState;

const WINDOW: Duration = Duration::from_secs(60);

/// Entries kept before expired windows are evicted.
const EVICTION_THRESHOLD: usize = 10_000;

/// In-memory rate limiter state, keyed by client IP.
///
/// Uses a simple fixed window counter.
#[derive(Clone, Debug)]
pub struct RateLimiter {
    state: Arc<Mutex<HashMap<IpAddr, (u32, Instant)>>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Check if the request is allowed.
    ///
    /// Returns `true` if allowed, `false` if limit exceeded.
    pub fn check(&self, ip: IpAddr, limit: u32) -> bool {
        let mut state = match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::error!("rate limiter lock poisoned, recovering with stale state");
                poisoned.into_inner()
            }
        };
        let now = Instant::now();

        // Evict only expired windows so active limits survive the sweep.
        if state.len() > EVICTION_THRESHOLD {
            state.retain(|_, (_, start)| now.duration_since(*start) <= WINDOW);
        }

        let (count, start) = state.entry(ip).or_insert((0, now));

        if now.duration_since(*start) > WINDOW {
            *count = 1;
            *start = now;
            true
        } else {
            *count += 1;
            *count <= limit
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

/// Rate limiting middleware.
///
/// Requests without `ConnectInfo` are rejected with 500: the server must be
/// served with `into_make_service_with_connect_info`. Rejections carry the
/// same `{"error": ...}` body as the API handlers.
pub async fn rate_limit_middleware(req: Request<Body>, next: Next) -> Result<Response, ApiError> {
    let state = req
        .extensions()
        .get::<Arc<AppState>>()
        .ok_or_else(|| ApiError::InternalServerError("application state missing".to_string()))?
        .clone();

    let Some(ConnectInfo(addr)) = req.extensions().get::<ConnectInfo<SocketAddr>>() else {
        tracing::error!("missing ConnectInfo; rate limiting cannot identify the client");
        return Err(ApiError::InternalServerError(
            "client address unavailable".to_string(),
        ));
    };

    if !state.rate_limiter.check(addr.ip(), state.requests_per_minute) {
        tracing::warn!(ip = %addr.ip(), "rate limit exceeded");
        let body = ErrorBody {
            error: "too many requests, retry in 60 seconds".to_string(),
        };
        return Ok((
            StatusCode::TOO_MANY_REQUESTS,
            [(header::RETRY_AFTER, "60")],
            Json(body),
        )
            .into_response());
    }

    Ok(next.run(req).await)
}
