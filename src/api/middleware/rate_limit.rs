//! Rate limiting middleware using Redis counters.
//!
//! Writes are password-checked, so they get a much smaller budget than reads.

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderValue, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::{
    RATE_LIMIT_READ_REQUESTS, RATE_LIMIT_WINDOW_SECONDS, RATE_LIMIT_WRITE_REQUESTS,
};
use crate::errors::{AppError, AppResult};
use crate::infra::CounterStore;

/// Rate limit error response
#[derive(Debug)]
pub struct RateLimitError {
    pub retry_after: u64,
}

impl IntoResponse for RateLimitError {
    fn into_response(self) -> Response {
        let mut response = AppError::TooManyRequests.into_response();
        let headers = response.headers_mut();
        headers.insert("Retry-After", HeaderValue::from(self.retry_after));
        headers.insert("X-RateLimit-Remaining", HeaderValue::from_static("0"));
        response
    }
}

/// Which budget a request draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bucket {
    Read,
    Write,
}

impl Bucket {
    fn for_method(method: &Method) -> Self {
        match *method {
            Method::POST | Method::PUT | Method::PATCH | Method::DELETE => Bucket::Write,
            _ => Bucket::Read,
        }
    }

    fn limit(self) -> u64 {
        match self {
            Bucket::Read => RATE_LIMIT_READ_REQUESTS,
            Bucket::Write => RATE_LIMIT_WRITE_REQUESTS,
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            Bucket::Read => "read",
            Bucket::Write => "write",
        }
    }
}

/// Per-client request budgets backed by a counter store.
#[derive(Clone)]
pub struct RateLimiter {
    store: Arc<dyn CounterStore>,
    trust_proxy_headers: bool,
}

impl RateLimiter {
    /// `trust_proxy_headers` keys clients on `X-Forwarded-For` / `X-Real-IP`;
    /// otherwise only the TCP peer address counts.
    pub fn new(store: Arc<dyn CounterStore>, trust_proxy_headers: bool) -> Self {
        Self {
            store,
            trust_proxy_headers,
        }
    }

    /// Check the backing store is reachable.
    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }

    /// Client identifier used as the counter key.
    fn client_identifier(&self, request: &Request) -> String {
        if self.trust_proxy_headers {
            if let Some(ip) = forwarded_client(request) {
                return ip;
            }
        }

        request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|info| info.0.ip().to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

/// Client address reported by a reverse proxy.
fn forwarded_client(request: &Request) -> Option<String> {
    // First hop of X-Forwarded-For is the client the proxy saw
    let forwarded = request
        .headers()
        .get("X-Forwarded-For")
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty());

    forwarded
        .or_else(|| {
            request
                .headers()
                .get("X-Real-IP")
                .and_then(|h| h.to_str().ok())
                .map(str::trim)
                .filter(|ip| !ip.is_empty())
        })
        .map(str::to_string)
}

/// Per-client rate limiting.
///
/// Requests are denied when the counter store is unreachable.
pub async fn rate_limit_middleware(
    State(limiter): State<RateLimiter>,
    request: Request,
    next: Next,
) -> Result<Response, RateLimitError> {
    let bucket = Bucket::for_method(request.method());
    let limit = bucket.limit();
    let client_id = limiter.client_identifier(&request);
    let key = format!("{}:{}", bucket.prefix(), client_id);

    let count = match limiter.store.hit(&key, RATE_LIMIT_WINDOW_SECONDS).await {
        Ok(count) => count,
        Err(e) => {
            tracing::error!(error = %e, "Rate limit check failed - denying request");
            return Err(RateLimitError {
                retry_after: RATE_LIMIT_WINDOW_SECONDS,
            });
        }
    };

    if count > limit {
        tracing::warn!(
            client = %client_id,
            bucket = bucket.prefix(),
            count = count,
            "Rate limit exceeded"
        );
        return Err(RateLimitError {
            retry_after: RATE_LIMIT_WINDOW_SECONDS,
        });
    }

    let mut response = next.run(request).await;

    let remaining = limit.saturating_sub(count);
    let headers = response.headers_mut();
    headers.insert("X-RateLimit-Limit", HeaderValue::from(limit));
    headers.insert("X-RateLimit-Remaining", HeaderValue::from(remaining));

    Ok(response)
}
