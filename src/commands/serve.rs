//! Serve command - Starts the HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use crate::api::middleware::RateLimiter;
use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::{Config, REDIS_CONNECT_TIMEOUT_SECONDS};
use crate::errors::{AppError, AppResult};
use crate::infra::{Cache, Database};

/// Execute the serve command
pub async fn execute(args: ServeArgs, mut config: Config) -> AppResult<()> {
    tracing::info!(profile = ?config.profile, "Starting server...");

    if let Some(host) = args.host {
        config.server_host = host;
    }
    if let Some(port) = args.port {
        config.server_port = port;
    }

    // Pending migrations are applied on connect
    let db = Database::connect(&config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;
    tracing::info!("Database connected");

    let rate_limiter = connect_rate_limiter(&config).await?;

    let app_state = AppState::from_database(Arc::new(db), rate_limiter);
    let app = create_router(app_state);

    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Connect Redis when configured.
///
/// An unreachable Redis aborts startup rather than serving without limits.
async fn connect_rate_limiter(config: &Config) -> AppResult<Option<RateLimiter>> {
    let Some(url) = config.redis_url.as_deref() else {
        tracing::info!("REDIS_URL not set, rate limiting disabled");
        return Ok(None);
    };

    let timeout = Duration::from_secs(REDIS_CONNECT_TIMEOUT_SECONDS);
    let cache = tokio::time::timeout(timeout, Cache::connect(url))
        .await
        .map_err(|_| {
            AppError::internal(format!(
                "Redis connection timed out after {}s",
                REDIS_CONNECT_TIMEOUT_SECONDS
            ))
        })?
        .map_err(|e| AppError::internal(format!("Redis connection failed: {}", e)))?;

    if config.trust_proxy_headers {
        tracing::info!("Rate limiting keyed on proxy headers");
    }

    Ok(Some(RateLimiter::new(
        Arc::new(cache),
        config.trust_proxy_headers,
    )))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_no_limiter_without_redis_url() {
        let config = Config::with_database_url("sqlite::memory:");
        let limiter = connect_rate_limiter(&config).await.unwrap();
        assert!(limiter.is_none());
    }

    #[tokio::test]
    async fn test_invalid_redis_url_aborts_startup() {
        let mut config = Config::with_database_url("sqlite::memory:");
        config.redis_url = Some("not-a-redis-url".to_string());

        let result = connect_rate_limiter(&config).await;
        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn test_unreachable_redis_aborts_startup() {
        let mut config = Config::with_database_url("sqlite::memory:");
        config.redis_url = Some("redis://127.0.0.1:1".to_string());

        let started = std::time::Instant::now();
        let result = connect_rate_limiter(&config).await;

        assert!(result.is_err());
        assert!(started.elapsed() < Duration::from_secs(REDIS_CONNECT_TIMEOUT_SECONDS + 5));
    }
}
