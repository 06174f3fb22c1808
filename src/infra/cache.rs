//! Redis-backed request counters.
//!
//! Only used for rate limiting; the board itself keeps no cached state.

use async_trait::async_trait;
use redis::{aio::ConnectionManager, Client, Pipeline, RedisError};

use crate::config::CACHE_PREFIX_RATE_LIMIT;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Fixed-window hit counter.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Count one hit for `identifier` and return the hits in the current
    /// window. The first hit opens a window of `window_seconds`.
    async fn hit(&self, identifier: &str, window_seconds: u64) -> AppResult<u64>;

    /// Check the store is reachable.
    async fn ping(&self) -> AppResult<()>;
}

/// Redis connection wrapper with connection pooling.
#[derive(Clone)]
pub struct Cache {
    connection: ConnectionManager,
}

impl Cache {
    /// Connect to Redis.
    pub async fn connect(redis_url: &str) -> Result<Self, RedisError> {
        let client = Client::open(redis_url)?;
        let connection = ConnectionManager::new(client).await?;

        tracing::info!("Redis rate limiter connected");

        Ok(Self { connection })
    }
}

#[async_trait]
impl CounterStore for Cache {
    async fn hit(&self, identifier: &str, window_seconds: u64) -> AppResult<u64> {
        let key = rate_limit_key(identifier);
        let mut conn = self.connection.clone();

        let (count,): (i64,) = window_pipeline(&key, window_seconds)
            .query_async(&mut conn)
            .await
            .map_err(cache_error)?;

        Ok(count.max(0) as u64)
    }

    async fn ping(&self) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(cache_error)?;
        Ok(())
    }
}

/// `SET key 0 EX ttl NX` then `INCR key`, in one MULTI/EXEC.
///
/// The TTL is attached when the key is created, so a counter can never
/// outlive its window.
fn window_pipeline(key: &str, window_seconds: u64) -> Pipeline {
    let mut pipe = redis::pipe();
    pipe.atomic()
        .cmd("SET")
        .arg(key)
        .arg(0)
        .arg("EX")
        .arg(window_seconds)
        .arg("NX")
        .ignore()
        .incr(key, 1);
    pipe
}

fn rate_limit_key(identifier: &str) -> String {
    format!("{}{}", CACHE_PREFIX_RATE_LIMIT, identifier)
}

/// Convert Redis error to AppError.
fn cache_error(e: RedisError) -> AppError {
    tracing::error!("Redis error: {}", e);
    AppError::internal(format!("Cache error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_key_prefix() {
        assert_eq!(rate_limit_key("write:10.0.0.1"), "rate_limit:write:10.0.0.1");
    }

    #[test]
    fn test_window_pipeline_sets_ttl_with_counter() {
        let packed = window_pipeline("rate_limit:write:10.0.0.1", 60).get_packed_pipeline();
        let text = String::from_utf8_lossy(&packed);

        let multi = text.find("MULTI").unwrap();
        let set = text.find("SET").unwrap();
        let incr = text.find("INCR").unwrap();
        let exec = text.find("EXEC").unwrap();

        // Expiry is created together with the key, inside the transaction
        assert!(multi < set && set < incr && incr < exec);
        assert!(text.contains("\r\nEX\r\n"));
        assert!(text.contains("\r\nNX\r\n"));
        assert!(text.contains("\r\n60\r\n"));
        assert!(!text.contains("EXPIRE"));
    }
}
