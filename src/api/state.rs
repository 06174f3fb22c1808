//! Application state - Dependency injection container.
//!
//! Provides centralized access to the post service and infrastructure.

use std::sync::Arc;

use super::middleware::RateLimiter;
use crate::infra::Database;
use crate::services::{PostService, Services};

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// Post service
    pub post_service: Arc<dyn PostService>,
    /// Database connection
    pub database: Arc<Database>,
    /// Request limiter, absent when `REDIS_URL` is unset
    pub rate_limiter: Option<RateLimiter>,
}

impl AppState {
    /// Build the service graph on top of an open database.
    pub fn from_database(database: Arc<Database>, rate_limiter: Option<RateLimiter>) -> Self {
        let services = Services::from_connection(database.get_connection());

        Self {
            post_service: services.posts(),
            database,
            rate_limiter,
        }
    }

    /// Create new application state with manually injected services.
    pub fn new(
        post_service: Arc<dyn PostService>,
        database: Arc<Database>,
        rate_limiter: Option<RateLimiter>,
    ) -> Self {
        Self {
            post_service,
            database,
            rate_limiter,
        }
    }
}
