//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Pagination
// =============================================================================

/// Default number of posts per page
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Maximum allowed posts per page to prevent excessive queries
pub const MAX_PAGE_SIZE: u64 = 100;

/// Default starting page number (1-indexed)
pub const DEFAULT_PAGE_NUMBER: u64 = 1;

// =============================================================================
// Post constraints
// =============================================================================

/// Author name length bounds
pub const MIN_AUTHOR_LENGTH: u64 = 2;
pub const MAX_AUTHOR_LENGTH: u64 = 20;

/// Post password length bounds (plain text, before hashing)
pub const MIN_PASSWORD_LENGTH: u64 = 4;
pub const MAX_PASSWORD_LENGTH: u64 = 20;

/// Maximum title length
pub const MAX_TITLE_LENGTH: u64 = 100;

/// Maximum content length
pub const MAX_CONTENT_LENGTH: u64 = 5000;

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Versioned prefix for the post API
pub const API_PREFIX: &str = "/api/v1/posts";

// =============================================================================
// Database
// =============================================================================

/// Embedded development database (created on first use)
pub const DEFAULT_DEV_DATABASE_URL: &str = "sqlite://board.db?mode=rwc";

/// Default connection pool size
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;

// =============================================================================
// Rate Limiting (Redis)
// =============================================================================

/// Cache key prefix for rate limiting
pub const CACHE_PREFIX_RATE_LIMIT: &str = "rate_limit:";

/// Read requests per window
pub const RATE_LIMIT_READ_REQUESTS: u64 = 100;

/// Write requests per window (password-checked endpoints)
pub const RATE_LIMIT_WRITE_REQUESTS: u64 = 10;

/// Rate limit window in seconds (1 minute)
pub const RATE_LIMIT_WINDOW_SECONDS: u64 = 60;

/// Upper bound on the initial Redis connection attempt
pub const REDIS_CONNECT_TIMEOUT_SECONDS: u64 = 5;
