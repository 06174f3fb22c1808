//! Infrastructure layer - External systems integration
//!
//! - Database connection, migrations and repositories
//! - Redis counters for rate limiting

pub mod cache;
pub mod db;
pub mod repositories;

pub use cache::{Cache, CounterStore};
pub use db::{Database, Migrator};
pub use repositories::{PostRepository, PostStore};

#[cfg(any(test, feature = "test-utils"))]
pub use cache::MockCounterStore;
#[cfg(any(test, feature = "test-utils"))]
pub use repositories::MockPostRepository;
