//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on repository traits, not stores.

pub mod container;
mod post_service;

pub use container::Services;
pub use post_service::{PostManager, PostService};
