//! Domain layer - Core business entities and logic
//!
//! Contains the post entity, its client-facing representations and the
//! password value object guarding edits.

pub mod password;
pub mod post;

pub use password::Password;
pub use post::{Post, PostResponse, PostSummary};
