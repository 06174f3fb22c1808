//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod post;

pub use post::{ActiveModel as PostActiveModel, Entity as PostEntity, Model as PostModel};
