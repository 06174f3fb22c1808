//! Shared response and pagination types.

mod pagination;
mod response;

pub use pagination::{Paginated, PaginationMeta, PaginationParams, PostPage};
pub use response::{ApiResponse, Created, NoContent};
