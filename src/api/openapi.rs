//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::dto::{CreatePostRequest, DeletePostRequest, UpdatePostRequest};
use crate::api::handlers::post_handler;
use crate::domain::{PostResponse, PostSummary};
use crate::errors::{ErrorResponse, FieldError};
use crate::types::{PaginationMeta, PostPage};

/// OpenAPI documentation for the Board API
///
/// Successful bodies are wrapped as `{ "success": true, "data": ... }`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Board API",
        version = "0.1.0",
        description = "Anonymous bulletin board. Posts are protected by a per-post password \
                       instead of user accounts. Success bodies use the \
                       `{ success, data }` envelope."
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        post_handler::list_posts,
        post_handler::get_post,
        post_handler::create_post,
        post_handler::update_post,
        post_handler::delete_post,
    ),
    components(
        schemas(
            PostResponse,
            PostSummary,
            PostPage,
            PaginationMeta,
            CreatePostRequest,
            UpdatePostRequest,
            DeletePostRequest,
            ErrorResponse,
            FieldError,
        )
    ),
    tags(
        (name = "Posts", description = "Board post operations")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_post_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        assert!(paths.iter().any(|p| p.as_str() == "/api/v1/posts"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/v1/posts/{id}"));
    }

    #[test]
    fn test_list_response_is_a_page_object() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();

        let schema = &doc["paths"]["/api/v1/posts"]["get"]["responses"]["200"]["content"]
            ["application/json"]["schema"];
        assert_eq!(schema["$ref"], "#/components/schemas/PostPage");
        assert!(schema.get("type").is_none());

        let page = &doc["components"]["schemas"]["PostPage"];
        assert!(page["properties"]["items"].is_object());
        assert!(page["properties"]["meta"].is_object());
    }
}
