//! Post domain entity and related types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::Password;

/// Post domain entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: i32,
    pub author: String,
    pub password_hash: String,
    pub title: String,
    pub content: String,
    pub view_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Soft delete timestamp (None = visible, Some = deleted)
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Check a plain text password against the stored hash
    pub fn password_matches(&self, plain_text: &str) -> bool {
        Password::from_hash(self.password_hash.clone()).verify(plain_text)
    }

    /// Replace title and content
    pub fn update(&mut self, title: String, content: String) {
        self.title = title;
        self.content = content;
        self.updated_at = Utc::now();
    }

    /// Soft delete the post
    pub fn soft_delete(&mut self) {
        let now = Utc::now();
        self.deleted_at = Some(now);
        self.updated_at = now;
    }
}

/// Full post representation (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    /// Post identifier
    #[schema(example = 1)]
    pub id: i32,
    /// Author display name
    #[schema(example = "Alice")]
    pub author: String,
    /// Post title
    #[schema(example = "Hello, board")]
    pub title: String,
    /// Post body
    #[schema(example = "First post!")]
    pub content: String,
    /// Number of detail views
    #[schema(example = 3)]
    pub view_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            author: post.author,
            title: post.title,
            content: post.content,
            view_count: post.view_count,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Post list row (no content)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Alice")]
    pub author: String,
    #[schema(example = "Hello, board")]
    pub title: String,
    #[schema(example = 3)]
    pub view_count: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Post> for PostSummary {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            author: post.author,
            title: post.title,
            view_count: post.view_count,
            created_at: post.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post() -> Post {
        let now = Utc::now();
        Post {
            id: 7,
            author: "Alice".to_string(),
            password_hash: Password::new("1234").unwrap().into_string(),
            title: "Title".to_string(),
            content: "Body".to_string(),
            view_count: 0,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[test]
    fn test_update_replaces_fields() {
        let mut post = sample_post();
        let before = post.updated_at;
        post.update("New".to_string(), "Changed".to_string());

        assert_eq!(post.title, "New");
        assert_eq!(post.content, "Changed");
        assert!(post.updated_at >= before);
    }

    #[test]
    fn test_soft_delete() {
        let mut post = sample_post();
        let before = post.updated_at;
        post.soft_delete();
        assert_eq!(post.deleted_at, Some(post.updated_at));
        assert!(post.updated_at >= before);
    }

    #[test]
    fn test_password_matches() {
        let post = sample_post();
        assert!(post.password_matches("1234"));
        assert!(!post.password_matches("0000"));
    }

    #[test]
    fn test_response_uses_camel_case_and_hides_password() {
        let mut post = sample_post();
        post.view_count = 1;
        let json = serde_json::to_value(PostResponse::from(post)).unwrap();

        assert_eq!(json["viewCount"], 1);
        assert!(json.get("createdAt").is_some());
        assert!(json.get("password").is_none());
        assert!(json.get("passwordHash").is_none());
    }

    #[test]
    fn test_summary_omits_content() {
        let json = serde_json::to_value(PostSummary::from(sample_post())).unwrap();
        assert!(json.get("content").is_none());
        assert_eq!(json["title"], "Title");
    }
}
