//! Request bodies for the post endpoints.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Write a new post
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePostRequest {
    /// Author display name
    #[validate(
        custom(function = "not_blank", message = "Author is required"),
        length(min = 2, max = 20, message = "Author must be 2 to 20 characters")
    )]
    #[schema(example = "Alice", min_length = 2, max_length = 20)]
    pub author: String,
    /// Password that guards later edits and deletion
    #[validate(
        custom(function = "not_blank", message = "Password is required"),
        length(min = 4, max = 20, message = "Password must be 4 to 20 characters")
    )]
    #[schema(example = "1234", min_length = 4, max_length = 20)]
    pub password: String,
    #[validate(
        custom(function = "not_blank", message = "Title is required"),
        length(max = 100, message = "Title must be at most 100 characters")
    )]
    #[schema(example = "Hello, board", max_length = 100)]
    pub title: String,
    #[validate(
        custom(function = "not_blank", message = "Content is required"),
        length(max = 5000, message = "Content must be at most 5000 characters")
    )]
    #[schema(example = "First post!", max_length = 5000)]
    pub content: String,
}

/// Replace the title and content of a post
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePostRequest {
    /// Password given when the post was written
    #[validate(custom(function = "not_blank", message = "Password is required"))]
    #[schema(example = "1234")]
    pub password: String,
    #[validate(
        custom(function = "not_blank", message = "Title is required"),
        length(max = 100, message = "Title must be at most 100 characters")
    )]
    #[schema(example = "Edited title", max_length = 100)]
    pub title: String,
    #[validate(
        custom(function = "not_blank", message = "Content is required"),
        length(max = 5000, message = "Content must be at most 5000 characters")
    )]
    #[schema(example = "Edited content", max_length = 5000)]
    pub content: String,
}

/// Confirm deletion of a post
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DeletePostRequest {
    /// Password given when the post was written
    #[validate(custom(function = "not_blank", message = "Password is required"))]
    #[schema(example = "1234")]
    pub password: String,
}

/// Rejects empty and whitespace-only strings
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        MAX_AUTHOR_LENGTH, MAX_CONTENT_LENGTH, MAX_PASSWORD_LENGTH, MAX_TITLE_LENGTH,
        MIN_AUTHOR_LENGTH, MIN_PASSWORD_LENGTH,
    };

    fn create(author: &str, password: &str, title: &str, content: &str) -> CreatePostRequest {
        CreatePostRequest {
            author: author.to_string(),
            password: password.to_string(),
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    fn failed_fields(result: Result<(), validator::ValidationErrors>) -> Vec<String> {
        let mut fields: Vec<String> = result
            .unwrap_err()
            .field_errors()
            .keys()
            .map(|f| f.to_string())
            .collect();
        fields.sort();
        fields
    }

    #[test]
    fn test_valid_create_request() {
        assert!(create("Alice", "1234", "Hi", "Body").validate().is_ok());
    }

    #[test]
    fn test_create_length_bounds() {
        let author_min = "a".repeat(MIN_AUTHOR_LENGTH as usize);
        let author_max = "a".repeat(MAX_AUTHOR_LENGTH as usize);
        let password_min = "p".repeat(MIN_PASSWORD_LENGTH as usize);
        let password_max = "p".repeat(MAX_PASSWORD_LENGTH as usize);
        let title_max = "t".repeat(MAX_TITLE_LENGTH as usize);
        let content_max = "c".repeat(MAX_CONTENT_LENGTH as usize);

        assert!(create(&author_min, &password_min, &title_max, &content_max)
            .validate()
            .is_ok());
        assert!(create(&author_max, &password_max, "t", "c").validate().is_ok());

        let too_long = create(
            &format!("{}a", author_max),
            &format!("{}p", password_max),
            &format!("{}t", title_max),
            &format!("{}c", content_max),
        );
        assert_eq!(
            failed_fields(too_long.validate()),
            vec!["author", "content", "password", "title"]
        );
    }

    #[test]
    fn test_create_rejects_short_values() {
        assert_eq!(
            failed_fields(create("A", "123", "Hi", "Body").validate()),
            vec!["author", "password"]
        );
    }

    #[test]
    fn test_blank_values_rejected() {
        assert_eq!(
            failed_fields(create("   ", "    ", " ", "\n").validate()),
            vec!["author", "content", "password", "title"]
        );
    }

    #[test]
    fn test_update_request_only_requires_password_present() {
        let request = UpdatePostRequest {
            password: "x".to_string(),
            title: "Title".to_string(),
            content: "Body".to_string(),
        };
        assert!(request.validate().is_ok());

        let blank = UpdatePostRequest {
            password: " ".to_string(),
            title: "Title".to_string(),
            content: String::new(),
        };
        assert_eq!(failed_fields(blank.validate()), vec!["content", "password"]);
    }

    #[test]
    fn test_delete_request_requires_password() {
        let request = DeletePostRequest {
            password: String::new(),
        };
        assert_eq!(failed_fields(request.validate()), vec!["password"]);
    }

    #[test]
    fn test_length_counts_characters() {
        // 20 multi-byte characters is still a valid author
        let author = "가".repeat(20);
        assert!(create(&author, "1234", "Hi", "Body").validate().is_ok());
    }
}
