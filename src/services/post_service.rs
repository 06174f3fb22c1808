//! Post service - Board use cases.
//!
//! Edits and deletions are authorized solely by the password chosen when
//! the post was written.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Password, Post, PostResponse, PostSummary};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::PostRepository;
use crate::types::{Paginated, PaginationParams};

/// Post service trait for dependency injection.
#[async_trait]
pub trait PostService: Send + Sync {
    /// One page of visible posts, newest first
    async fn list_posts(&self, params: PaginationParams) -> AppResult<Paginated<PostSummary>>;

    /// Read a post, counting the view
    async fn get_post(&self, id: i32) -> AppResult<PostResponse>;

    /// Write a new post protected by `password`
    async fn create_post(
        &self,
        author: String,
        password: String,
        title: String,
        content: String,
    ) -> AppResult<PostResponse>;

    /// Edit a post after checking its password
    async fn update_post(
        &self,
        id: i32,
        password: String,
        title: String,
        content: String,
    ) -> AppResult<PostResponse>;

    /// Soft delete a post after checking its password
    async fn delete_post(&self, id: i32, password: String) -> AppResult<()>;
}

/// Concrete implementation of PostService.
pub struct PostManager {
    posts: Arc<dyn PostRepository>,
}

impl PostManager {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    async fn load(&self, id: i32) -> AppResult<Post> {
        self.posts.find_by_id(id).await?.ok_or_not_found()
    }

    /// Check `password` against the post's hash on the blocking pool,
    /// handing the post back on success.
    async fn authorize(post: Post, password: String) -> AppResult<Post> {
        let (post, matches) = tokio::task::spawn_blocking(move || {
            let matches = post.password_matches(&password);
            (post, matches)
        })
        .await
        .map_err(|e| AppError::internal(format!("Password check aborted: {}", e)))?;

        if matches {
            Ok(post)
        } else {
            tracing::warn!(post_id = post.id, "Password mismatch");
            Err(AppError::PasswordMismatch)
        }
    }
}

#[async_trait]
impl PostService for PostManager {
    async fn list_posts(&self, params: PaginationParams) -> AppResult<Paginated<PostSummary>> {
        let page = params.page();
        let per_page = params.limit();
        let (posts, total) = self.posts.find_page(params).await?;
        Ok(Paginated::new(posts, page, per_page, total).map(PostSummary::from))
    }

    async fn get_post(&self, id: i32) -> AppResult<PostResponse> {
        let post = self.posts.increment_view_count(id).await?.ok_or_not_found()?;
        Ok(PostResponse::from(post))
    }

    async fn create_post(
        &self,
        author: String,
        password: String,
        title: String,
        content: String,
    ) -> AppResult<PostResponse> {
        let password_hash = tokio::task::spawn_blocking(move || Password::new(&password))
            .await
            .map_err(|e| AppError::internal(format!("Password hashing aborted: {}", e)))??
            .into_string();

        let post = self
            .posts
            .create(author, password_hash, title, content)
            .await?;

        tracing::info!(post_id = post.id, "Post created");
        Ok(PostResponse::from(post))
    }

    async fn update_post(
        &self,
        id: i32,
        password: String,
        title: String,
        content: String,
    ) -> AppResult<PostResponse> {
        let mut post = Self::authorize(self.load(id).await?, password).await?;
        post.update(title, content);

        let updated = self.posts.save(post).await?;
        tracing::info!(post_id = id, "Post updated");
        Ok(PostResponse::from(updated))
    }

    async fn delete_post(&self, id: i32, password: String) -> AppResult<()> {
        let mut post = Self::authorize(self.load(id).await?, password).await?;
        post.soft_delete();

        self.posts.save(post).await?;
        tracing::info!(post_id = id, "Post deleted");
        Ok(())
    }
}
