//! Post repository implementation with soft delete support.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use super::entities::post::{self, ActiveModel, Entity as PostEntity};
use crate::domain::Post;
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Post repository trait for dependency injection.
///
/// Every method ignores soft-deleted posts.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// One page of visible posts, newest first, plus the total count
    async fn find_page(&self, params: PaginationParams) -> AppResult<(Vec<Post>, u64)>;

    /// Find visible post by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Post>>;

    /// Atomically bump the view counter and return the updated post
    async fn increment_view_count(&self, id: i32) -> AppResult<Option<Post>>;

    /// Insert a new post
    async fn create(
        &self,
        author: String,
        password_hash: String,
        title: String,
        content: String,
    ) -> AppResult<Post>;

    /// Persist an edited or soft-deleted post. The stored row must still
    /// be visible.
    async fn save(&self, post: Post) -> AppResult<Post>;
}

/// Concrete implementation of PostRepository
pub struct PostStore {
    db: DatabaseConnection,
}

impl PostStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_visible_model(&self, id: i32) -> AppResult<post::Model> {
        PostEntity::find_by_id(id)
            .filter(post::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?
            .ok_or(AppError::PostNotFound)
    }
}

#[async_trait]
impl PostRepository for PostStore {
    async fn find_page(&self, params: PaginationParams) -> AppResult<(Vec<Post>, u64)> {
        let paginator = PostEntity::find()
            .filter(post::Column::DeletedAt.is_null())
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .paginate(&self.db, params.limit());

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page() - 1).await?;

        Ok((models.into_iter().map(Post::from).collect(), total))
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Post>> {
        let result = PostEntity::find_by_id(id)
            .filter(post::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Post::from))
    }

    async fn increment_view_count(&self, id: i32) -> AppResult<Option<Post>> {
        let txn = self.db.begin().await?;

        let result = PostEntity::update_many()
            .col_expr(
                post::Column::ViewCount,
                Expr::col(post::Column::ViewCount).add(1),
            )
            .filter(post::Column::Id.eq(id))
            .filter(post::Column::DeletedAt.is_null())
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(None);
        }

        let model = PostEntity::find_by_id(id).one(&txn).await?;
        txn.commit().await?;

        Ok(model.map(Post::from))
    }

    async fn create(
        &self,
        author: String,
        password_hash: String,
        title: String,
        content: String,
    ) -> AppResult<Post> {
        let now = Utc::now();
        let active_model = ActiveModel {
            id: NotSet,
            author: Set(author),
            password_hash: Set(password_hash),
            title: Set(title),
            content: Set(content),
            view_count: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Post::from(model))
    }

    async fn save(&self, post: Post) -> AppResult<Post> {
        let mut active: ActiveModel = self.find_visible_model(post.id).await?.into();
        active.title = Set(post.title);
        active.content = Set(post.content);
        active.updated_at = Set(post.updated_at);
        active.deleted_at = Set(post.deleted_at);

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Post::from(model))
    }
}
