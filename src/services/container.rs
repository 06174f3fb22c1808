//! Service Container - Centralized service access.
//!
//! Wires repositories into services once, so handlers only see traits.

use std::sync::Arc;

use super::{PostManager, PostService};
use crate::infra::PostStore;

/// Services built on one database connection
pub struct Services {
    post_service: Arc<dyn PostService>,
}

impl Services {
    /// Create service container from a database connection
    pub fn from_connection(db: sea_orm::DatabaseConnection) -> Self {
        let post_repo = Arc::new(PostStore::new(db));
        let post_service = Arc::new(PostManager::new(post_repo));

        Self { post_service }
    }

    /// Get post service
    pub fn posts(&self) -> Arc<dyn PostService> {
        self.post_service.clone()
    }
}
