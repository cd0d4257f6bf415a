//! Port for category persistence.

use async_trait::async_trait;

use crate::domain::{Category, CategoryId, PageRequest};

use super::define_port_error;

define_port_error! {
    /// Errors raised by category repository adapters.
    pub enum CategoryRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "category repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "category repository query failed: {message}",
    }
}

/// Port for category storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Fetch a category by id, returning `None` when it does not exist.
    async fn find_by_id(&self, id: &CategoryId)
    -> Result<Option<Category>, CategoryRepositoryError>;

    /// List categories ordered by name.
    async fn list(&self, page: PageRequest) -> Result<Vec<Category>, CategoryRepositoryError>;

    /// Store a new category.
    async fn insert(&self, category: &Category) -> Result<(), CategoryRepositoryError>;

    /// Overwrite an existing category.
    async fn update(&self, category: &Category) -> Result<(), CategoryRepositoryError>;

    /// Remove a category; tasks referencing it are detached.
    async fn delete(&self, id: &CategoryId) -> Result<(), CategoryRepositoryError>;
}
