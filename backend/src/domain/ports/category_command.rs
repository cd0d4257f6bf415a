//! Driving port for category mutations. Only administrators may mutate.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::domain::{CallerIdentity, CategoryId, CategoryName, CategoryPayload, OperationResult};

/// Request to create a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCategoryRequest {
    pub caller: CallerIdentity,
    /// Client-chosen identifier; a random one is generated when absent.
    pub id: Option<CategoryId>,
    pub name: CategoryName,
}

/// Request to rename a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameCategoryRequest {
    pub caller: CallerIdentity,
    pub id: CategoryId,
    pub name: CategoryName,
}

/// Request to delete a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteCategoryRequest {
    pub caller: CallerIdentity,
    pub id: CategoryId,
}

/// Driving port for category mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryCommand: Send + Sync {
    /// Create a category.
    async fn create(
        &self,
        request: CreateCategoryRequest,
        cancel: &CancellationToken,
    ) -> OperationResult<CategoryPayload>;

    /// Rename a category.
    async fn rename(
        &self,
        request: RenameCategoryRequest,
        cancel: &CancellationToken,
    ) -> OperationResult<CategoryPayload>;

    /// Delete a category.
    async fn delete(
        &self,
        request: DeleteCategoryRequest,
        cancel: &CancellationToken,
    ) -> OperationResult<()>;
}
