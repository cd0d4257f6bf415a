//! Driving port for reading categories. Open to every authenticated role.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::domain::{CategoryId, CategoryPayload, OperationResult, Page, PageRequest};

/// Driving port for category reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryQuery: Send + Sync {
    /// Fetch one category.
    async fn get(
        &self,
        id: CategoryId,
        cancel: &CancellationToken,
    ) -> OperationResult<CategoryPayload>;

    /// List one page of categories.
    async fn list(
        &self,
        page: PageRequest,
        cancel: &CancellationToken,
    ) -> OperationResult<Page<CategoryPayload>>;
}
