//! Driving port for reading tasks.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::domain::{CallerIdentity, OperationResult, Page, PageRequest, TaskId, TaskPayload};

/// Driving port for task reads.
///
/// Non-admin callers only ever see tasks they own.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskQuery: Send + Sync {
    /// Fetch one task.
    async fn get(
        &self,
        caller: CallerIdentity,
        id: TaskId,
        cancel: &CancellationToken,
    ) -> OperationResult<TaskPayload>;

    /// List one page of tasks visible to the caller.
    async fn list(
        &self,
        caller: CallerIdentity,
        page: PageRequest,
        cancel: &CancellationToken,
    ) -> OperationResult<Page<TaskPayload>>;
}
