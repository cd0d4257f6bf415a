//! Driving port for task mutations.
//!
//! Inbound adapters call this port with an already-authenticated caller; the
//! implementation performs existence and ownership checks and reports every
//! outcome through an [`OperationResult`].

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::domain::{
    CallerIdentity, CategoryId, OperationResult, TaskId, TaskPatch, TaskPayload, TaskPriority,
};

/// Request to create a task owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    /// Account creating the task.
    pub caller: CallerIdentity,
    /// Client-chosen identifier; a random one is generated when absent.
    pub id: Option<TaskId>,
    /// Validated title.
    pub title: String,
    /// Validated description.
    pub description: String,
    pub priority: TaskPriority,
    pub is_completed: bool,
    /// Category to attach; must exist.
    pub category_id: Option<CategoryId>,
}

/// Request to patch an existing task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    pub caller: CallerIdentity,
    pub id: TaskId,
    pub patch: TaskPatch,
}

/// Request to delete a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteTaskRequest {
    pub caller: CallerIdentity,
    pub id: TaskId,
}

/// Driving port for task mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskCommand: Send + Sync {
    /// Create a task; fails with `NotFound` when the category is missing.
    async fn create(
        &self,
        request: CreateTaskRequest,
        cancel: &CancellationToken,
    ) -> OperationResult<TaskPayload>;

    /// Apply a patch; fails with `NotFound` or `UserNotAllowed`.
    async fn update(
        &self,
        request: UpdateTaskRequest,
        cancel: &CancellationToken,
    ) -> OperationResult<TaskPayload>;

    /// Delete a task; fails with `NotFound` or `UserNotAllowed`.
    async fn delete(
        &self,
        request: DeleteTaskRequest,
        cancel: &CancellationToken,
    ) -> OperationResult<()>;
}
