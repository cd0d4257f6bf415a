//! Port for task persistence.
//!
//! Every call is its own unit of work; adapters commit before returning.

use async_trait::async_trait;

use crate::domain::{PageRequest, Task, TaskId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by task repository adapters.
    pub enum TaskRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "task repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "task repository query failed: {message}",
    }
}

/// Port for task storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Fetch a task by id, returning `None` when it does not exist.
    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, TaskRepositoryError>;

    /// List tasks ordered by creation time, newest first.
    ///
    /// `owner` restricts the listing to a single account; `None` lists every
    /// task.
    async fn list(
        &self,
        owner: Option<UserId>,
        page: PageRequest,
    ) -> Result<Vec<Task>, TaskRepositoryError>;

    /// Store a new task.
    async fn insert(&self, task: &Task) -> Result<(), TaskRepositoryError>;

    /// Overwrite an existing task.
    async fn update(&self, task: &Task) -> Result<(), TaskRepositoryError>;

    /// Remove a task.
    async fn delete(&self, id: &TaskId) -> Result<(), TaskRepositoryError>;
}
