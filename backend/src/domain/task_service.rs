//! Task use-case handlers.
//!
//! Each operation runs `validate → authorize → persist → map`; any stage may
//! short-circuit, and nothing is written once a stage has failed.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tokio_util::sync::CancellationToken;

use crate::domain::ports::{
    CategoryRepository, CreateTaskRequest, DeleteTaskRequest, TaskCommand, TaskQuery,
    TaskRepository, UpdateTaskRequest,
};
use crate::domain::{
    CallerIdentity, CategoryId, Error, OperationResult, Page, PageRequest, Task, TaskId,
    TaskPayload, guard_persistence,
};

/// Task service implementing the task driving ports.
#[derive(Clone)]
pub struct TaskService<T, C> {
    tasks: Arc<T>,
    categories: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<T, C> TaskService<T, C> {
    /// Create a new service over the given repositories.
    pub fn new(tasks: Arc<T>, categories: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            tasks,
            categories,
            clock,
        }
    }
}

fn task_not_found(id: &TaskId) -> Error {
    Error::not_found(format!("No task found with id {id}"))
}

fn category_not_found(id: &CategoryId) -> Error {
    Error::not_found(format!("No category found with id {id}"))
}

impl<T, C> TaskService<T, C>
where
    T: TaskRepository,
    C: CategoryRepository,
{
    async fn require_category(
        &self,
        id: &CategoryId,
        cancel: &CancellationToken,
    ) -> Result<(), Error> {
        guard_persistence(cancel, self.categories.find_by_id(id))
            .await?
            .map(|_| ())
            .ok_or_else(|| category_not_found(id))
    }

    async fn load_owned(
        &self,
        caller: &CallerIdentity,
        id: &TaskId,
        cancel: &CancellationToken,
    ) -> Result<Task, Error> {
        let task = guard_persistence(cancel, self.tasks.find_by_id(id))
            .await?
            .ok_or_else(|| task_not_found(id))?;
        if !caller.may_act_for(&task.owner_id) {
            return Err(Error::user_not_allowed());
        }
        Ok(task)
    }

    async fn create_task(
        &self,
        request: CreateTaskRequest,
        cancel: &CancellationToken,
    ) -> Result<TaskPayload, Error> {
        let CreateTaskRequest {
            caller,
            id,
            title,
            description,
            priority,
            is_completed,
            category_id,
        } = request;
        if let Some(category_id) = category_id.as_ref() {
            self.require_category(category_id, cancel).await?;
        }

        let now = self.clock.utc();
        let task = Task {
            id: id.unwrap_or_else(TaskId::random),
            owner_id: *caller.user_id(),
            title,
            description,
            priority,
            is_completed,
            category_id,
            created_at: now,
            updated_at: now,
        };
        guard_persistence(cancel, self.tasks.insert(&task)).await?;
        Ok(TaskPayload::from(task))
    }

    async fn update_task(
        &self,
        request: UpdateTaskRequest,
        cancel: &CancellationToken,
    ) -> Result<TaskPayload, Error> {
        let UpdateTaskRequest { caller, id, patch } = request;
        let mut task = self.load_owned(&caller, &id, cancel).await?;
        if let Some(category_id) = patch.new_category() {
            self.require_category(&category_id, cancel).await?;
        }

        task.apply(patch, self.clock.utc());
        guard_persistence(cancel, self.tasks.update(&task)).await?;
        Ok(TaskPayload::from(task))
    }

    async fn delete_task(
        &self,
        request: DeleteTaskRequest,
        cancel: &CancellationToken,
    ) -> Result<(), Error> {
        let DeleteTaskRequest { caller, id } = request;
        self.load_owned(&caller, &id, cancel).await?;
        guard_persistence(cancel, self.tasks.delete(&id)).await
    }

    async fn list_tasks(
        &self,
        caller: CallerIdentity,
        page: PageRequest,
        cancel: &CancellationToken,
    ) -> Result<Page<TaskPayload>, Error> {
        let owner = (!caller.is_admin()).then_some(*caller.user_id());
        let tasks = guard_persistence(cancel, self.tasks.list(owner, page)).await?;
        Ok(Page::new(tasks, page).map(TaskPayload::from))
    }
}

#[async_trait]
impl<T, C> TaskCommand for TaskService<T, C>
where
    T: TaskRepository,
    C: CategoryRepository,
{
    async fn create(
        &self,
        request: CreateTaskRequest,
        cancel: &CancellationToken,
    ) -> OperationResult<TaskPayload> {
        self.create_task(request, cancel).await.into()
    }

    async fn update(
        &self,
        request: UpdateTaskRequest,
        cancel: &CancellationToken,
    ) -> OperationResult<TaskPayload> {
        self.update_task(request, cancel).await.into()
    }

    async fn delete(
        &self,
        request: DeleteTaskRequest,
        cancel: &CancellationToken,
    ) -> OperationResult<()> {
        self.delete_task(request, cancel).await.into()
    }
}

#[async_trait]
impl<T, C> TaskQuery for TaskService<T, C>
where
    T: TaskRepository,
    C: CategoryRepository,
{
    async fn get(
        &self,
        caller: CallerIdentity,
        id: TaskId,
        cancel: &CancellationToken,
    ) -> OperationResult<TaskPayload> {
        self.load_owned(&caller, &id, cancel)
            .await
            .map(TaskPayload::from)
            .into()
    }

    async fn list(
        &self,
        caller: CallerIdentity,
        page: PageRequest,
        cancel: &CancellationToken,
    ) -> OperationResult<Page<TaskPayload>> {
        self.list_tasks(caller, page, cancel).await.into()
    }
}

#[cfg(test)]
#[path = "task_service_tests.rs"]
mod tests;
