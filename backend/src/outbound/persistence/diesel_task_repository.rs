//! PostgreSQL-backed `TaskRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{TaskRepository, TaskRepositoryError};
use crate::domain::{CategoryId, PageRequest, Task, TaskId, TaskPriority, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewTaskRow, TaskRow, TaskUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::tasks;

/// Diesel-backed implementation of the `TaskRepository` port.
#[derive(Clone)]
pub struct DieselTaskRepository {
    pool: DbPool,
}

impl DieselTaskRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> TaskRepositoryError {
    map_pool_error(error, |message| {
        TaskRepositoryError::connection(message)
    })
}

fn diesel_error(error: diesel::result::Error) -> TaskRepositoryError {
    map_diesel_error(
        error,
        TaskRepositoryError::query,
        TaskRepositoryError::connection,
    )
}

fn row_to_task(row: TaskRow) -> Task {
    let priority = row.priority.parse::<TaskPriority>().unwrap_or_else(|err| {
        warn!(%err, task_id = %row.id, "unrecognised priority, defaulting to medium");
        TaskPriority::default()
    });
    Task {
        id: TaskId::from_uuid(row.id),
        owner_id: UserId::from_uuid(row.owner_id),
        title: row.title,
        description: row.description,
        priority,
        is_completed: row.is_completed,
        category_id: row.category_id.map(CategoryId::from_uuid),
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

#[async_trait]
impl TaskRepository for DieselTaskRepository {
    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, TaskRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<TaskRow> = tasks::table
            .find(id.as_uuid())
            .select(TaskRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        Ok(row.map(row_to_task))
    }

    async fn list(
        &self,
        owner: Option<UserId>,
        page: PageRequest,
    ) -> Result<Vec<Task>, TaskRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let mut query = tasks::table.select(TaskRow::as_select()).into_boxed();
        if let Some(owner) = owner {
            query = query.filter(tasks::owner_id.eq(*owner.as_uuid()));
        }
        let rows: Vec<TaskRow> = query
            .order((tasks::created_at.asc(), tasks::id.asc()))
            .offset(page.offset())
            .limit(page.limit())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(rows.into_iter().map(row_to_task).collect())
    }

    async fn insert(&self, task: &Task) -> Result<(), TaskRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row = NewTaskRow {
            id: *task.id.as_uuid(),
            owner_id: *task.owner_id.as_uuid(),
            title: &task.title,
            description: &task.description,
            priority: task.priority.as_str(),
            is_completed: task.is_completed,
            category_id: task.category_id.map(|id| *id.as_uuid()),
            created_at: task.created_at,
            updated_at: task.updated_at,
        };
        diesel::insert_into(tasks::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn update(&self, task: &Task) -> Result<(), TaskRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let changes = TaskUpdate {
            title: &task.title,
            description: &task.description,
            priority: task.priority.as_str(),
            is_completed: task.is_completed,
            category_id: task.category_id.map(|id| *id.as_uuid()),
            updated_at: task.updated_at,
        };
        let updated = diesel::update(tasks::table.find(task.id.as_uuid()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        if updated == 0 {
            return Err(TaskRepositoryError::query("task vanished before update"));
        }
        Ok(())
    }

    async fn delete(&self, id: &TaskId) -> Result<(), TaskRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        diesel::delete(tasks::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }
}
