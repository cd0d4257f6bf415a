//! PostgreSQL-backed `CategoryRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CategoryRepository, CategoryRepositoryError};
use crate::domain::{Category, CategoryId, CategoryName, PageRequest};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{CategoryRow, CategoryUpdate, NewCategoryRow};
use super::pool::{DbPool, PoolError};
use super::schema::categories;

/// Diesel-backed implementation of the `CategoryRepository` port.
#[derive(Clone)]
pub struct DieselCategoryRepository {
    pool: DbPool,
}

impl DieselCategoryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> CategoryRepositoryError {
    map_pool_error(error, |message| {
        CategoryRepositoryError::connection(message)
    })
}

fn diesel_error(error: diesel::result::Error) -> CategoryRepositoryError {
    map_diesel_error(
        error,
        CategoryRepositoryError::query,
        CategoryRepositoryError::connection,
    )
}

fn row_to_category(row: CategoryRow) -> Result<Category, CategoryRepositoryError> {
    let name = CategoryName::new(&row.name).map_err(|err| {
        CategoryRepositoryError::query(format!("stored category {} is invalid: {err}", row.id))
    })?;
    Ok(Category {
        id: CategoryId::from_uuid(row.id),
        name,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[async_trait]
impl CategoryRepository for DieselCategoryRepository {
    async fn find_by_id(
        &self,
        id: &CategoryId,
    ) -> Result<Option<Category>, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<CategoryRow> = categories::table
            .find(id.as_uuid())
            .select(CategoryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_category).transpose()
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<Category>, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<CategoryRow> = categories::table
            .select(CategoryRow::as_select())
            .order((categories::name.asc(), categories::id.asc()))
            .offset(page.offset())
            .limit(page.limit())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter().map(row_to_category).collect()
    }

    async fn insert(&self, category: &Category) -> Result<(), CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row = NewCategoryRow {
            id: *category.id.as_uuid(),
            name: category.name.as_str(),
            created_at: category.created_at,
            updated_at: category.updated_at,
        };
        diesel::insert_into(categories::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn update(&self, category: &Category) -> Result<(), CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let changes = CategoryUpdate {
            name: category.name.as_str(),
            updated_at: category.updated_at,
        };
        let updated = diesel::update(categories::table.find(category.id.as_uuid()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        if updated == 0 {
            return Err(CategoryRepositoryError::query(
                "category vanished before update",
            ));
        }
        Ok(())
    }

    async fn delete(&self, id: &CategoryId) -> Result<(), CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        diesel::delete(categories::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }
}
