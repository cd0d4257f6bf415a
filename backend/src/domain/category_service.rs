//! Category use-case handlers.
//!
//! Reads are open to every role. Mutations require the admin role and are
//! rejected with `UserNotAllowed` before any persistence call.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tokio_util::sync::CancellationToken;

use crate::domain::ports::{
    CategoryCommand, CategoryQuery, CategoryRepository, CreateCategoryRequest,
    DeleteCategoryRequest, RenameCategoryRequest,
};
use crate::domain::{
    CallerIdentity, Category, CategoryId, CategoryPayload, Error, OperationResult, Page,
    PageRequest, guard_persistence,
};

/// Category service implementing the category driving ports.
#[derive(Clone)]
pub struct CategoryService<C> {
    categories: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<C> CategoryService<C> {
    /// Create a new service over the given repository.
    pub fn new(categories: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self { categories, clock }
    }
}

fn require_admin(caller: &CallerIdentity) -> Result<(), Error> {
    if caller.is_admin() {
        Ok(())
    } else {
        Err(Error::user_not_allowed())
    }
}

impl<C> CategoryService<C>
where
    C: CategoryRepository,
{
    async fn load(&self, id: &CategoryId, cancel: &CancellationToken) -> Result<Category, Error> {
        guard_persistence(cancel, self.categories.find_by_id(id))
            .await?
            .ok_or_else(|| Error::not_found(format!("No category found with id {id}")))
    }

    async fn create_category(
        &self,
        request: CreateCategoryRequest,
        cancel: &CancellationToken,
    ) -> Result<CategoryPayload, Error> {
        require_admin(&request.caller)?;
        let now = self.clock.utc();
        let category = Category {
            id: request.id.unwrap_or_else(CategoryId::random),
            name: request.name,
            created_at: now,
            updated_at: now,
        };
        guard_persistence(cancel, self.categories.insert(&category)).await?;
        Ok(CategoryPayload::from(category))
    }

    async fn rename_category(
        &self,
        request: RenameCategoryRequest,
        cancel: &CancellationToken,
    ) -> Result<CategoryPayload, Error> {
        require_admin(&request.caller)?;
        let mut category = self.load(&request.id, cancel).await?;
        category.name = request.name;
        category.updated_at = self.clock.utc();
        guard_persistence(cancel, self.categories.update(&category)).await?;
        Ok(CategoryPayload::from(category))
    }

    async fn delete_category(
        &self,
        request: DeleteCategoryRequest,
        cancel: &CancellationToken,
    ) -> Result<(), Error> {
        require_admin(&request.caller)?;
        self.load(&request.id, cancel).await?;
        guard_persistence(cancel, self.categories.delete(&request.id)).await
    }
}

#[async_trait]
impl<C> CategoryCommand for CategoryService<C>
where
    C: CategoryRepository,
{
    async fn create(
        &self,
        request: CreateCategoryRequest,
        cancel: &CancellationToken,
    ) -> OperationResult<CategoryPayload> {
        self.create_category(request, cancel).await.into()
    }

    async fn rename(
        &self,
        request: RenameCategoryRequest,
        cancel: &CancellationToken,
    ) -> OperationResult<CategoryPayload> {
        self.rename_category(request, cancel).await.into()
    }

    async fn delete(
        &self,
        request: DeleteCategoryRequest,
        cancel: &CancellationToken,
    ) -> OperationResult<()> {
        self.delete_category(request, cancel).await.into()
    }
}

#[async_trait]
impl<C> CategoryQuery for CategoryService<C>
where
    C: CategoryRepository,
{
    async fn get(
        &self,
        id: CategoryId,
        cancel: &CancellationToken,
    ) -> OperationResult<CategoryPayload> {
        self.load(&id, cancel).await.map(CategoryPayload::from).into()
    }

    async fn list(
        &self,
        page: PageRequest,
        cancel: &CancellationToken,
    ) -> OperationResult<Page<CategoryPayload>> {
        guard_persistence(cancel, self.categories.list(page))
            .await
            .map(|categories| Page::new(categories, page).map(CategoryPayload::from))
            .into()
    }
}
