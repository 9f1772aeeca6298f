use std::sync::Arc;

use async_trait::async_trait;

use super::errors::CategoryError;
use super::models::Category;
use super::models::CategoryCommand;
use super::models::CategoryId;
use super::models::NewCategory;
use super::ports::CategoryRepository;
use super::ports::CategoryServicePort;
use crate::domain::user::models::UserId;

/// Concrete implementation of CategoryServicePort.
///
/// Generic over repository for testability.
pub struct CategoryService<CR>
where
    CR: CategoryRepository,
{
    category_repository: Arc<CR>,
}

impl<CR> CategoryService<CR>
where
    CR: CategoryRepository,
{
    pub fn new(category_repository: Arc<CR>) -> Self {
        Self {
            category_repository,
        }
    }
}

#[async_trait]
impl<CR> CategoryServicePort for CategoryService<CR>
where
    CR: CategoryRepository,
{
    async fn create_category(
        &self,
        command: CategoryCommand,
        user_id: UserId,
    ) -> Result<Category, CategoryError> {
        // Fast path for a clean message; the unique constraint decides races.
        if self
            .category_repository
            .find_by_name_and_owner(&command.name, user_id)
            .await?
            .is_some()
        {
            tracing::debug!(
                user_id = %user_id,
                name = %command.name,
                "Category name already taken"
            );
            return Err(CategoryError::DuplicateCategory(command.name.to_string()));
        }

        let category = self
            .category_repository
            .create(NewCategory {
                name: command.name,
                color: command.color,
                user_id,
            })
            .await?;

        tracing::info!(
            category_id = %category.id,
            user_id = %user_id,
            "Category created"
        );

        Ok(category)
    }

    async fn list_categories(&self, user_id: UserId) -> Result<Vec<Category>, CategoryError> {
        self.category_repository.list_by_owner(user_id).await
    }

    async fn get_category(
        &self,
        id: CategoryId,
        user_id: UserId,
    ) -> Result<Category, CategoryError> {
        self.category_repository
            .find_by_id_and_owner(id, user_id)
            .await?
            .ok_or(CategoryError::NotFound(id))
    }

    async fn update_category(
        &self,
        id: CategoryId,
        command: CategoryCommand,
        user_id: UserId,
    ) -> Result<Category, CategoryError> {
        let existing = self.get_category(id, user_id).await?;

        self.category_repository
            .update(Category {
                name: command.name,
                color: command.color,
                ..existing
            })
            .await
    }

    async fn delete_category(&self, id: CategoryId, user_id: UserId) -> Result<(), CategoryError> {
        if self
            .category_repository
            .delete_by_id_and_owner(id, user_id)
            .await?
        {
            tracing::info!(category_id = %id, user_id = %user_id, "Category deleted");
            Ok(())
        } else {
            tracing::debug!(category_id = %id, user_id = %user_id, "Category not deleted");
            Err(CategoryError::NotFound(id))
        }
    }
}
