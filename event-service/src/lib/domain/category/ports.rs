use async_trait::async_trait;

use super::errors::CategoryError;
use super::models::Category;
use super::models::CategoryCommand;
use super::models::CategoryId;
use super::models::CategoryName;
use super::models::NewCategory;
use crate::domain::user::models::UserId;

/// Port for category domain service operations.
///
/// Every operation is scoped to the calling user.
#[async_trait]
pub trait CategoryServicePort: Send + Sync + 'static {
    /// Create a category owned by `user_id`.
    ///
    /// # Errors
    /// * `DuplicateCategory` - The user already has a category with this name
    /// * `DatabaseError` - Database operation failed
    async fn create_category(
        &self,
        command: CategoryCommand,
        user_id: UserId,
    ) -> Result<Category, CategoryError>;

    /// List the user's categories ordered by id.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_categories(&self, user_id: UserId) -> Result<Vec<Category>, CategoryError>;

    /// # Errors
    /// * `NotFound` - Category does not exist or belongs to another user
    /// * `DatabaseError` - Database operation failed
    async fn get_category(&self, id: CategoryId, user_id: UserId)
        -> Result<Category, CategoryError>;

    /// Overwrite name and color of one of the user's categories.
    ///
    /// # Errors
    /// * `NotFound` - Category does not exist or belongs to another user
    /// * `DuplicateCategory` - Another category of the user already has the new name
    /// * `DatabaseError` - Database operation failed
    async fn update_category(
        &self,
        id: CategoryId,
        command: CategoryCommand,
        user_id: UserId,
    ) -> Result<Category, CategoryError>;

    /// Delete one of the user's categories.
    ///
    /// Events that referenced it keep existing without a category.
    ///
    /// # Errors
    /// * `NotFound` - Nothing was deleted
    /// * `DatabaseError` - Database operation failed
    async fn delete_category(&self, id: CategoryId, user_id: UserId) -> Result<(), CategoryError>;
}

/// Repository port for category persistence operations.
///
/// Reads, updates and deletes always filter on the owner as well as the id.
#[async_trait]
pub trait CategoryRepository: Send + Sync + 'static {
    /// Persist a new category.
    ///
    /// # Returns
    /// Created category with its storage-assigned id
    ///
    /// # Errors
    /// * `DuplicateCategory` - Unique constraint on (user_id, name) violated
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, category: NewCategory) -> Result<Category, CategoryError>;

    /// Retrieve a category by id, only if `user_id` owns it.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id_and_owner(
        &self,
        id: CategoryId,
        user_id: UserId,
    ) -> Result<Option<Category>, CategoryError>;

    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_name_and_owner(
        &self,
        name: &CategoryName,
        user_id: UserId,
    ) -> Result<Option<Category>, CategoryError>;

    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_by_owner(&self, user_id: UserId) -> Result<Vec<Category>, CategoryError>;

    /// Overwrite a category in place, matching on id and owner.
    ///
    /// # Errors
    /// * `NotFound` - No row matched id and owner
    /// * `DuplicateCategory` - Unique constraint on (user_id, name) violated
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, category: Category) -> Result<Category, CategoryError>;

    /// Conditional delete on id and owner.
    ///
    /// # Returns
    /// Whether a row was removed
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn delete_by_id_and_owner(
        &self,
        id: CategoryId,
        user_id: UserId,
    ) -> Result<bool, CategoryError>;
}
