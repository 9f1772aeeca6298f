use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::category::errors::CategoryError;
use crate::domain::category::models::Category;
use crate::domain::category::models::CategoryColor;
use crate::domain::category::models::CategoryId;
use crate::domain::category::models::CategoryName;
use crate::domain::category::models::NewCategory;
use crate::domain::category::ports::CategoryRepository;
use crate::domain::user::models::UserId;

const UNIQUE_NAME_CONSTRAINT: &str = "categories_user_id_name_key";

pub struct PostgresCategoryRepository {
    pool: PgPool,
}

impl PostgresCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_category(row: PgRow) -> Result<Category, CategoryError> {
        let name: String = row.get("name");
        let color: Option<String> = row.get("color");

        Ok(Category {
            id: CategoryId(row.get("id")),
            name: CategoryName::new(name)?,
            color: color.map(CategoryColor::new).transpose()?,
            user_id: UserId(row.get("user_id")),
        })
    }

    fn map_write_error(e: sqlx::Error, name: &CategoryName) -> CategoryError {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation() && db_err.constraint() == Some(UNIQUE_NAME_CONSTRAINT)
            {
                return CategoryError::DuplicateCategory(name.to_string());
            }
        }
        CategoryError::DatabaseError(e.to_string())
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn create(&self, category: NewCategory) -> Result<Category, CategoryError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO categories (name, color, user_id)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(category.name.as_str())
        .bind(category.color.as_ref().map(|c| c.as_str()))
        .bind(category.user_id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::map_write_error(e, &category.name))?;

        Ok(category.into_category(CategoryId(id)))
    }

    async fn find_by_id_and_owner(
        &self,
        id: CategoryId,
        user_id: UserId,
    ) -> Result<Option<Category>, CategoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, color, user_id
            FROM categories
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.0)
        .bind(user_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CategoryError::DatabaseError(e.to_string()))?;

        row.map(Self::row_to_category).transpose()
    }

    async fn find_by_name_and_owner(
        &self,
        name: &CategoryName,
        user_id: UserId,
    ) -> Result<Option<Category>, CategoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, color, user_id
            FROM categories
            WHERE name = $1 AND user_id = $2
            "#,
        )
        .bind(name.as_str())
        .bind(user_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CategoryError::DatabaseError(e.to_string()))?;

        row.map(Self::row_to_category).transpose()
    }

    async fn list_by_owner(&self, user_id: UserId) -> Result<Vec<Category>, CategoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, color, user_id
            FROM categories
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CategoryError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Self::row_to_category).collect()
    }

    async fn update(&self, category: Category) -> Result<Category, CategoryError> {
        let result = sqlx::query(
            r#"
            UPDATE categories
            SET name = $1, color = $2
            WHERE id = $3 AND user_id = $4
            "#,
        )
        .bind(category.name.as_str())
        .bind(category.color.as_ref().map(|c| c.as_str()))
        .bind(category.id.0)
        .bind(category.user_id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_write_error(e, &category.name))?;

        if result.rows_affected() == 0 {
            return Err(CategoryError::NotFound(category.id));
        }

        Ok(category)
    }

    async fn delete_by_id_and_owner(
        &self,
        id: CategoryId,
        user_id: UserId,
    ) -> Result<bool, CategoryError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1 AND user_id = $2")
            .bind(id.0)
            .bind(user_id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| CategoryError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
