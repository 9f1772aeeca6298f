use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::category::models::Category;
use crate::domain::category::models::CategoryColor;
use crate::domain::category::models::CategoryId;
use crate::domain::category::models::CategoryName;
use crate::domain::event::errors::EventError;
use crate::domain::event::models::DateRange;
use crate::domain::event::models::Event;
use crate::domain::event::models::EventId;
use crate::domain::event::models::EventTitle;
use crate::domain::event::models::NewEvent;
use crate::domain::event::ports::EventRepository;
use crate::domain::user::models::UserId;

const CATEGORY_FOREIGN_KEY: &str = "events_category_id_fkey";

/// Columns of an event joined with its (optional) category.
const SELECT_EVENT: &str = r#"
    SELECT e.id, e.title, e.description, e.start_date_time, e.end_date_time, e.user_id,
           c.id AS category_id, c.name AS category_name, c.color AS category_color
    FROM events e
    LEFT JOIN categories c ON c.id = e.category_id
"#;

pub struct PostgresEventRepository {
    pool: PgPool,
}

impl PostgresEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_event(row: PgRow) -> Result<Event, EventError> {
        let user_id = UserId(row.get("user_id"));
        let title: String = row.get("title");

        let category_id: Option<i64> = row.get("category_id");
        let category = match category_id {
            Some(category_id) => {
                let name: String = row.get("category_name");
                let color: Option<String> = row.get("category_color");
                Some(Category {
                    id: CategoryId(category_id),
                    name: CategoryName::new(name)
                        .map_err(|e| EventError::DatabaseError(e.to_string()))?,
                    color: color
                        .map(CategoryColor::new)
                        .transpose()
                        .map_err(|e| EventError::DatabaseError(e.to_string()))?,
                    user_id,
                })
            }
            None => None,
        };

        Ok(Event {
            id: EventId(row.get("id")),
            title: EventTitle::new(title).map_err(|e| EventError::DatabaseError(e.to_string()))?,
            description: row.get("description"),
            start_date_time: row.get("start_date_time"),
            end_date_time: row.get("end_date_time"),
            user_id,
            category,
        })
    }

    fn map_write_error(e: sqlx::Error, category: Option<&Category>) -> EventError {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_foreign_key_violation() && db_err.constraint() == Some(CATEGORY_FOREIGN_KEY)
            {
                if let Some(category) = category {
                    return EventError::InvalidCategory(category.id);
                }
            }
        }
        EventError::DatabaseError(e.to_string())
    }
}

#[async_trait]
impl EventRepository for PostgresEventRepository {
    async fn create(&self, event: NewEvent) -> Result<Event, EventError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO events (title, description, start_date_time, end_date_time, user_id, category_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(event.title.as_str())
        .bind(event.description.as_deref())
        .bind(event.start_date_time)
        .bind(event.end_date_time)
        .bind(event.user_id.0)
        .bind(event.category.as_ref().map(|c| c.id.0))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::map_write_error(e, event.category.as_ref()))?;

        Ok(event.into_event(EventId(id)))
    }

    async fn find_by_id_and_owner(
        &self,
        id: EventId,
        user_id: UserId,
    ) -> Result<Option<Event>, EventError> {
        let row = sqlx::query(&format!("{SELECT_EVENT} WHERE e.id = $1 AND e.user_id = $2"))
            .bind(id.0)
            .bind(user_id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| EventError::DatabaseError(e.to_string()))?;

        row.map(Self::row_to_event).transpose()
    }

    async fn list_by_owner(&self, user_id: UserId) -> Result<Vec<Event>, EventError> {
        let rows = sqlx::query(&format!(
            "{SELECT_EVENT} WHERE e.user_id = $1 ORDER BY e.start_date_time, e.id"
        ))
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| EventError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Self::row_to_event).collect()
    }

    async fn list_by_owner_in_range(
        &self,
        user_id: UserId,
        range: DateRange,
    ) -> Result<Vec<Event>, EventError> {
        let rows = sqlx::query(&format!(
            "{SELECT_EVENT} WHERE e.user_id = $1 \
             AND e.start_date_time >= $2 AND e.start_date_time <= $3 \
             ORDER BY e.start_date_time, e.id"
        ))
        .bind(user_id.0)
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| EventError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Self::row_to_event).collect()
    }

    async fn update(&self, event: Event) -> Result<Event, EventError> {
        let result = sqlx::query(
            r#"
            UPDATE events
            SET title = $1, description = $2, start_date_time = $3, end_date_time = $4,
                category_id = $5
            WHERE id = $6 AND user_id = $7
            "#,
        )
        .bind(event.title.as_str())
        .bind(event.description.as_deref())
        .bind(event.start_date_time)
        .bind(event.end_date_time)
        .bind(event.category.as_ref().map(|c| c.id.0))
        .bind(event.id.0)
        .bind(event.user_id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_write_error(e, event.category.as_ref()))?;

        if result.rows_affected() == 0 {
            return Err(EventError::NotFound(event.id));
        }

        Ok(event)
    }

    async fn delete_by_id_and_owner(
        &self,
        id: EventId,
        user_id: UserId,
    ) -> Result<bool, EventError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1 AND user_id = $2")
            .bind(id.0)
            .bind(user_id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| EventError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
