use std::sync::Arc;

use async_trait::async_trait;

use super::errors::EventError;
use super::models::DateRange;
use super::models::Event;
use super::models::EventCommand;
use super::models::EventId;
use super::models::NewEvent;
use super::ports::EventRepository;
use super::ports::EventServicePort;
use crate::domain::category::models::Category;
use crate::domain::category::models::CategoryId;
use crate::domain::category::ports::CategoryRepository;
use crate::domain::user::models::UserId;

/// Concrete implementation of EventServicePort.
///
/// Checks category references against the caller's own categories before any
/// write. Generic over repositories for testability.
pub struct EventService<ER, CR>
where
    ER: EventRepository,
    CR: CategoryRepository,
{
    event_repository: Arc<ER>,
    category_repository: Arc<CR>,
}

impl<ER, CR> EventService<ER, CR>
where
    ER: EventRepository,
    CR: CategoryRepository,
{
    pub fn new(event_repository: Arc<ER>, category_repository: Arc<CR>) -> Self {
        Self {
            event_repository,
            category_repository,
        }
    }

    /// Resolve an optional category reference under the caller's ownership.
    async fn resolve_category(
        &self,
        category_id: Option<CategoryId>,
        user_id: UserId,
    ) -> Result<Option<Category>, EventError> {
        let Some(category_id) = category_id else {
            return Ok(None);
        };

        match self
            .category_repository
            .find_by_id_and_owner(category_id, user_id)
            .await?
        {
            Some(category) => Ok(Some(category)),
            None => {
                tracing::debug!(
                    category_id = %category_id,
                    user_id = %user_id,
                    "Event references a category the caller does not own"
                );
                Err(EventError::InvalidCategory(category_id))
            }
        }
    }
}

#[async_trait]
impl<ER, CR> EventServicePort for EventService<ER, CR>
where
    ER: EventRepository,
    CR: CategoryRepository,
{
    async fn create_event(
        &self,
        command: EventCommand,
        user_id: UserId,
    ) -> Result<Event, EventError> {
        let category = self.resolve_category(command.category_id, user_id).await?;

        let event = self
            .event_repository
            .create(NewEvent {
                title: command.title,
                description: command.description,
                start_date_time: command.start_date_time,
                end_date_time: command.end_date_time,
                user_id,
                category,
            })
            .await?;

        tracing::info!(event_id = %event.id, user_id = %user_id, "Event created");

        Ok(event)
    }

    async fn list_events(
        &self,
        user_id: UserId,
        range: Option<DateRange>,
    ) -> Result<Vec<Event>, EventError> {
        match range {
            Some(range) => {
                self.event_repository
                    .list_by_owner_in_range(user_id, range)
                    .await
            }
            None => self.event_repository.list_by_owner(user_id).await,
        }
    }

    async fn get_event(&self, id: EventId, user_id: UserId) -> Result<Event, EventError> {
        self.event_repository
            .find_by_id_and_owner(id, user_id)
            .await?
            .ok_or(EventError::NotFound(id))
    }

    async fn update_event(
        &self,
        id: EventId,
        command: EventCommand,
        user_id: UserId,
    ) -> Result<Event, EventError> {
        let existing = self.get_event(id, user_id).await?;
        let category = self.resolve_category(command.category_id, user_id).await?;

        self.event_repository
            .update(Event {
                title: command.title,
                description: command.description,
                start_date_time: command.start_date_time,
                end_date_time: command.end_date_time,
                category,
                ..existing
            })
            .await
    }

    async fn delete_event(&self, id: EventId, user_id: UserId) -> Result<(), EventError> {
        if self
            .event_repository
            .delete_by_id_and_owner(id, user_id)
            .await?
        {
            tracing::info!(event_id = %id, user_id = %user_id, "Event deleted");
            Ok(())
        } else {
            tracing::debug!(event_id = %id, user_id = %user_id, "Event not deleted");
            Err(EventError::NotFound(id))
        }
    }
}
