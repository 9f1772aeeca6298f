use async_trait::async_trait;

use super::errors::EventError;
use super::models::DateRange;
use super::models::Event;
use super::models::EventCommand;
use super::models::EventId;
use super::models::NewEvent;
use crate::domain::user::models::UserId;

/// Port for event domain service operations.
///
/// Every operation is scoped to the calling user.
#[async_trait]
pub trait EventServicePort: Send + Sync + 'static {
    /// Create an event owned by `user_id`.
    ///
    /// # Errors
    /// * `InvalidCategory` - `category_id` is missing or owned by another user
    /// * `DatabaseError` - Database operation failed
    async fn create_event(&self, command: EventCommand, user_id: UserId)
        -> Result<Event, EventError>;

    /// List the user's events, optionally restricted to those starting in `range`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_events(
        &self,
        user_id: UserId,
        range: Option<DateRange>,
    ) -> Result<Vec<Event>, EventError>;

    /// # Errors
    /// * `NotFound` - Event does not exist or belongs to another user
    /// * `DatabaseError` - Database operation failed
    async fn get_event(&self, id: EventId, user_id: UserId) -> Result<Event, EventError>;

    /// Overwrite one of the user's events.
    ///
    /// An omitted category clears the existing reference.
    ///
    /// # Errors
    /// * `NotFound` - Event does not exist or belongs to another user
    /// * `InvalidCategory` - `category_id` is missing or owned by another user
    /// * `DatabaseError` - Database operation failed
    async fn update_event(
        &self,
        id: EventId,
        command: EventCommand,
        user_id: UserId,
    ) -> Result<Event, EventError>;

    /// # Errors
    /// * `NotFound` - Nothing was deleted
    /// * `DatabaseError` - Database operation failed
    async fn delete_event(&self, id: EventId, user_id: UserId) -> Result<(), EventError>;
}

/// Repository port for event persistence operations.
///
/// Events are returned with their category joined in.
#[async_trait]
pub trait EventRepository: Send + Sync + 'static {
    /// Persist a new event.
    ///
    /// # Errors
    /// * `InvalidCategory` - The category vanished before the insert
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, event: NewEvent) -> Result<Event, EventError>;

    /// Retrieve an event by id, only if `user_id` owns it.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id_and_owner(
        &self,
        id: EventId,
        user_id: UserId,
    ) -> Result<Option<Event>, EventError>;

    /// All events of the owner ordered by start time, then id.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_by_owner(&self, user_id: UserId) -> Result<Vec<Event>, EventError>;

    /// Events of the owner whose start lies in `range`, ordered by start time, then id.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_by_owner_in_range(
        &self,
        user_id: UserId,
        range: DateRange,
    ) -> Result<Vec<Event>, EventError>;

    /// Overwrite an event in place, matching on id and owner.
    ///
    /// # Errors
    /// * `NotFound` - No row matched id and owner
    /// * `InvalidCategory` - The category vanished before the update
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, event: Event) -> Result<Event, EventError>;

    /// Conditional delete on id and owner.
    ///
    /// # Returns
    /// Whether a row was removed
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn delete_by_id_and_owner(&self, id: EventId, user_id: UserId)
        -> Result<bool, EventError>;
}
