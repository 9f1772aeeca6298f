pub mod categories;
pub mod events;

// Re-export handlers for easy access
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
pub use categories::create_category;
pub use categories::delete_category;
pub use categories::get_category;
pub use categories::list_categories;
pub use categories::update_category;
use chrono::DateTime;
use chrono::NaiveDateTime;
pub use events::create_event;
pub use events::delete_event;
pub use events::get_event;
pub use events::list_events;
pub use events::update_event;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use thiserror::Error;

use crate::domain::category::errors::CategoryError;
use crate::domain::category::models::Category;
use crate::domain::category::models::CategoryColor;
use crate::domain::category::models::CategoryCommand;
use crate::domain::category::models::CategoryId;
use crate::domain::category::models::CategoryName;
use crate::domain::event::errors::EventError;
use crate::domain::event::models::Event;
use crate::domain::event::models::EventCommand;
use crate::domain::event::models::EventTitle;

/// Successful response: status code plus a flat JSON body.
#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize>(StatusCode, Json<T>);

impl<T: Serialize> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<CategoryError> for ApiError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::NotFound(_) => ApiError::NotFound("Category not found".to_string()),
            CategoryError::InvalidCategoryId(_)
            | CategoryError::InvalidCategoryName(_)
            | CategoryError::InvalidCategoryColor(_)
            | CategoryError::DuplicateCategory(_) => ApiError::BadRequest(err.to_string()),
            CategoryError::DatabaseError(msg) => ApiError::InternalServerError(msg),
        }
    }
}

impl From<EventError> for ApiError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::NotFound(_) => ApiError::NotFound("Event not found".to_string()),
            EventError::InvalidEventId(_)
            | EventError::InvalidTitle(_)
            | EventError::Validation(_)
            | EventError::InvalidCategory(_) => ApiError::BadRequest(err.to_string()),
            EventError::DatabaseError(msg) | EventError::Unknown(msg) => {
                ApiError::InternalServerError(msg)
            }
        }
    }
}

/// Unwrap a JSON body, reporting malformed input as 400 rather than axum's 422.
pub fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

/// Request DTO for creating or updating a category
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CategoryRequest {
    pub name: String,
    pub color: Option<String>,
}

impl CategoryRequest {
    pub fn try_into_command(self) -> Result<CategoryCommand, CategoryError> {
        Ok(CategoryCommand {
            name: CategoryName::new(self.name)?,
            color: self.color.map(CategoryColor::new).transpose()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryResponseData {
    pub id: i64,
    pub name: String,
    pub color: Option<String>,
}

impl From<&Category> for CategoryResponseData {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id.0,
            name: category.name.as_str().to_string(),
            color: category.color.as_ref().map(|c| c.as_str().to_string()),
        }
    }
}

/// Request DTO for creating or updating an event.
///
/// An absent `categoryId` means "no category".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventRequest {
    pub title: String,
    pub description: Option<String>,
    #[serde(deserialize_with = "deserialize_date_time")]
    pub start_date_time: Option<NaiveDateTime>,
    #[serde(deserialize_with = "deserialize_date_time")]
    pub end_date_time: Option<NaiveDateTime>,
    pub category_id: Option<i64>,
}

impl EventRequest {
    pub fn try_into_command(self) -> Result<EventCommand, EventError> {
        let title = EventTitle::new(self.title)?;
        let start_date_time = self
            .start_date_time
            .ok_or_else(|| EventError::Validation("Start date/time is required".to_string()))?;

        Ok(EventCommand {
            title,
            description: self.description,
            start_date_time,
            end_date_time: self.end_date_time,
            category_id: self.category_id.map(CategoryId),
        })
    }
}

/// Parses an ISO-8601 date-time, with or without an offset.
///
/// Values carrying an offset (`Z`, `+02:00`) are converted to UTC.
pub fn parse_date_time(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value)
        .map(|date_time| date_time.naive_utc())
        .or_else(|_| value.parse::<NaiveDateTime>())
}

fn deserialize_date_time<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|value| parse_date_time(&value).map_err(serde::de::Error::custom))
        .transpose()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponseData {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub start_date_time: NaiveDateTime,
    pub end_date_time: Option<NaiveDateTime>,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub category_color: Option<String>,
}

impl From<&Event> for EventResponseData {
    fn from(event: &Event) -> Self {
        let category = event.category.as_ref();
        Self {
            id: event.id.0,
            title: event.title.as_str().to_string(),
            description: event.description.clone(),
            start_date_time: event.start_date_time,
            end_date_time: event.end_date_time,
            category_id: category.map(|c| c.id.0),
            category_name: category.map(|c| c.name.as_str().to_string()),
            category_color: category
                .and_then(|c| c.color.as_ref())
                .map(|c| c.as_str().to_string()),
        }
    }
}
