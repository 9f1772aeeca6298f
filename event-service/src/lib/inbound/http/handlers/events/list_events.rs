use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::domain::category::ports::CategoryServicePort;
use crate::domain::event::models::DateRange;
use crate::domain::event::ports::EventServicePort;
use crate::inbound::http::handlers;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::EventResponseData;
use crate::inbound::http::router::AppState;
use crate::inbound::middleware::AuthenticatedUser;

/// Optional start-time window; applied only when both bounds are present.
#[derive(Debug, Default, Deserialize)]
pub struct ListEventsQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl ListEventsQuery {
    fn into_range(self) -> Result<Option<DateRange>, ApiError> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Ok(Some(DateRange::new(
                parse_date_time("start", &start)?,
                parse_date_time("end", &end)?,
            ))),
            _ => Ok(None),
        }
    }
}

fn parse_date_time(field: &str, value: &str) -> Result<NaiveDateTime, ApiError> {
    handlers::parse_date_time(value).map_err(|e| {
        ApiError::BadRequest(format!("Invalid '{}' date/time '{}': {}", field, value, e))
    })
}

pub async fn list_events<CS: CategoryServicePort, ES: EventServicePort>(
    State(state): State<AppState<CS, ES>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Query(query): Query<ListEventsQuery>,
) -> Result<ApiSuccess<Vec<EventResponseData>>, ApiError> {
    let range = query.into_range()?;

    let events = state
        .event_service
        .list_events(auth_user.user_id, range)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        events.iter().map(EventResponseData::from).collect(),
    ))
}
