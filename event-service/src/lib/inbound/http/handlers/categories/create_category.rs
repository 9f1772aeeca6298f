use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;

use crate::domain::category::ports::CategoryServicePort;
use crate::domain::event::ports::EventServicePort;
use crate::inbound::http::handlers::parse_body;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::CategoryRequest;
use crate::inbound::http::handlers::CategoryResponseData;
use crate::inbound::http::router::AppState;
use crate::inbound::middleware::AuthenticatedUser;

pub async fn create_category<CS: CategoryServicePort, ES: EventServicePort>(
    State(state): State<AppState<CS, ES>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    payload: Result<Json<CategoryRequest>, JsonRejection>,
) -> Result<ApiSuccess<CategoryResponseData>, ApiError> {
    let command = parse_body(payload)?.try_into_command()?;

    state
        .category_service
        .create_category(command, auth_user.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref category| ApiSuccess::new(StatusCode::CREATED, category.into()))
}
