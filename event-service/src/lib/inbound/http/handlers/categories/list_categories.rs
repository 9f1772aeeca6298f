use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::category::ports::CategoryServicePort;
use crate::domain::event::ports::EventServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::CategoryResponseData;
use crate::inbound::http::router::AppState;
use crate::inbound::middleware::AuthenticatedUser;

pub async fn list_categories<CS: CategoryServicePort, ES: EventServicePort>(
    State(state): State<AppState<CS, ES>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<Vec<CategoryResponseData>>, ApiError> {
    let categories = state
        .category_service
        .list_categories(auth_user.user_id)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        categories.iter().map(CategoryResponseData::from).collect(),
    ))
}
