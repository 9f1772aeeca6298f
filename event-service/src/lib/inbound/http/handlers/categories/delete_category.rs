use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::category::models::CategoryId;
use crate::domain::category::ports::CategoryServicePort;
use crate::domain::event::ports::EventServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;
use crate::inbound::middleware::AuthenticatedUser;

pub async fn delete_category<CS: CategoryServicePort, ES: EventServicePort>(
    State(state): State<AppState<CS, ES>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(category_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let category_id =
        CategoryId::from_string(&category_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .category_service
        .delete_category(category_id, auth_user.user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
