use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use axum::http::Method;
use axum::http::Uri;
use axum::Extension;

use crate::domain::proxy::models::Downstream;
use crate::domain::proxy::models::ForwardRequest;
use crate::domain::proxy::ports::DownstreamClient;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::Relayed;
use crate::inbound::http::router::AppState;
use crate::inbound::middleware::AuthenticatedUser;

/// Public auth routes: register and login need no token.
pub async fn forward_to_auth<D: DownstreamClient>(
    State(state): State<AppState<D>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Relayed, ApiError> {
    relay(&state, Downstream::Auth, method, &uri, &headers, body).await
}

/// Protected category and event routes.
pub async fn forward_to_events<D: DownstreamClient>(
    State(state): State<AppState<D>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Relayed, ApiError> {
    tracing::info!(
        user_id = auth_user.user_id,
        method = %method,
        path = %uri.path(),
        "Relaying to event-service"
    );

    relay(&state, Downstream::Event, method, &uri, &headers, body).await
}

async fn relay<D: DownstreamClient>(
    state: &AppState<D>,
    downstream: Downstream,
    method: Method,
    uri: &Uri,
    headers: &HeaderMap,
    body: Bytes,
) -> Result<Relayed, ApiError> {
    let request = ForwardRequest {
        downstream,
        method,
        path_and_query: downstream_path(uri),
        authorization: header_value(headers, AUTHORIZATION.as_str()),
        content_type: header_value(headers, CONTENT_TYPE.as_str()),
        body,
    };

    let response = state.downstream.forward(request).await?;
    Ok(Relayed(response))
}

/// Strip the gateway's `/api` prefix and keep the query string.
fn downstream_path(uri: &Uri) -> String {
    let path = uri.path().strip_prefix("/api").unwrap_or(uri.path());
    match uri.query() {
        Some(query) => format!("{}?{}", path, query),
        None => path.to_string(),
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
