pub mod health;
pub mod proxy;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
pub use health::health;
pub use proxy::forward_to_auth;
pub use proxy::forward_to_events;
use thiserror::Error;

use crate::domain::proxy::errors::ProxyError;
use crate::domain::proxy::models::ForwardResponse;

/// Downstream reply relayed with its own status, content type and body.
#[derive(Debug)]
pub struct Relayed(pub ForwardResponse);

impl IntoResponse for Relayed {
    fn into_response(self) -> Response {
        let ForwardResponse {
            status,
            content_type,
            body,
        } = self.0;

        let mut response = Response::new(Body::from(body));
        *response.status_mut() = status;
        if let Some(value) = content_type.and_then(|ct| HeaderValue::from_str(&ct).ok()) {
            response.headers_mut().insert(CONTENT_TYPE, value);
        }
        response
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Bad gateway: {0}")]
    BadGateway(String),

    #[error("Gateway timeout: {0}")]
    GatewayTimeout(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            ApiError::GatewayTimeout(msg) => (StatusCode::GATEWAY_TIMEOUT, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<ProxyError> for ApiError {
    fn from(err: ProxyError) -> Self {
        tracing::error!(error = %err, "Relay failed");
        match err {
            ProxyError::Unavailable(downstream, _) | ProxyError::InvalidResponse(downstream, _) => {
                ApiError::BadGateway(format!("{} is unavailable", downstream))
            }
            ProxyError::Timeout(downstream) => {
                ApiError::GatewayTimeout(format!("{} did not answer in time", downstream))
            }
        }
    }
}
