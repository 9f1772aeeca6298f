use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::forward_to_auth;
use super::handlers::forward_to_events;
use super::handlers::health;
use crate::domain::proxy::ports::DownstreamClient;
use crate::inbound::middleware as auth_middleware;

/// Application state shared by every handler.
pub struct AppState<D: DownstreamClient> {
    pub downstream: Arc<D>,
    pub authenticator: Arc<Authenticator>,
}

impl<D: DownstreamClient> Clone for AppState<D> {
    fn clone(&self) -> Self {
        Self {
            downstream: Arc::clone(&self.downstream),
            authenticator: Arc::clone(&self.authenticator),
        }
    }
}

pub fn create_router<D: DownstreamClient>(
    downstream: Arc<D>,
    authenticator: Arc<Authenticator>,
) -> Router {
    let state = AppState {
        downstream,
        authenticator,
    };

    let public_routes = Router::new()
        .route("/api/health", get(health))
        .route("/api/auth/register", post(forward_to_auth::<D>))
        .route("/api/auth/login", post(forward_to_auth::<D>));

    let protected_routes = Router::new()
        .route(
            "/api/categories",
            get(forward_to_events::<D>).post(forward_to_events::<D>),
        )
        .route(
            "/api/categories/:category_id",
            get(forward_to_events::<D>)
                .put(forward_to_events::<D>)
                .delete(forward_to_events::<D>),
        )
        .route(
            "/api/events",
            get(forward_to_events::<D>).post(forward_to_events::<D>),
        )
        .route(
            "/api/events/:event_id",
            get(forward_to_events::<D>)
                .put(forward_to_events::<D>)
                .delete(forward_to_events::<D>),
        )
        .route_layer(middleware::from_fn_with_state(
            state.authenticator.clone(),
            auth_middleware::authenticate,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
