use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_category;
use super::handlers::create_event;
use super::handlers::delete_category;
use super::handlers::delete_event;
use super::handlers::get_category;
use super::handlers::get_event;
use super::handlers::list_categories;
use super::handlers::list_events;
use super::handlers::update_category;
use super::handlers::update_event;
use crate::domain::category::ports::CategoryServicePort;
use crate::domain::event::ports::EventServicePort;
use crate::inbound::middleware as auth_middleware;

/// Application state shared by every handler.
pub struct AppState<CS, ES>
where
    CS: CategoryServicePort,
    ES: EventServicePort,
{
    pub category_service: Arc<CS>,
    pub event_service: Arc<ES>,
    pub authenticator: Arc<Authenticator>,
}

impl<CS, ES> Clone for AppState<CS, ES>
where
    CS: CategoryServicePort,
    ES: EventServicePort,
{
    fn clone(&self) -> Self {
        Self {
            category_service: Arc::clone(&self.category_service),
            event_service: Arc::clone(&self.event_service),
            authenticator: Arc::clone(&self.authenticator),
        }
    }
}

pub fn create_router<CS, ES>(
    category_service: Arc<CS>,
    event_service: Arc<ES>,
    authenticator: Arc<Authenticator>,
) -> Router
where
    CS: CategoryServicePort,
    ES: EventServicePort,
{
    let state = AppState {
        category_service,
        event_service,
        authenticator,
    };

    let api_routes = Router::new()
        .route(
            "/categories",
            get(list_categories::<CS, ES>).post(create_category::<CS, ES>),
        )
        .route(
            "/categories/:category_id",
            get(get_category::<CS, ES>)
                .put(update_category::<CS, ES>)
                .delete(delete_category::<CS, ES>),
        )
        .route(
            "/events",
            get(list_events::<CS, ES>).post(create_event::<CS, ES>),
        )
        .route(
            "/events/:event_id",
            get(get_event::<CS, ES>)
                .put(update_event::<CS, ES>)
                .delete(delete_event::<CS, ES>),
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
        .merge(api_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
