use std::sync::Arc;
use std::time::Duration;

use api_gateway::inbound::http::create_router;
use api_gateway::outbound::HttpDownstreamClient;
use auth::Authenticator;
use auth::Claims;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use axum::http::HeaderName;
use axum::http::Method;
use axum::http::StatusCode;
use axum::http::Uri;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use axum::Router;
use serde_json::json;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const JWT_ISSUER: &str = "calendar-auth";

/// Stand-in for a downstream service: echoes what it received.
///
/// `POST /auth/login` answers 401 and any DELETE answers 204 so that
/// non-200 relays can be checked.
async fn echo(
    State(service): State<&'static str>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if uri.path() == "/auth/login" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Invalid credentials" })),
        )
            .into_response();
    }
    if method == Method::DELETE {
        return StatusCode::NO_CONTENT.into_response();
    }

    let header = |name: HeaderName| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };

    Json(json!({
        "service": service,
        "method": method.as_str(),
        "path": uri.path(),
        "query": uri.query(),
        "authorization": header(AUTHORIZATION),
        "contentType": header(CONTENT_TYPE),
        "body": String::from_utf8_lossy(&body),
    }))
    .into_response()
}

async fn spawn_downstream(service: &'static str) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let router = Router::new().fallback(echo).with_state(service);
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Server error");
    });

    format!("http://127.0.0.1:{}", port)
}

/// Address of a port nobody listens on.
pub async fn unreachable_address() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

/// Test application that spawns the gateway in front of echo downstreams
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub authenticator: Authenticator,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let auth_url = spawn_downstream("auth-service").await;
        let event_url = spawn_downstream("event-service").await;
        Self::spawn_with(auth_url, event_url).await
    }

    pub async fn spawn_with(auth_url: String, event_url: String) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let downstream = Arc::new(
            HttpDownstreamClient::new(auth_url, event_url, Duration::from_secs(5))
                .expect("Failed to build downstream client"),
        );
        let authenticator = Arc::new(Authenticator::new(JWT_SECRET, JWT_ISSUER));

        let router = create_router(downstream, authenticator);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            authenticator: Authenticator::new(JWT_SECRET, JWT_ISSUER),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub fn token_for(&self, user_id: i64) -> String {
        let claims = Claims::for_user(
            user_id,
            format!("user{}", user_id),
            format!("user{}@example.com", user_id),
            JWT_ISSUER,
            24,
        );
        self.sign(&claims)
    }

    pub fn sign(&self, claims: &Claims) -> String {
        self.authenticator
            .generate_token(claims)
            .expect("Failed to sign token")
    }
}
