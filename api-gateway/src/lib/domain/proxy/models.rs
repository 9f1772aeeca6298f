use std::fmt;

use axum::body::Bytes;
use axum::http::Method;
use axum::http::StatusCode;

/// Service a request is relayed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Downstream {
    Auth,
    Event,
}

impl fmt::Display for Downstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Downstream::Auth => write!(f, "auth-service"),
            Downstream::Event => write!(f, "event-service"),
        }
    }
}

/// Request to relay, already stripped of the gateway's `/api` prefix.
#[derive(Debug, Clone)]
pub struct ForwardRequest {
    pub downstream: Downstream,
    pub method: Method,
    /// Downstream path including the query string, e.g. `/events?start=..`
    pub path_and_query: String,
    /// Original `Authorization` header value, passed on untouched
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// Downstream reply, relayed to the client as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Bytes,
}
