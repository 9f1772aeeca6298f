use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

use crate::domain::proxy::errors::ProxyError;
use crate::domain::proxy::models::Downstream;
use crate::domain::proxy::models::ForwardRequest;
use crate::domain::proxy::models::ForwardResponse;
use crate::domain::proxy::ports::DownstreamClient;

/// Relays requests to the auth and event services over a pooled HTTP client.
pub struct HttpDownstreamClient {
    client: Client,
    auth_url: String,
    event_url: String,
}

impl HttpDownstreamClient {
    /// Build the client; `timeout` bounds each downstream call end to end.
    pub fn new(
        auth_url: impl Into<String>,
        event_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(2))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;

        Ok(Self {
            client,
            auth_url: auth_url.into().trim_end_matches('/').to_string(),
            event_url: event_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url_for(&self, downstream: Downstream, path_and_query: &str) -> String {
        let base = match downstream {
            Downstream::Auth => &self.auth_url,
            Downstream::Event => &self.event_url,
        };
        format!("{}{}", base, path_and_query)
    }
}

fn transport_error(downstream: Downstream, error: reqwest::Error) -> ProxyError {
    if error.is_timeout() {
        ProxyError::Timeout(downstream)
    } else {
        ProxyError::Unavailable(downstream, error.to_string())
    }
}

#[async_trait]
impl DownstreamClient for HttpDownstreamClient {
    async fn forward(&self, request: ForwardRequest) -> Result<ForwardResponse, ProxyError> {
        let downstream = request.downstream;
        let url = self.url_for(downstream, &request.path_and_query);

        tracing::debug!(
            downstream = %downstream,
            method = %request.method,
            url = %url,
            "Forwarding request"
        );

        let mut builder = self.client.request(request.method, &url);
        if let Some(authorization) = request.authorization {
            builder = builder.header(AUTHORIZATION, authorization);
        }
        if let Some(content_type) = request.content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        if !request.body.is_empty() {
            builder = builder.body(request.body);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!(downstream = %downstream, url = %url, error = %e, "Downstream call failed");
            transport_error(downstream, e)
        })?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let body = response.bytes().await.map_err(|e| {
            tracing::error!(downstream = %downstream, url = %url, error = %e, "Failed to read downstream body");
            if e.is_timeout() {
                ProxyError::Timeout(downstream)
            } else {
                ProxyError::InvalidResponse(downstream, e.to_string())
            }
        })?;

        tracing::debug!(
            downstream = %downstream,
            status = status.as_u16(),
            "Downstream responded"
        );

        Ok(ForwardResponse {
            status,
            content_type,
            body,
        })
    }
}
