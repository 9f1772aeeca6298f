use async_trait::async_trait;

use super::errors::ProxyError;
use super::models::ForwardRequest;
use super::models::ForwardResponse;

/// Transport to the downstream services.
///
/// Any downstream status, including 4xx and 5xx, is a successful relay; only
/// transport failures surface as [`ProxyError`].
#[async_trait]
pub trait DownstreamClient: Send + Sync + 'static {
    async fn forward(&self, request: ForwardRequest) -> Result<ForwardResponse, ProxyError>;
}
