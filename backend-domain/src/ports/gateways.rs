use async_trait::async_trait;
use serde_json::Value;

use crate::entities::UpstreamResponse;
use crate::errors::TransportError;

/// JSON transport to the uframe service.
///
/// Implementations send exactly one request per call, honour the configured
/// connect/read timeouts and never retry. Status codes are returned to the
/// caller untouched; only transport failures become errors.
#[async_trait]
pub trait UframeTransport: Send + Sync {
    async fn post_json(&self, url: &str, body: &Value) -> Result<UpstreamResponse, TransportError>;
    async fn put_json(&self, url: &str, body: &Value) -> Result<UpstreamResponse, TransportError>;
    async fn get_json(&self, url: &str) -> Result<UpstreamResponse, TransportError>;
}
