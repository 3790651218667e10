use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::debug;

use backend_domain::ports::UframeTransport;
use backend_domain::{TransportError, UframeConfig, UpstreamResponse};

/// reqwest-backed uframe transport.
///
/// One shared client; the connect timeout bounds the handshake and the read
/// timeout bounds every wait for response bytes. No retries.
pub struct ReqwestUframeTransport {
    client: Client,
}

impl ReqwestUframeTransport {
    pub fn new(config: &UframeConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let connect = Duration::from_secs(config.timeout_connect_seconds.max(1));
        let read = Duration::from_secs(config.timeout_read_seconds.max(1));
        let client = Client::builder()
            .default_headers(headers)
            .connect_timeout(connect)
            .read_timeout(read)
            .build()?;
        Ok(Self { client })
    }

    async fn execute(&self, request: RequestBuilder) -> Result<UpstreamResponse, TransportError> {
        let response = request.send().await.map_err(map_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_error)?;
        debug!(status, bytes = body.len(), "uframe responded");
        Ok(UpstreamResponse::new(status, body))
    }
}

fn map_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(err.to_string())
    } else if err.is_connect() {
        TransportError::Connect(err.to_string())
    } else {
        TransportError::Request(err.to_string())
    }
}

#[async_trait]
impl UframeTransport for ReqwestUframeTransport {
    async fn post_json(&self, url: &str, body: &Value) -> Result<UpstreamResponse, TransportError> {
        self.execute(self.client.post(url).json(body)).await
    }

    async fn put_json(&self, url: &str, body: &Value) -> Result<UpstreamResponse, TransportError> {
        self.execute(self.client.put(url).json(body)).await
    }

    async fn get_json(&self, url: &str) -> Result<UpstreamResponse, TransportError> {
        self.execute(self.client.get(url)).await
    }
}
