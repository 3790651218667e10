use async_trait::async_trait;
use serde_json::Value;

/// Process-wide key/value cache for compiled listings.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> anyhow::Result<Option<Value>>;
    async fn set(&self, key: &str, value: Value) -> anyhow::Result<()>;
    async fn keys(&self) -> anyhow::Result<Vec<String>>;
    async fn delete(&self, key: &str) -> anyhow::Result<bool>;
    async fn ping(&self) -> anyhow::Result<()>;
    async fn close(&self) -> anyhow::Result<()>;
}
