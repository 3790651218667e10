use std::collections::HashMap;

use anyhow::{bail, Result};
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info};

use backend_domain::CacheStore;

struct CacheEntry {
    value: Value,
    sequence: u64,
}

struct CacheState {
    open: bool,
    next_sequence: u64,
    entries: HashMap<String, CacheEntry>,
}

/// In-process cache with an explicit open/close lifecycle.
///
/// Holds at most `max_entries` keys; inserting a new key at capacity evicts
/// the entry written longest ago.
pub struct MemoryCacheStore {
    max_entries: usize,
    state: RwLock<CacheState>,
}

impl MemoryCacheStore {
    pub fn open(max_entries: usize) -> Self {
        info!(max_entries, "cache store opened");
        Self {
            max_entries: max_entries.max(1),
            state: RwLock::new(CacheState {
                open: true,
                next_sequence: 0,
                entries: HashMap::new(),
            }),
        }
    }
}

fn ensure_open(state: &CacheState) -> Result<()> {
    if !state.open {
        bail!("cache store is closed");
    }
    Ok(())
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let state = self.state.read().await;
        ensure_open(&state)?;
        Ok(state.entries.get(key).map(|entry| entry.value.clone()))
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let mut state = self.state.write().await;
        ensure_open(&state)?;
        if !state.entries.contains_key(key) && state.entries.len() >= self.max_entries {
            let oldest = state
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.sequence)
                .map(|(key, _)| key.clone());
            if let Some(oldest) = oldest {
                debug!(key = %oldest, "evicting cache entry");
                state.entries.remove(&oldest);
            }
        }
        let sequence = state.next_sequence;
        state.next_sequence += 1;
        state
            .entries
            .insert(key.to_string(), CacheEntry { value, sequence });
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        let state = self.state.read().await;
        ensure_open(&state)?;
        Ok(state.entries.keys().cloned().collect())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut state = self.state.write().await;
        ensure_open(&state)?;
        Ok(state.entries.remove(key).is_some())
    }

    async fn ping(&self) -> Result<()> {
        let state = self.state.read().await;
        ensure_open(&state)
    }

    async fn close(&self) -> Result<()> {
        let mut state = self.state.write().await;
        if state.open {
            state.open = false;
            state.entries.clear();
            info!("cache store closed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn set_get_delete_roundtrip() {
        let cache = MemoryCacheStore::open(8);
        cache
            .set("test_list", json!([{"something": "something"}, {"dark": "side"}]))
            .await
            .expect("set");
        let value = cache.get("test_list").await.expect("get").expect("present");
        assert_eq!(value[1]["dark"], json!("side"));
        assert_eq!(cache.keys().await.expect("keys"), vec!["test_list".to_string()]);
        assert!(cache.delete("test_list").await.expect("delete"));
        assert!(!cache.delete("test_list").await.expect("delete again"));
        assert!(cache.get("test_list").await.expect("get").is_none());
    }

    #[tokio::test]
    async fn oldest_entry_is_evicted_at_capacity() {
        let cache = MemoryCacheStore::open(2);
        cache.set("a", json!(1)).await.expect("set a");
        cache.set("b", json!(2)).await.expect("set b");
        cache.set("a", json!(3)).await.expect("rewrite a");
        cache.set("c", json!(4)).await.expect("set c");

        let mut keys = cache.keys().await.expect("keys");
        keys.sort();
        assert_eq!(keys, vec!["a".to_string(), "c".to_string()]);
        assert_eq!(cache.get("a").await.expect("get").expect("present"), json!(3));
    }

    #[tokio::test]
    async fn closed_store_rejects_calls() {
        let cache = MemoryCacheStore::open(4);
        cache.set("a", json!(1)).await.expect("set");
        cache.ping().await.expect("ping while open");
        cache.close().await.expect("close");
        cache.close().await.expect("close is idempotent");

        let err = cache.get("a").await.expect_err("closed");
        assert_eq!(err.to_string(), "cache store is closed");
        assert!(cache.ping().await.is_err());
        assert!(cache.set("b", json!(2)).await.is_err());
    }
}
