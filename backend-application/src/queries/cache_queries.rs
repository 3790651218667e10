use serde_json::Value;

use crate::{AppError, AppState};

pub async fn list_cache_keys(state: &AppState) -> Result<Vec<String>, AppError> {
    let mut keys = state.cache.keys().await?;
    keys.sort();
    Ok(keys)
}

pub async fn get_cache_entry(state: &AppState, key: &str) -> Result<Value, AppError> {
    state
        .cache
        .get(key)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("cache key '{}'", key)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{state_with, FakeTransport};
    use serde_json::json;

    #[tokio::test]
    async fn keys_are_sorted_and_entries_resolved() {
        let state = state_with(FakeTransport::replying(vec![]));
        state.cache.set("compile_streams", json!([])).await.expect("seed");
        state.cache.set("compile_assets", json!([{"uid": "A1"}])).await.expect("seed");

        let keys = list_cache_keys(&state).await.expect("keys");
        assert_eq!(keys, vec!["compile_assets".to_string(), "compile_streams".to_string()]);

        let value = get_cache_entry(&state, "compile_assets").await.expect("entry");
        assert_eq!(value, json!([{"uid": "A1"}]));
        assert!(matches!(
            get_cache_entry(&state, "missing").await,
            Err(AppError::NotFound(_))
        ));
    }
}
