use tracing::info;

use crate::{AppError, AppState};

/// Removes one cache entry, returning how many entries were deleted.
pub async fn clear_cache_entry(state: &AppState, key: &str) -> Result<u32, AppError> {
    let key = key.trim();
    if key.is_empty() {
        return Err(AppError::BadRequest("cache key must not be empty".to_string()));
    }
    let deleted = state.cache.delete(key).await?;
    if deleted {
        info!(key, "cache entry cleared");
    }
    Ok(u32::from(deleted))
}
