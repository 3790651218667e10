use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use backend_application::commands::cache_commands;
use backend_application::queries::cache_queries;
use backend_application::AppState;

use crate::error::HttpError;

#[derive(Serialize)]
pub struct CacheKeysBody {
    pub keys: Vec<String>,
}

#[derive(Serialize)]
pub struct CacheDeletedBody {
    pub deleted: u32,
}

pub async fn list_cache_keys(State(state): State<AppState>) -> Result<Json<CacheKeysBody>, HttpError> {
    let keys = cache_queries::list_cache_keys(&state).await?;
    Ok(Json(CacheKeysBody { keys }))
}

pub async fn get_cache_entry(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Value>, HttpError> {
    let value = cache_queries::get_cache_entry(&state, &key).await?;
    Ok(Json(value))
}

pub async fn clear_cache_entry(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<CacheDeletedBody>, HttpError> {
    let deleted = cache_commands::clear_cache_entry(&state, &key).await?;
    Ok(Json(CacheDeletedBody { deleted }))
}
