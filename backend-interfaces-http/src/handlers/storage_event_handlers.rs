use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::warn;

use backend_application::commands::storage_event_commands;
use backend_application::AppState;

use crate::error::HttpError;
use crate::middleware::parse_record;

#[derive(Debug, Serialize)]
pub struct EventIdBody {
    pub id: i64,
}

pub async fn create_storage_event(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<EventIdBody>), HttpError> {
    let record = parse_record(&body).map_err(|err| {
        warn!("failed to parse storage event body: {}", err);
        HttpError::BadRequest(err.to_string())
    })?;
    let id = storage_event_commands::create_storage_event(&state, record).await?;
    Ok((StatusCode::CREATED, Json(EventIdBody { id })))
}

pub async fn update_storage_event(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
    body: Bytes,
) -> Result<Json<EventIdBody>, HttpError> {
    let record = parse_record(&body).map_err(|err| {
        warn!(event_id, "failed to parse storage event body: {}", err);
        HttpError::BadRequest(err.to_string())
    })?;
    let id = storage_event_commands::update_storage_event(&state, event_id, record).await?;
    Ok(Json(EventIdBody { id }))
}
