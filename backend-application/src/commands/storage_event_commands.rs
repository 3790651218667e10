use serde_json::Value;
use tracing::warn;

use crate::{AppError, AppState};
use backend_domain::{validate_for, EventAction, EventRecord, SyncError, EVENT_ID_FIELD, UID_FIELD};

/// Validates a new storage event and creates it in uframe.
///
/// The instrument uid is read from the record once validation has confirmed it
/// is present.
pub async fn create_storage_event(state: &AppState, record: EventRecord) -> Result<i64, AppError> {
    validate(state, &record, EventAction::Create)?;
    let uid = record_uid(&record)?;
    let id = state
        .synchronizer
        .create(&uid, &record)
        .await
        .map_err(|err| upstream_failure(state, err))?;
    state.metrics.record_created();
    Ok(id)
}

pub async fn update_storage_event(
    state: &AppState,
    event_id: i64,
    record: EventRecord,
) -> Result<i64, AppError> {
    validate(state, &record, EventAction::Update)?;
    let uid = record_uid(&record)?;
    let record_event_id = record.get(EVENT_ID_FIELD).and_then(Value::as_i64);
    if record_event_id != Some(event_id) {
        warn!(
            event_id,
            record_event_id = ?record_event_id,
            uid = %uid,
            "storage event id in path differs from record eventId"
        );
    }
    let id = state
        .synchronizer
        .update(event_id, &uid, &record)
        .await
        .map_err(|err| upstream_failure(state, err))?;
    state.metrics.record_updated();
    Ok(id)
}

fn validate(state: &AppState, record: &EventRecord, action: EventAction) -> Result<(), AppError> {
    validate_for(record, action).map_err(|err| {
        state.metrics.record_validation_failure();
        warn!(%action, error = %err, "storage event failed validation");
        AppError::Validation(err)
    })
}

fn record_uid(record: &EventRecord) -> Result<String, AppError> {
    record
        .get(UID_FIELD)
        .and_then(Value::as_str)
        .map(ToString::to_string)
        .ok_or_else(|| AppError::BadRequest("uid must be a string".to_string()))
}

fn upstream_failure(state: &AppState, err: SyncError) -> AppError {
    state.metrics.record_upstream_failure();
    AppError::Sync(err)
}
