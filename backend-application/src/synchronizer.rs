use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{debug, info, warn};

use backend_domain::ports::UframeTransport;
use backend_domain::{
    encode_path_segment, is_dot_segment, join_url, EventAction, EventRecord, FieldViolation,
    SyncError, UframeConfig, UpstreamEnvelope, UpstreamResponse, ValidationError, CLASS_FIELD, ENVELOPE_ERROR, ENVELOPE_MESSAGE,
    ENVELOPE_STATUS_CODE, EVENT_ID_FIELD, LAST_MODIFIED_FIELD, SENTINEL_EVENT_ID,
    STATUS_CODE_CREATED, STORAGE_EVENT_CLASS, STORAGE_EVENT_TYPE, UID_FIELD,
};

const CREATE_ROUTE: &str = "postto";
const CREATED_STATUS: u16 = 201;
const UPDATED_STATUS: u16 = 200;

/// Sends validated storage events to the uframe event store.
///
/// Both entry points issue exactly one request and translate the response
/// envelope into an event identifier. An identifier of `0` means uframe
/// answered successfully without naming one.
pub struct EventSynchronizer {
    transport: Arc<dyn UframeTransport>,
    uframe: UframeConfig,
}

impl EventSynchronizer {
    pub fn new(transport: Arc<dyn UframeTransport>, uframe: UframeConfig) -> Self {
        Self { transport, uframe }
    }

    pub fn create_url(&self, uid: &str) -> String {
        join_url(
            &self.uframe.base_url,
            &[&self.uframe.events_path, CREATE_ROUTE, &encode_path_segment(uid)],
        )
    }

    pub fn update_url(&self, event_id: i64) -> String {
        join_url(
            &self.uframe.base_url,
            &[&self.uframe.events_path, &event_id.to_string()],
        )
    }

    pub async fn create(&self, uid: &str, record: &EventRecord) -> Result<i64, SyncError> {
        let action = EventAction::Create;
        let violation = if uid.trim().is_empty() {
            Some(FieldViolation::Missing)
        } else if is_dot_segment(uid) {
            Some(FieldViolation::NotPathSegment)
        } else {
            None
        };
        if let Some(reason) = violation {
            return Err(SyncError::ValidationPassthrough {
                action,
                source: ValidationError::Field {
                    field: UID_FIELD.to_string(),
                    reason,
                },
            });
        }

        let payload = Value::Object(create_payload(record));
        let url = self.create_url(uid);
        debug!(%url, uid, "posting storage event to uframe");
        let response = self
            .transport
            .post_json(&url, &payload)
            .await
            .map_err(|err| {
                warn!(%url, uid, error = %err, "uframe transport failed during create");
                SyncError::from_transport(action, err)
            })?;

        let result = interpret_create(&response);
        match &result {
            Ok(id) => info!(uid, event_id = *id, "created storage event"),
            Err(err) => warn!(uid, status = response.status, error = %err, "uframe rejected storage event create"),
        }
        result
    }

    /// `uid` is only used for logging; uframe addresses updates by event id alone.
    pub async fn update(&self, event_id: i64, uid: &str, record: &EventRecord) -> Result<i64, SyncError> {
        let action = EventAction::Update;
        let payload = Value::Object(update_payload(record));
        let url = self.update_url(event_id);
        debug!(%url, uid, event_id, "putting storage event to uframe");
        let response = self
            .transport
            .put_json(&url, &payload)
            .await
            .map_err(|err| {
                warn!(%url, uid, event_id, error = %err, "uframe transport failed during update");
                SyncError::from_transport(action, err)
            })?;

        let result = interpret_update(&response);
        match &result {
            Ok(id) => info!(uid, event_id, returned_id = *id, "updated storage event"),
            Err(err) => warn!(uid, event_id, status = response.status, error = %err, "uframe rejected storage event update"),
        }
        result
    }
}

pub fn create_payload(record: &EventRecord) -> EventRecord {
    let mut payload = record.clone();
    payload.insert(CLASS_FIELD.to_string(), json!(STORAGE_EVENT_CLASS));
    payload.remove(LAST_MODIFIED_FIELD);
    payload.insert(EVENT_ID_FIELD.to_string(), json!(SENTINEL_EVENT_ID));
    payload
}

pub fn update_payload(record: &EventRecord) -> EventRecord {
    let mut payload = record.clone();
    payload.insert(CLASS_FIELD.to_string(), json!(STORAGE_EVENT_CLASS));
    payload
}

fn interpret_create(response: &UpstreamResponse) -> Result<i64, SyncError> {
    let status = response.status;
    if status != CREATED_STATUS {
        let composed = if response.has_body() {
            UpstreamEnvelope::parse(&response.body).ok().and_then(|envelope| {
                envelope
                    .compose(ENVELOPE_ERROR)
                    .or_else(|| envelope.compose(ENVELOPE_STATUS_CODE))
            })
        } else {
            None
        };
        let message = composed.unwrap_or_else(|| {
            format!(
                "Failed to create {} event; status code: {}",
                STORAGE_EVENT_TYPE, status
            )
        });
        return Err(SyncError::protocol(message, Some(status)));
    }

    if !response.has_body() {
        return Ok(0);
    }
    let envelope =
        UpstreamEnvelope::parse(&response.body).map_err(|err| SyncError::protocol(err, Some(status)))?;
    if envelope.contains(ENVELOPE_ERROR) {
        return Err(SyncError::protocol(error_message(&envelope), Some(status)));
    }

    let Some(status_code) = envelope.text(ENVELOPE_STATUS_CODE) else {
        return Err(SyncError::protocol(
            format!(
                "Failed to create {} event; uframe response has no {}",
                STORAGE_EVENT_TYPE, ENVELOPE_STATUS_CODE
            ),
            Some(status),
        ));
    };
    if status_code != STATUS_CODE_CREATED {
        return Err(SyncError::protocol(
            format!(
                "Failed to create {} event; statusCode from uframe: {}",
                STORAGE_EVENT_TYPE, status_code
            ),
            Some(status),
        ));
    }

    envelope_id(&envelope, status)?.ok_or_else(|| {
        SyncError::protocol(
            format!(
                "Failed to create {} event; uframe response has no id",
                STORAGE_EVENT_TYPE
            ),
            Some(status),
        )
    })
}

fn interpret_update(response: &UpstreamResponse) -> Result<i64, SyncError> {
    let status = response.status;
    let failed_status = || {
        SyncError::protocol(
            format!(
                "Failed to update {} event; status code: {}",
                STORAGE_EVENT_TYPE, status
            ),
            Some(status),
        )
    };

    if status != UPDATED_STATUS {
        if !response.has_body() {
            return Err(failed_status());
        }
        if let Ok(envelope) = UpstreamEnvelope::parse(&response.body) {
            if envelope.contains(ENVELOPE_STATUS_CODE) && envelope.contains(ENVELOPE_MESSAGE) {
                let message = envelope
                    .compose(ENVELOPE_STATUS_CODE)
                    .unwrap_or_else(|| error_message(&envelope));
                return Err(SyncError::protocol(message, Some(status)));
            }
        }
    }

    if !response.has_body() {
        return Ok(0);
    }
    let envelope =
        UpstreamEnvelope::parse(&response.body).map_err(|err| SyncError::protocol(err, Some(status)))?;
    if envelope.contains(ENVELOPE_ERROR) {
        return Err(SyncError::protocol(error_message(&envelope), Some(status)));
    }
    if status != UPDATED_STATUS {
        return Err(failed_status());
    }
    Ok(envelope_id(&envelope, status)?.unwrap_or(0))
}

fn error_message(envelope: &UpstreamEnvelope) -> String {
    envelope
        .compose(ENVELOPE_ERROR)
        .or_else(|| envelope.text(ENVELOPE_ERROR))
        .unwrap_or_else(|| "uframe reported an error".to_string())
}

fn envelope_id(envelope: &UpstreamEnvelope, status: u16) -> Result<Option<i64>, SyncError> {
    match envelope.id() {
        None => Ok(None),
        Some(value) => value.as_i64().map(Some).ok_or_else(|| {
            SyncError::protocol(
                format!("uframe returned a non-integer id: {}", value),
                Some(status),
            )
        }),
    }
}
