// Storage event record
// A submitted event is kept as the raw JSON object so that unknown keys can be
// reported instead of being dropped during deserialization.

use serde_json::{Map, Value};

use crate::value_objects::{EventAction, FieldKind};

pub type EventRecord = Map<String, Value>;

pub const STORAGE_EVENT_CLASS: &str = ".XStorageEvent";
pub const STORAGE_EVENT_TYPE: &str = "STORAGE";
pub const STORAGE_EVENT_LABEL: &str = "storage";
pub const SENTINEL_EVENT_ID: i64 = -1;

pub const CLASS_FIELD: &str = "@class";
pub const EVENT_ID_FIELD: &str = "eventId";
pub const LAST_MODIFIED_FIELD: &str = "lastModifiedTimestamp";
pub const UID_FIELD: &str = "uid";

/// Fields every storage event must carry, in the order they are checked.
pub const STORAGE_EVENT_FIELDS: &[(&str, FieldKind)] = &[
    ("buildingName", FieldKind::Text),
    ("eventName", FieldKind::Text),
    ("eventStartTime", FieldKind::Integer),
    ("eventStopTime", FieldKind::Integer),
    ("eventType", FieldKind::Text),
    ("notes", FieldKind::Text),
    ("performedBy", FieldKind::Text),
    ("physicalLocation", FieldKind::Text),
    ("roomIdentification", FieldKind::Text),
    ("shelfIdentification", FieldKind::Text),
    ("dataSource", FieldKind::NullableText),
    ("tense", FieldKind::NullableText),
    (UID_FIELD, FieldKind::Text),
];

pub const UPDATE_ADDITIONAL_FIELDS: &[(&str, FieldKind)] = &[
    (EVENT_ID_FIELD, FieldKind::Integer),
    (LAST_MODIFIED_FIELD, FieldKind::Integer),
];

pub fn required_fields(action: EventAction) -> impl Iterator<Item = &'static (&'static str, FieldKind)> {
    let extra: &'static [(&'static str, FieldKind)] = match action {
        EventAction::Create => &[],
        EventAction::Update => UPDATE_ADDITIONAL_FIELDS,
    };
    STORAGE_EVENT_FIELDS.iter().chain(extra.iter())
}

pub fn is_required_field(action: EventAction, name: &str) -> bool {
    required_fields(action).any(|(field, _)| *field == name)
}
