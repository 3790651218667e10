use crate::entities::{is_required_field, required_fields, EventRecord};
use crate::errors::{FieldViolation, ValidationError};
use crate::value_objects::EventAction;

/// Checks a storage event record against the field table for `action`.
///
/// The action literal is resolved first, so an absent or unknown action is
/// reported as a configuration error whatever the record holds. Field checks
/// stop at the first missing or mistyped field; the extra-field check that
/// follows reports every unexpected key at once.
pub fn validate(record: &EventRecord, action: Option<&str>) -> Result<EventAction, ValidationError> {
    let action = EventAction::parse(action)?;
    validate_for(record, action)?;
    Ok(action)
}

/// Typed entry point for callers that already hold an [`EventAction`]; the
/// configuration error is ruled out here and only [`validate`] can raise it.
pub fn validate_for(record: &EventRecord, action: EventAction) -> Result<(), ValidationError> {
    for (field, kind) in required_fields(action) {
        let Some(value) = record.get(*field) else {
            return Err(ValidationError::Field {
                field: field.to_string(),
                reason: FieldViolation::Missing,
            });
        };
        if !kind.accepts(value) {
            return Err(ValidationError::Field {
                field: field.to_string(),
                reason: FieldViolation::WrongType(*kind),
            });
        }
    }

    let extra_fields = record
        .keys()
        .filter(|key| !is_required_field(action, key))
        .cloned()
        .collect::<Vec<_>>();
    if !extra_fields.is_empty() {
        return Err(ValidationError::ExtraFields {
            fields: extra_fields,
            action,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::FieldKind;
    use serde_json::{json, Value};

    fn record(value: Value) -> EventRecord {
        value.as_object().cloned().expect("object record")
    }

    fn tower_record() -> EventRecord {
        record(json!({
            "buildingName": "Tower",
            "eventName": "X",
            "eventStartTime": 1,
            "eventStopTime": 2,
            "eventType": "STORAGE",
            "notes": "n",
            "performedBy": "p",
            "physicalLocation": "loc",
            "roomIdentification": "23",
            "shelfIdentification": "s7",
            "dataSource": null,
            "tense": null,
            "uid": "A1"
        }))
    }

    #[test]
    fn typed_and_literal_actions_agree() {
        for action in [EventAction::Create, EventAction::Update] {
            let data = match action {
                EventAction::Create => tower_record(),
                EventAction::Update => update_record(),
            };
            assert_eq!(validate(&data, Some(action.as_str())), Ok(action));
            assert_eq!(validate_for(&data, action), Ok(()));

            let mut missing = data.clone();
            missing.remove("notes");
            let typed = validate_for(&missing, action).expect_err("missing notes");
            assert!(!typed.is_configuration());
            assert_eq!(validate(&missing, Some(action.as_str())), Err(typed));
        }
    }

    fn update_record() -> EventRecord {
        let mut data = tower_record();
        data.insert("eventId".to_string(), json!(14499));
        data.insert("lastModifiedTimestamp".to_string(), json!(1469402158783_i64));
        data
    }

    #[test]
    fn complete_create_record_is_accepted() {
        let action = validate(&tower_record(), Some("create")).expect("valid create");
        assert_eq!(action, EventAction::Create);
    }

    #[test]
    fn missing_field_is_reported_by_name() {
        let mut data = tower_record();
        data.remove("eventName");
        let err = validate(&data, Some("create")).expect_err("missing eventName");
        assert_eq!(
            err,
            ValidationError::Field {
                field: "eventName".to_string(),
                reason: FieldViolation::Missing,
            }
        );
    }

    #[test]
    fn only_the_first_violation_is_reported() {
        let mut data = tower_record();
        data.remove("buildingName");
        data.remove("eventName");
        data.insert("notes".to_string(), json!(7));
        match validate(&data, Some("create")).expect_err("several violations") {
            ValidationError::Field { field, reason } => {
                assert_eq!(field, "buildingName");
                assert_eq!(reason, FieldViolation::Missing);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unknown_or_absent_action_is_a_configuration_error() {
        let empty = EventRecord::new();
        for action in [None, Some("delete"), Some("CREATE"), Some("")] {
            let err = validate(&empty, action).expect_err("bad action");
            assert!(err.is_configuration(), "{action:?} gave {err:?}");
        }
        let err = validate(&tower_record(), None).expect_err("absent action");
        assert!(err.to_string().starts_with("Action value of 'create' or 'update'"));
    }

    #[test]
    fn update_requires_event_id_and_last_modified() {
        validate(&update_record(), Some("update")).expect("valid update");

        let err = validate(&tower_record(), Some("update")).expect_err("no eventId");
        assert!(matches!(err, ValidationError::Field { ref field, .. } if field == "eventId"));

        let mut data = tower_record();
        data.insert("eventId".to_string(), json!(14499));
        let err = validate(&data, Some("update")).expect_err("no lastModifiedTimestamp");
        assert_eq!(
            err,
            ValidationError::Field {
                field: "lastModifiedTimestamp".to_string(),
                reason: FieldViolation::Missing,
            }
        );
    }

    #[test]
    fn update_fields_are_extra_on_create() {
        let err = validate(&update_record(), Some("create")).expect_err("extra on create");
        assert_eq!(
            err,
            ValidationError::ExtraFields {
                fields: vec!["eventId".to_string(), "lastModifiedTimestamp".to_string()],
                action: EventAction::Create,
            }
        );
    }

    #[test]
    fn extra_fields_are_all_named() {
        let mut data = tower_record();
        data.insert("@class".to_string(), json!(".XStorageEvent"));
        data.insert("color".to_string(), json!("red"));
        match validate(&data, Some("create")).expect_err("extra fields") {
            ValidationError::ExtraFields { fields, action } => {
                assert_eq!(fields, vec!["@class".to_string(), "color".to_string()]);
                assert_eq!(action, EventAction::Create);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn field_checks_run_before_the_extra_field_check() {
        let mut data = tower_record();
        data.insert("color".to_string(), json!("red"));
        data.remove("uid");
        let err = validate(&data, Some("create")).expect_err("missing uid");
        assert!(matches!(err, ValidationError::Field { ref field, .. } if field == "uid"));
    }

    // Each field is checked against its own declared type rather than a
    // single fixed type for the whole table.
    #[test]
    fn types_are_checked_per_field() {
        let mut data = tower_record();
        data.insert("eventStartTime".to_string(), json!("1398039060000"));
        assert_eq!(
            validate(&data, Some("create")).expect_err("string timestamp"),
            ValidationError::Field {
                field: "eventStartTime".to_string(),
                reason: FieldViolation::WrongType(FieldKind::Integer),
            }
        );

        let mut data = tower_record();
        data.insert("roomIdentification".to_string(), json!(23));
        assert_eq!(
            validate(&data, Some("create")).expect_err("numeric room"),
            ValidationError::Field {
                field: "roomIdentification".to_string(),
                reason: FieldViolation::WrongType(FieldKind::Text),
            }
        );

        let mut data = tower_record();
        data.insert("eventStopTime".to_string(), json!(2.5));
        assert!(validate(&data, Some("create")).is_err());
    }

    #[test]
    fn nullable_fields_accept_null_or_text_only() {
        let mut data = tower_record();
        data.insert("tense".to_string(), json!("UNKNOWN"));
        data.insert("dataSource".to_string(), json!("UI"));
        validate(&data, Some("create")).expect("text values");

        data.insert("dataSource".to_string(), json!(false));
        let err = validate(&data, Some("create")).expect_err("boolean dataSource");
        assert!(matches!(err, ValidationError::Field { ref field, .. } if field == "dataSource"));

        let mut data = tower_record();
        data.insert("notes".to_string(), Value::Null);
        assert!(validate(&data, Some("create")).is_err());
    }
}
