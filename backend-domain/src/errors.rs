// Domain error taxonomy

use std::fmt;

use thiserror::Error;

use crate::entities::{STORAGE_EVENT_LABEL, STORAGE_EVENT_TYPE};
use crate::value_objects::{EventAction, FieldKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldViolation {
    Missing,
    WrongType(FieldKind),
    NotPathSegment,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldViolation::Missing => f.write_str("not provided in request.data"),
            FieldViolation::WrongType(kind) => {
                write!(f, "provided, but value is not of type {}", kind.type_name())
            }
            FieldViolation::NotPathSegment => {
                f.write_str("provided, but value is not usable as a URL path segment")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0}")]
    Configuration(String),
    #[error("required field {field} {reason}.")]
    Field {
        field: String,
        reason: FieldViolation,
    },
    #[error(
        "data contain extra fields [{}], correct and re-submit {action} {label} event request.",
        .fields.join(", "),
        label = STORAGE_EVENT_LABEL
    )]
    ExtraFields {
        fields: Vec<String>,
        action: EventAction,
    },
}

impl ValidationError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, ValidationError::Configuration(_))
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{0}")]
    Connect(String),
    #[error("{0}")]
    Timeout(String),
    #[error("{0}")]
    Request(String),
}

#[derive(Debug, Error)]
pub enum SyncError {
    #[error(
        "ConnectionError (from uframe) during {action} {kind} event; {detail}.",
        kind = STORAGE_EVENT_TYPE
    )]
    UpstreamConnection { action: EventAction, detail: String },
    #[error(
        "Timeout (from uframe) during {action} {kind} event; {detail}.",
        kind = STORAGE_EVENT_TYPE
    )]
    UpstreamTimeout { action: EventAction, detail: String },
    #[error("{message}")]
    UpstreamProtocol { message: String, status: Option<u16> },
    #[error("{action} {kind} event rejected before transmission; {source}", kind = STORAGE_EVENT_TYPE)]
    ValidationPassthrough {
        action: EventAction,
        #[source]
        source: ValidationError,
    },
}

impl SyncError {
    pub fn from_transport(action: EventAction, err: TransportError) -> Self {
        match err {
            TransportError::Timeout(detail) => SyncError::UpstreamTimeout { action, detail },
            TransportError::Connect(detail) => SyncError::UpstreamConnection { action, detail },
            TransportError::Request(detail) => SyncError::protocol(
                format!(
                    "RequestError (from uframe) during {} {} event; {}.",
                    action, STORAGE_EVENT_TYPE, detail
                ),
                None,
            ),
        }
    }

    pub fn protocol(message: impl Into<String>, status: Option<u16>) -> Self {
        SyncError::UpstreamProtocol {
            message: message.into(),
            status,
        }
    }

    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            SyncError::UpstreamProtocol { status, .. } => *status,
            _ => None,
        }
    }
}
