// Event action value object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entities::STORAGE_EVENT_LABEL;
use crate::errors::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventAction {
    Create,
    Update,
}

impl EventAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventAction::Create => "create",
            EventAction::Update => "update",
        }
    }

    /// Resolves the action literal a caller passed in.
    ///
    /// An absent or unknown literal is caller misuse and surfaces as
    /// [`ValidationError::Configuration`], never as a field failure.
    pub fn parse(value: Option<&str>) -> Result<Self, ValidationError> {
        let Some(raw) = value else {
            return Err(ValidationError::Configuration(format!(
                "Action value of 'create' or 'update' required to validate {} event fields.",
                STORAGE_EVENT_LABEL
            )));
        };
        match raw {
            "create" => Ok(EventAction::Create),
            "update" => Ok(EventAction::Update),
            _ => Err(ValidationError::Configuration(format!(
                "Valid action value of 'create' or 'update' required to validate {} event fields.",
                STORAGE_EVENT_LABEL
            ))),
        }
    }
}

impl fmt::Display for EventAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
