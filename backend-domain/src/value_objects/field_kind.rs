// Field kind value object

use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    NullableText,
    Integer,
}

impl FieldKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Text | FieldKind::NullableText => "string",
            FieldKind::Integer => "int",
        }
    }

    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            FieldKind::Text => value.is_string(),
            FieldKind::NullableText => value.is_string() || value.is_null(),
            FieldKind::Integer => value.as_i64().is_some(),
        }
    }
}
