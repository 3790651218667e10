// Upstream response and the JSON envelope it carries

use serde_json::{Map, Value};

pub const ENVELOPE_ERROR: &str = "error";
pub const ENVELOPE_MESSAGE: &str = "message";
pub const ENVELOPE_STATUS_CODE: &str = "statusCode";
pub const ENVELOPE_ID: &str = "id";
pub const STATUS_CODE_CREATED: &str = "CREATED";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

impl UpstreamResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn has_body(&self) -> bool {
        !self.body.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpstreamEnvelope {
    fields: Map<String, Value>,
}

impl UpstreamEnvelope {
    /// Parses a response body. Anything other than a JSON object is rejected.
    pub fn parse(body: &str) -> Result<Self, String> {
        let value: Value = serde_json::from_str(body)
            .map_err(|err| format!("malformed JSON in uframe response: {}", err))?;
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(format!(
                "unexpected uframe response, expected a JSON object but got {}",
                json_kind(&other)
            )),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn text(&self, key: &str) -> Option<String> {
        self.fields.get(key).map(value_text)
    }

    pub fn id(&self) -> Option<&Value> {
        self.fields.get(ENVELOPE_ID)
    }

    /// `"<head>: <message>"` when both keys are present.
    pub fn compose(&self, head_key: &str) -> Option<String> {
        let head = self.text(head_key)?;
        let message = self.text(ENVELOPE_MESSAGE)?;
        Some(format!("{}: {}", head, message))
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_uses_head_and_message() {
        let envelope =
            UpstreamEnvelope::parse(r#"{"error":"bad request","message":"Invalid control character"}"#)
                .expect("envelope");
        assert_eq!(
            envelope.compose(ENVELOPE_ERROR).as_deref(),
            Some("bad request: Invalid control character")
        );
        assert_eq!(envelope.compose(ENVELOPE_STATUS_CODE), None);
    }

    #[test]
    fn non_string_values_are_rendered_as_json() {
        let envelope = UpstreamEnvelope::parse(r#"{"statusCode":409,"message":"conflict"}"#).expect("envelope");
        assert_eq!(envelope.compose(ENVELOPE_STATUS_CODE).as_deref(), Some("409: conflict"));
    }

    #[test]
    fn parse_rejects_non_object_bodies() {
        let err = UpstreamEnvelope::parse("[1,2]").expect_err("array body");
        assert!(err.contains("an array"));
        assert!(UpstreamEnvelope::parse("not json").is_err());
    }

    #[test]
    fn whitespace_only_body_counts_as_empty() {
        assert!(!UpstreamResponse::new(200, " \n").has_body());
        assert!(UpstreamResponse::new(200, "{}").has_body());
    }
}
