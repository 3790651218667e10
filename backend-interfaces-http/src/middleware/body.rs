use anyhow::{anyhow, Result};
use serde_json::Value;

use backend_domain::EventRecord;

/// Decodes a request body into an event record; only JSON objects qualify.
pub fn parse_record(body: &[u8]) -> Result<EventRecord> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(anyhow!("request body is empty"));
    }
    match serde_json::from_slice::<Value>(body)? {
        Value::Object(record) => Ok(record),
        _ => Err(anyhow!("request body must be a JSON object")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn objects_are_accepted() {
        let record = parse_record(br#"{"uid": "A00416", "tense": null}"#).expect("object");
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn other_bodies_are_rejected() {
        assert_eq!(
            parse_record(b"  ").expect_err("empty").to_string(),
            "request body is empty"
        );
        assert_eq!(
            parse_record(b"[1, 2]").expect_err("array").to_string(),
            "request body must be a JSON object"
        );
        assert!(parse_record(b"{not json").is_err());
    }
}
