use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use backend_domain::ports::{CacheStore, UframeTransport};
use backend_domain::{EventRecord, RuntimeConfig, TransportError, UframeConfig, UpstreamResponse};

use crate::AppState;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub body: Option<Value>,
}

#[derive(Default)]
pub struct FakeTransport {
    responses: Mutex<VecDeque<Result<UpstreamResponse, TransportError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl FakeTransport {
    pub fn replying(responses: Vec<Result<UpstreamResponse, TransportError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    fn respond(
        &self,
        method: &'static str,
        url: &str,
        body: Option<&Value>,
    ) -> Result<UpstreamResponse, TransportError> {
        self.requests.lock().expect("requests lock").push(RecordedRequest {
            method,
            url: url.to_string(),
            body: body.cloned(),
        });
        self.responses
            .lock()
            .expect("responses lock")
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Request("no scripted response".to_string())))
    }
}

#[async_trait]
impl UframeTransport for FakeTransport {
    async fn post_json(&self, url: &str, body: &Value) -> Result<UpstreamResponse, TransportError> {
        self.respond("POST", url, Some(body))
    }

    async fn put_json(&self, url: &str, body: &Value) -> Result<UpstreamResponse, TransportError> {
        self.respond("PUT", url, Some(body))
    }

    async fn get_json(&self, url: &str) -> Result<UpstreamResponse, TransportError> {
        self.respond("GET", url, None)
    }
}

#[derive(Default)]
pub struct FakeCache {
    entries: Mutex<BTreeMap<String, Value>>,
}

#[async_trait]
impl CacheStore for FakeCache {
    async fn get(&self, key: &str) -> anyhow::Result<Option<Value>> {
        Ok(self.entries.lock().expect("cache lock").get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> anyhow::Result<()> {
        self.entries.lock().expect("cache lock").insert(key.to_string(), value);
        Ok(())
    }

    async fn keys(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.entries.lock().expect("cache lock").keys().cloned().collect())
    }

    async fn delete(&self, key: &str) -> anyhow::Result<bool> {
        Ok(self.entries.lock().expect("cache lock").remove(key).is_some())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }

    async fn close(&self) -> anyhow::Result<()> {
        self.entries.lock().expect("cache lock").clear();
        Ok(())
    }
}

pub fn uframe_config() -> UframeConfig {
    UframeConfig {
        base_url: "http://uframe:12587".to_string(),
        events_path: "events".to_string(),
        timeout_connect_seconds: 5,
        timeout_read_seconds: 30,
    }
}

pub fn runtime_config() -> RuntimeConfig {
    RuntimeConfig {
        bind_addr: "127.0.0.1:4000".to_string(),
        max_body_bytes: 1024 * 1024,
        request_timeout_seconds: 15,
        jobs_enabled: false,
        cache_max_entries: 64,
        uframe: uframe_config(),
    }
}

pub fn state_with(transport: Arc<FakeTransport>) -> AppState {
    AppState::new(runtime_config(), transport, Arc::new(FakeCache::default()))
}

pub fn storage_record() -> EventRecord {
    json!({
        "buildingName": "Tower",
        "eventName": "CP01CNSM-RID26-04-VELPTA000",
        "eventStartTime": 1398039060000_i64,
        "eventStopTime": 1405382400000_i64,
        "eventType": "STORAGE",
        "notes": "test storage event",
        "performedBy": "Edna Donoughe, RPS ASA",
        "physicalLocation": "Narragansett, RI",
        "roomIdentification": "23",
        "shelfIdentification": "Cube 7-21",
        "dataSource": null,
        "tense": null,
        "uid": "A00416"
    })
    .as_object()
    .cloned()
    .expect("object record")
}

pub fn storage_update_record(event_id: i64) -> EventRecord {
    let mut record = storage_record();
    record.insert("eventId".to_string(), json!(event_id));
    record.insert("lastModifiedTimestamp".to_string(), json!(1469402158783_i64));
    record
}
