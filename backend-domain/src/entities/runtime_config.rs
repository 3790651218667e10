// Runtime configuration shared by the application layers

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UframeConfig {
    pub base_url: String,
    pub events_path: String,
    pub timeout_connect_seconds: u64,
    pub timeout_read_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
    pub jobs_enabled: bool,
    pub cache_max_entries: usize,
    pub uframe: UframeConfig,
}
