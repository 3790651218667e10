use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use backend_domain::{RuntimeConfig, UframeConfig};

use super::validation::{validate_base_url, validate_path_segment};

pub const CONFIG_PATH_ENV: &str = "OOI_CONFIG";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
    pub uframe_url: String,
    pub uframe_events_path: String,
    pub uframe_timeout_connect_seconds: u64,
    pub uframe_timeout_read_seconds: u64,
    pub jobs_enabled: bool,
    pub cache_max_entries: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:4000".to_string(),
            max_body_bytes: 2 * 1024 * 1024,
            request_timeout_seconds: 60,
            uframe_url: "http://localhost:12587".to_string(),
            uframe_events_path: "events".to_string(),
            uframe_timeout_connect_seconds: 5,
            uframe_timeout_read_seconds: 30,
            jobs_enabled: true,
            cache_max_entries: 256,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "./config.toml".to_string());
        let file_path = Path::new(&path);
        let mut config = if file_path.exists() {
            let content = fs::read_to_string(file_path).await?;
            Self::from_toml_str(&content)?
        } else {
            warn!(path = %path, "config file not found, using defaults");
            AppConfig::default()
        };
        config.apply_overrides(|key| env::var(key).ok());
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|err| anyhow!("invalid config: {}", err))
    }

    pub fn normalize(&mut self) {
        self.bind_addr = self.bind_addr.trim().to_string();
        self.uframe_url = self.uframe_url.trim().trim_end_matches('/').to_string();
        self.uframe_events_path = self.uframe_events_path.trim().trim_matches('/').to_string();
        if self.cache_max_entries == 0 {
            self.cache_max_entries = AppConfig::default().cache_max_entries;
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        validate_base_url("uframe_url", &self.uframe_url)?;
        validate_path_segment("uframe_events_path", &self.uframe_events_path)?;
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        if self.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be greater than 0"));
        }
        if self.uframe_timeout_connect_seconds == 0 || self.uframe_timeout_read_seconds == 0 {
            return Err(anyhow!("uframe timeouts must be greater than 0"));
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            max_body_bytes: self.max_body_bytes,
            request_timeout_seconds: self.request_timeout_seconds,
            jobs_enabled: self.jobs_enabled,
            cache_max_entries: self.cache_max_entries,
            uframe: self.to_uframe_config(),
        }
    }

    pub fn to_uframe_config(&self) -> UframeConfig {
        UframeConfig {
            base_url: self.uframe_url.clone(),
            events_path: self.uframe_events_path.clone(),
            timeout_connect_seconds: self.uframe_timeout_connect_seconds,
            timeout_read_seconds: self.uframe_timeout_read_seconds,
        }
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup("OOI_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Some(value) = lookup("OOI_MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
        if let Some(value) = lookup("OOI_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
        if let Some(value) = lookup("OOI_UFRAME_URL") {
            self.uframe_url = value;
        }
        if let Some(value) = lookup("OOI_UFRAME_EVENTS_PATH") {
            self.uframe_events_path = value;
        }
        if let Some(value) = lookup("OOI_UFRAME_TIMEOUT_CONNECT_SECONDS") {
            self.uframe_timeout_connect_seconds =
                value.parse().unwrap_or(self.uframe_timeout_connect_seconds);
        }
        if let Some(value) = lookup("OOI_UFRAME_TIMEOUT_READ_SECONDS") {
            self.uframe_timeout_read_seconds =
                value.parse().unwrap_or(self.uframe_timeout_read_seconds);
        }
        if let Some(value) = lookup("OOI_JOBS_ENABLED") {
            self.jobs_enabled = value.parse().unwrap_or(self.jobs_enabled);
        }
        if let Some(value) = lookup("OOI_CACHE_MAX_ENTRIES") {
            self.cache_max_entries = value.parse().unwrap_or(self.cache_max_entries);
        }
    }
}
