use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use backend_application::AppState;
use backend_infrastructure::{AppConfig, MemoryCacheStore, ReqwestUframeTransport};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new() -> Result<Self> {
        let config = AppConfig::load().await?;
        let runtime_config = config.to_runtime_config();

        let transport = Arc::new(ReqwestUframeTransport::new(&runtime_config.uframe)?);
        let cache = Arc::new(MemoryCacheStore::open(runtime_config.cache_max_entries));
        info!(
            uframe = %runtime_config.uframe.base_url,
            events_path = %runtime_config.uframe.events_path,
            jobs_enabled = runtime_config.jobs_enabled,
            "backend context ready"
        );

        Ok(Self {
            state: AppState::new(runtime_config, transport, cache),
        })
    }
}
