use std::sync::Arc;

use backend_domain::ports::{CacheStore, UframeTransport};
use backend_domain::RuntimeConfig;

use crate::{EventSynchronizer, Metrics};

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub transport: Arc<dyn UframeTransport>,
    pub synchronizer: Arc<EventSynchronizer>,
    pub cache: Arc<dyn CacheStore>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(
        config: RuntimeConfig,
        transport: Arc<dyn UframeTransport>,
        cache: Arc<dyn CacheStore>,
    ) -> Self {
        let synchronizer = Arc::new(EventSynchronizer::new(
            transport.clone(),
            config.uframe.clone(),
        ));
        Self {
            config,
            transport,
            synchronizer,
            cache,
            metrics: Arc::new(Metrics::default()),
        }
    }
}
