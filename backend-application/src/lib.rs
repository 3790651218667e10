// Backend Application Layer

pub mod commands;
pub mod error;
pub mod metrics;
pub mod queries;
pub mod state;
pub mod synchronizer;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::AppError;
pub use metrics::Metrics;
pub use state::AppState;
pub use synchronizer::EventSynchronizer;
