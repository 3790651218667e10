pub mod cache_handlers;
pub mod ops_handlers;
pub mod storage_event_handlers;

pub use cache_handlers::*;
pub use ops_handlers::*;
pub use storage_event_handlers::*;
