// Domain entities
pub mod envelope;
pub mod event_record;
pub mod job;
pub mod runtime_config;

pub use envelope::*;
pub use event_record::*;
pub use job::*;
pub use runtime_config::*;
