// Pure domain services
pub mod event_validator;
pub mod schedule;

pub use event_validator::*;
pub use schedule::*;
