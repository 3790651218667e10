// Domain value objects
pub mod event_action;
pub mod field_kind;

pub use event_action::*;
pub use field_kind::*;
