pub mod job_scheduler;
pub mod uframe_client;

pub use job_scheduler::*;
pub use uframe_client::*;
