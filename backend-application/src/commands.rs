pub mod cache_commands;
pub mod storage_event_commands;
