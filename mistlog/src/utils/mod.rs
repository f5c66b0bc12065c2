//! Input sources and persistence used by the commands.

pub mod clipboard;
pub mod input;
pub mod log_store;
