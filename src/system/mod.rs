//! Platform-level concerns: logging setup and the in-memory log store.

pub mod log_buffer;
pub mod logging;

pub use log_buffer::{LogBuffer, LogBufferLayer, LogEntry, global_log_buffer};
pub use logging::init_logging;
