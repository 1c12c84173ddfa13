//! Pluggable logging for the engine client and the status listener.
//!
//! Library code that runs inside a caller's process should not decide where
//! log lines go. [`EngineClient`](crate::client::EngineClient) and
//! [`JobManager`](crate::status::JobManager) therefore hold an
//! `Arc<dyn Logger>` and default to [`NoOpLogger`]. Hand them a
//! [`TracingLogger`] to route messages into the `tracing` subscriber, or a
//! [`MemoryLogger`] to assert on what was logged.
//!
//! ```
//! use firejob::log::{Logger, MemoryLogger};
//! use firejob::log_info;
//! use std::sync::Arc;
//!
//! let memory = Arc::new(MemoryLogger::new());
//! let logger: Arc<dyn Logger> = memory.clone();
//! log_info!(logger, "submitted job {}", "job_2024");
//! assert_eq!(memory.messages(), vec!["submitted job job_2024".to_string()]);
//! ```

mod memory;
mod noop;
mod tracing_adapter;
mod r#trait;

pub use memory::{LogRecord, MemoryLogger};
pub use noop::NoOpLogger;
pub use r#trait::{LogLevel, Logger};
pub use tracing_adapter::TracingLogger;
