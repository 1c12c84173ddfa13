//! Bridge from [`Logger`] to the `tracing` macros.

use crate::log::{LogLevel, Logger};
use std::fmt::Arguments;

/// Forwards messages to `tracing`, tagged with a component name.
///
/// The component shows up as a structured `component` field so file logs
/// can be filtered per subsystem (`engine`, `status`, ...).
///
/// ```ignore
/// use firejob::log::{Logger, TracingLogger};
/// use std::sync::Arc;
///
/// let logger: Arc<dyn Logger> = Arc::new(TracingLogger::for_component("engine"));
/// logger.info(format_args!("connected"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TracingLogger {
    component: &'static str,
}

impl TracingLogger {
    /// Logger tagged with the crate name.
    pub fn new() -> Self {
        Self::for_component("firejob")
    }

    /// Logger tagged with a custom component name.
    pub fn for_component(component: &'static str) -> Self {
        Self { component }
    }

    pub fn component(&self) -> &'static str {
        self.component
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, args: Arguments<'_>) {
        let component = self.component;
        match level {
            LogLevel::Trace => tracing::trace!(component, "{}", args),
            LogLevel::Debug => tracing::debug!(component, "{}", args),
            LogLevel::Info => tracing::info!(component, "{}", args),
            LogLevel::Warn => tracing::warn!(component, "{}", args),
            LogLevel::Error => tracing::error!(component, "{}", args),
        }
    }
}
