//! Logger that drops everything.

use crate::log::{LogLevel, Logger};
use std::fmt::Arguments;

/// Discards every message. The default logger for client components.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl Logger for NoOpLogger {
    #[inline]
    fn log(&self, _level: LogLevel, _args: Arguments<'_>) {}
}
