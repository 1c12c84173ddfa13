//! CLI runner for common setup.
//!
//! Loads the configuration, initializes logging and builds the library
//! clients every engine or broker command needs.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use firejob::client::EngineClient;
use firejob::config::{config_file_path, ConfigFile};
use firejob::log::TracingLogger;
use firejob::logging::{init_logging, LoggingGuard};
use firejob::status::JobManager;
use tracing::info;

use crate::error::CliError;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    config: ConfigFile,
    config_path: PathBuf,
}

impl CliRunner {
    /// Load config from `config_path` (or the default path) and start logging.
    ///
    /// `verbose` raises the default log level to debug. RUST_LOG still wins.
    pub fn new(config_path: Option<&Path>, verbose: bool) -> Result<Self, CliError> {
        let config_path = config_path.map(Path::to_path_buf).unwrap_or_else(config_file_path);
        let config = ConfigFile::load_from(&config_path)?;

        let level = if verbose { "debug" } else { "info" };
        let logging_guard = init_logging(&config.logging.directory, &config.logging.file, level)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            logging_guard,
            config,
            config_path,
        })
    }

    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("firejob v{}", firejob::VERSION);
        info!(config = %self.config_path.display(), "firejob CLI: {} command", command);
    }

    /// Engine client wired to the configured address, timeouts and file checks.
    pub fn engine_client(&self) -> EngineClient {
        EngineClient::new(self.config.engine())
            .with_validator(self.config.validator())
            .with_logger(Arc::new(TracingLogger::for_component("engine")))
    }

    /// Status listener for `job` on the configured broker.
    pub fn job_manager(&self, job: &str) -> Result<JobManager, CliError> {
        Ok(JobManager::new(job, self.config.broker())?
            .with_logger(Arc::new(TracingLogger::for_component("status"))))
    }
}
