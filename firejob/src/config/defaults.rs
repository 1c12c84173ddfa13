//! Default values for every configuration setting, and
//! the `ConfigFile::default()` implementation.

use std::path::PathBuf;

use super::settings::*;
use crate::client::{
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_ENGINE_HOST, DEFAULT_ENGINE_PORT, DEFAULT_RESPONSE_TIMEOUT,
};
use crate::status::{
    DEFAULT_BROKER_CONNECT_TIMEOUT, DEFAULT_BROKER_HOST, DEFAULT_BROKER_PORT, DEFAULT_BROKER_TOPIC,
};

/// Directory under the home directory holding config and logs.
pub const CONFIG_DIR_NAME: &str = ".firejob";

pub const CONFIG_FILE_NAME: &str = "config.ini";

pub const DEFAULT_LOG_FILE: &str = "firejob.log";

pub const DEFAULT_CHECK_FILES: bool = true;

/// Get the path to the config directory (~/.firejob).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

/// Get the path to the config file (~/.firejob/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join(CONFIG_FILE_NAME)
}

/// ~/.firejob/logs
pub fn default_log_directory() -> PathBuf {
    config_directory().join("logs")
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            engine: EngineSettings {
                host: DEFAULT_ENGINE_HOST.to_string(),
                port: DEFAULT_ENGINE_PORT,
                connect_timeout: DEFAULT_CONNECT_TIMEOUT.as_secs(),
                response_timeout: DEFAULT_RESPONSE_TIMEOUT.as_secs(),
            },
            broker: BrokerSettings {
                host: DEFAULT_BROKER_HOST.to_string(),
                port: DEFAULT_BROKER_PORT,
                topic: DEFAULT_BROKER_TOPIC.to_string(),
                username: None,
                password: None,
                connect_timeout: DEFAULT_BROKER_CONNECT_TIMEOUT.as_secs(),
            },
            validation: ValidationSettings {
                check_files: DEFAULT_CHECK_FILES,
            },
            logging: LoggingSettings {
                directory: default_log_directory(),
                file: DEFAULT_LOG_FILE.to_string(),
            },
        }
    }
}
