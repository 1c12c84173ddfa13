//! User configuration in `~/.firejob/config.ini`.
//!
//! A missing file means defaults. [`ConfigFile::engine`] and
//! [`ConfigFile::broker`] turn the loaded settings into the connection
//! configs the client and the status listener take.
//!
//! # Example
//!
//! ```no_run
//! use firejob::client::EngineClient;
//! use firejob::config::ConfigFile;
//!
//! let config = ConfigFile::load()?;
//! let client = EngineClient::new(config.engine()).with_validator(config.validator());
//! # Ok::<(), firejob::config::ConfigFileError>(())
//! ```

mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::{
    config_directory, config_file_path, default_log_directory, CONFIG_DIR_NAME, CONFIG_FILE_NAME,
    DEFAULT_CHECK_FILES, DEFAULT_LOG_FILE,
};
pub use file::ConfigFileError;
pub use settings::{BrokerSettings, ConfigFile, EngineSettings, LoggingSettings, ValidationSettings};
