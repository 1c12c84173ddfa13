//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.

use std::path::PathBuf;
use std::time::Duration;

use crate::client::EngineConfig;
use crate::status::BrokerConfig;
use crate::validation::Validator;

/// Complete configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    pub engine: EngineSettings,
    pub broker: BrokerSettings,
    pub validation: ValidationSettings,
    pub logging: LoggingSettings,
}

/// `[engine]`: where the simulation engine listens.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    pub host: String,
    pub port: u16,
    /// Seconds
    pub connect_timeout: u64,
    /// Seconds to wait for each reply chunk
    pub response_timeout: u64,
}

/// `[broker]`: the MQTT broker carrying job status.
#[derive(Debug, Clone, PartialEq)]
pub struct BrokerSettings {
    pub host: String,
    pub port: u16,
    /// Root topic segment
    pub topic: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Seconds
    pub connect_timeout: u64,
}

/// `[validation]`
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationSettings {
    /// Check that referenced input files exist. Turn off when the engine
    /// runs on another machine.
    pub check_files: bool,
}

/// `[logging]`
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    pub directory: PathBuf,
    pub file: String,
}

impl ConfigFile {
    pub fn engine(&self) -> EngineConfig {
        EngineConfig::new(self.engine.host.clone(), self.engine.port)
            .with_connect_timeout(Duration::from_secs(self.engine.connect_timeout))
            .with_response_timeout(Duration::from_secs(self.engine.response_timeout))
    }

    pub fn broker(&self) -> BrokerConfig {
        let mut config = BrokerConfig::new(self.broker.host.clone(), self.broker.port)
            .with_topic(self.broker.topic.clone())
            .with_connect_timeout(Duration::from_secs(self.broker.connect_timeout));
        config.username = self.broker.username.clone();
        config.password = self.broker.password.clone();
        config
    }

    pub fn validator(&self) -> Validator {
        Validator::new().with_file_checks(self.validation.check_files)
    }
}
