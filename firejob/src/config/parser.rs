//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use ini::{Ini, Properties};
use std::path::PathBuf;
use std::str::FromStr;

use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [engine] section
    if let Some(section) = ini.section(Some("engine")) {
        if let Some(v) = non_empty(section, "host") {
            config.engine.host = v.to_string();
        }
        if let Some(v) = parse_number(section, "engine", "port", "must be a port number (1-65535)")? {
            config.engine.port = nonzero_port("engine", v)?;
        }
        if let Some(v) = parse_number(section, "engine", "connect_timeout", SECONDS)? {
            config.engine.connect_timeout = positive("engine", "connect_timeout", v)?;
        }
        if let Some(v) = parse_number(section, "engine", "response_timeout", SECONDS)? {
            config.engine.response_timeout = positive("engine", "response_timeout", v)?;
        }
    }

    // [broker] section
    if let Some(section) = ini.section(Some("broker")) {
        if let Some(v) = non_empty(section, "host") {
            config.broker.host = v.to_string();
        }
        if let Some(v) = parse_number(section, "broker", "port", "must be a port number (1-65535)")? {
            config.broker.port = nonzero_port("broker", v)?;
        }
        if let Some(v) = section.get("topic") {
            let v = v.trim();
            if v.is_empty() || v.contains(['/', '+', '#']) {
                return Err(invalid(
                    "broker",
                    "topic",
                    v,
                    "must be a non-empty topic segment without '/', '+' or '#'",
                ));
            }
            config.broker.topic = v.to_string();
        }
        config.broker.username = non_empty(section, "username").map(str::to_string);
        config.broker.password = non_empty(section, "password").map(str::to_string);
        if let Some(v) = parse_number(section, "broker", "connect_timeout", SECONDS)? {
            config.broker.connect_timeout = positive("broker", "connect_timeout", v)?;
        }
    }

    // [validation] section
    if let Some(section) = ini.section(Some("validation")) {
        if let Some(v) = section.get("check_files") {
            config.validation.check_files = parse_bool(v).ok_or_else(|| {
                invalid("validation", "check_files", v, "must be true or false")
            })?;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = non_empty(section, "directory") {
            config.logging.directory = expand_tilde(v);
        }
        if let Some(v) = non_empty(section, "file") {
            config.logging.file = v.to_string();
        }
    }

    Ok(config)
}

const SECONDS: &str = "must be a positive integer (seconds)";

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn non_empty<'a>(section: &'a Properties, key: &str) -> Option<&'a str> {
    section.get(key).map(str::trim).filter(|v| !v.is_empty())
}

fn parse_number<T: FromStr>(
    section: &Properties,
    name: &str,
    key: &str,
    reason: &str,
) -> Result<Option<T>, ConfigFileError> {
    match non_empty(section, key) {
        None => Ok(None),
        Some(v) => v.parse().map(Some).map_err(|_| invalid(name, key, v, reason)),
    }
}

fn nonzero_port(section: &str, port: u16) -> Result<u16, ConfigFileError> {
    if port == 0 {
        return Err(invalid(section, "port", "0", "must be a port number (1-65535)"));
    }
    Ok(port)
}

fn positive(section: &str, key: &str, value: u64) -> Result<u64, ConfigFileError> {
    if value == 0 {
        return Err(invalid(section, key, "0", SECONDS));
    }
    Ok(value)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Expand a leading `~/` to the home directory.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn load(content: &str) -> Result<ConfigFile, ConfigFileError> {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.ini");
        std::fs::write(&config_path, content).unwrap();
        ConfigFile::load_from(&config_path)
    }

    #[test]
    fn test_partial_config() {
        let config = load(
            r#"
[engine]
host = engine.fire.local

[broker]
username = watcher
password = hunter2
"#,
        )
        .unwrap();

        assert_eq!(config.engine.host, "engine.fire.local");
        assert_eq!(config.engine.port, 32479);
        assert_eq!(config.broker.username.as_deref(), Some("watcher"));
        assert_eq!(config.broker.password.as_deref(), Some("hunter2"));
        assert_eq!(config.broker.topic, "psaas");
    }

    #[test]
    fn test_invalid_port() {
        let err = load("[engine]\nport = lots\n").unwrap_err();
        assert!(err.to_string().contains("engine.port"));
        assert!(err.to_string().contains("lots"));

        let err = load("[broker]\nport = 0\n").unwrap_err();
        assert!(matches!(err, ConfigFileError::InvalidValue { ref key, .. } if key == "port"));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let err = load("[broker]\nconnect_timeout = 0\n").unwrap_err();
        assert!(err.to_string().contains("seconds"));
    }

    #[test]
    fn test_topic_with_wildcard_is_rejected() {
        let err = load("[broker]\ntopic = fires/#\n").unwrap_err();
        assert!(err.to_string().contains("broker.topic"));
    }

    #[test]
    fn test_check_files_flag() {
        let config = load("[validation]\ncheck_files = false\n").unwrap();
        assert!(!config.validation.check_files);

        let err = load("[validation]\ncheck_files = maybe\n").unwrap_err();
        assert!(err.to_string().contains("true or false"));
    }

    #[test]
    fn test_empty_credentials_stay_unset() {
        let config = load("[broker]\nusername =\npassword =\n").unwrap();
        assert!(config.broker.username.is_none());
        assert!(config.broker.password.is_none());
    }

    #[test]
    fn test_logging_directory_expands_tilde() {
        let config = load("[logging]\ndirectory = ~/fire-logs\nfile = run.log\n").unwrap();
        if let Some(home) = dirs::home_dir() {
            assert_eq!(config.logging.directory, home.join("fire-logs"));
        }
        assert_eq!(config.logging.file, "run.log");
    }

    #[test]
    fn test_expand_tilde() {
        let path = expand_tilde("~/test/path");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(path, home.join("test/path"));
        }

        // Non-tilde paths should be unchanged
        let path = expand_tilde("/absolute/path");
        assert_eq!(path, PathBuf::from("/absolute/path"));
    }
}
