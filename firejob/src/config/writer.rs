//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! Produces the commented INI representation written to `config.ini`.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let username = config.broker.username.as_deref().unwrap_or("");
    let password = config.broker.password.as_deref().unwrap_or("");

    format!(
        r#"[engine]
; Host and port of the simulation engine's job socket
host = {}
port = {}
; Seconds to wait for the connection to open (default: 10)
connect_timeout = {}
; Seconds to wait for each part of a reply (default: 60)
response_timeout = {}

[broker]
; MQTT broker the engine publishes job status to
host = {}
port = {}
; Root topic; status arrives on <topic>/<sender>/<job>/status
topic = {}
; Leave empty for anonymous access
username = {}
password = {}
; Seconds to wait for the broker to accept the connection (default: 10)
connect_timeout = {}

[validation]
; Check that input files referenced by a job exist before submitting.
; Set to false when the engine reads files from another machine.
check_files = {}

[logging]
; Directory and file name for the log (default: ~/.firejob/logs/firejob.log)
directory = {}
file = {}
"#,
        config.engine.host,
        config.engine.port,
        config.engine.connect_timeout,
        config.engine.response_timeout,
        config.broker.host,
        config.broker.port,
        config.broker.topic,
        username,
        password,
        config.broker.connect_timeout,
        config.validation.check_files,
        path_to_string(&config.logging.directory),
        config.logging.file,
    )
}

fn path_to_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_written_config_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.ini");

        let mut config = ConfigFile::default();
        config.engine.host = "10.0.0.4".into();
        config.engine.response_timeout = 120;
        config.broker.username = Some("watcher".into());
        config.broker.password = Some("pw".into());
        config.validation.check_files = false;
        config.logging.directory = temp_dir.path().join("logs");

        config.save_to(&config_path).unwrap();
        let loaded = ConfigFile::load_from(&config_path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_written_config_is_commented() {
        let text = to_config_string(&ConfigFile::default());
        assert!(text.contains("[engine]\n; Host and port"));
        assert!(text.contains("port = 32479"));
        assert!(text.contains("username = \n"));
        assert!(text.contains("check_files = true"));
    }
}
