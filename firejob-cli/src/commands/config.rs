//! Configuration management CLI commands.
//!
//! Provides `config path`, `config show` and `config init`. These run
//! without initializing logging.

use std::path::Path;

use clap::Subcommand;
use firejob::config::ConfigFile;

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the configuration file path
    Path,

    /// Show the effective configuration (file values over defaults)
    Show,

    /// Write a commented default configuration file if none exists
    Init,
}

/// Run a config subcommand against the file at `path`.
pub fn run(command: ConfigCommands, path: &Path) -> Result<(), CliError> {
    match command {
        ConfigCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
        ConfigCommands::Show => {
            let config = ConfigFile::load_from(path)?;
            print!("{}", render(&config));
            Ok(())
        }
        ConfigCommands::Init => {
            if ConfigFile::ensure_exists_at(path)? {
                println!("Created {}", path.display());
            } else {
                println!("{} already exists; left unchanged", path.display());
            }
            Ok(())
        }
    }
}

fn render(config: &ConfigFile) -> String {
    let mut out = String::new();
    out.push_str("[engine]\n");
    out.push_str(&format!("host = {}\n", config.engine.host));
    out.push_str(&format!("port = {}\n", config.engine.port));
    out.push_str(&format!("connect_timeout = {}\n", config.engine.connect_timeout));
    out.push_str(&format!("response_timeout = {}\n", config.engine.response_timeout));
    out.push_str("\n[broker]\n");
    out.push_str(&format!("host = {}\n", config.broker.host));
    out.push_str(&format!("port = {}\n", config.broker.port));
    out.push_str(&format!("topic = {}\n", config.broker.topic));
    out.push_str(&format!(
        "username = {}\n",
        config.broker.username.as_deref().unwrap_or("(not set)")
    ));
    // Never echo the password.
    let password = if config.broker.password.is_some() { "(set)" } else { "(not set)" };
    out.push_str(&format!("password = {}\n", password));
    out.push_str(&format!("connect_timeout = {}\n", config.broker.connect_timeout));
    out.push_str("\n[validation]\n");
    out.push_str(&format!("check_files = {}\n", config.validation.check_files));
    out.push_str("\n[logging]\n");
    out.push_str(&format!("directory = {}\n", config.logging.directory.display()));
    out.push_str(&format!("file = {}\n", config.logging.file));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_render_hides_password() {
        let mut config = ConfigFile::default();
        config.broker.username = Some("watcher".into());
        config.broker.password = Some("hunter2".into());

        let text = render(&config);
        assert!(text.contains("username = watcher"));
        assert!(text.contains("password = (set)"));
        assert!(!text.contains("hunter2"));
    }

    #[test]
    fn test_init_writes_once() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.ini");

        run(ConfigCommands::Init, &path).unwrap();
        assert!(path.exists());
        std::fs::write(&path, "[engine]\nport = 4100\n").unwrap();

        run(ConfigCommands::Init, &path).unwrap();
        let config = ConfigFile::load_from(&path).unwrap();
        assert_eq!(config.engine.port, 4100);
    }
}
