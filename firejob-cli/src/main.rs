//! firejob CLI - Command-line interface
//!
//! Talks to a fire-growth simulation engine and its status broker using the
//! firejob library.

mod commands;
mod error;
mod runner;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use firejob::config::config_file_path;

use commands::config::ConfigCommands;
use commands::jobs::JobsCommands;
use error::CliError;
use runner::CliRunner;

#[derive(Parser)]
#[command(name = "firejob")]
#[command(version = firejob::VERSION)]
#[command(about = "Query and manage jobs on a fire-growth simulation engine", long_about = None)]
struct Cli {
    /// Configuration file (default: ~/.firejob/config.ini)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the engine's time zones
    Timezones,

    /// Show the option defaults the engine applies to new jobs
    Defaults,

    /// Show third-party license metadata for the engine
    Licenses,

    /// Manage jobs on the engine
    Jobs {
        #[command(subcommand)]
        command: JobsCommands,
    },

    /// Print status events for a job until it completes
    Listen {
        /// Job name as returned on submission
        job: String,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        e.exit();
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    if let Commands::Config { command } = cli.command {
        let path = cli.config.unwrap_or_else(config_file_path);
        return commands::config::run(command, &path);
    }

    let runner = CliRunner::new(cli.config.as_deref(), cli.verbose)?;
    match cli.command {
        Commands::Timezones => commands::engine::run_timezones(&runner).await,
        Commands::Defaults => commands::engine::run_defaults(&runner).await,
        Commands::Licenses => commands::engine::run_licenses(&runner).await,
        Commands::Jobs { command } => commands::jobs::run(&runner, command).await,
        Commands::Listen { job } => commands::listen::run(&runner, &job).await,
        Commands::Config { .. } => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["firejob", "listen", "job_7", "--config", "/tmp/f.ini", "-v"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/f.ini")));
        assert!(matches!(cli.command, Commands::Listen { job } if job == "job_7"));
    }

    #[test]
    fn test_jobs_stop_priority() {
        let cli = Cli::try_parse_from(["firejob", "jobs", "stop", "job_7", "--priority", "now"]).unwrap();
        match cli.command {
            Commands::Jobs {
                command: JobsCommands::Stop { job, priority },
            } => {
                assert_eq!(job, "job_7");
                assert_eq!(priority, commands::jobs::Priority::Now);
            }
            _ => panic!("expected jobs stop"),
        }
    }

    #[test]
    fn test_list_flags_conflict() {
        assert!(Cli::try_parse_from(["firejob", "jobs", "list", "--running", "--queued"]).is_err());
    }
}
