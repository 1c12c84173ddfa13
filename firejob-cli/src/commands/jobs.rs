//! Job administration on the engine.

use clap::{Subcommand, ValueEnum};
use firejob::client::StopPriority;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Jobs subcommands.
#[derive(Debug, Subcommand)]
pub enum JobsCommands {
    /// List jobs known to the engine (complete jobs by default)
    List {
        #[arg(long, conflicts_with_all = ["running", "queued"])]
        complete: bool,
        #[arg(long, conflicts_with = "queued")]
        running: bool,
        #[arg(long)]
        queued: bool,
    },

    /// Delete a job directory from the engine
    Delete { job: String },

    /// Ask the engine to stop a running job
    Stop {
        job: String,
        #[arg(long, value_enum, default_value = "none")]
        priority: Priority,
    },

    /// Archive a job directory on the engine
    Archive {
        job: String,
        #[arg(long, value_enum, default_value = "tar")]
        format: ArchiveFormat,
    },
}

/// How urgently a job should stop.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum Priority {
    /// Stop at the engine's convenience
    None,
    /// Stop after the current step
    Soon,
    /// Stop immediately
    Now,
}

impl From<Priority> for StopPriority {
    fn from(priority: Priority) -> Self {
        match priority {
            Priority::None => StopPriority::None,
            Priority::Soon => StopPriority::Soon,
            Priority::Now => StopPriority::Now,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ArchiveFormat {
    Tar,
    Zip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Listing {
    Complete,
    Running,
    Queued,
}

impl Listing {
    fn from_flags(running: bool, queued: bool) -> Self {
        if running {
            Listing::Running
        } else if queued {
            Listing::Queued
        } else {
            Listing::Complete
        }
    }
}

/// Run a jobs subcommand.
pub async fn run(runner: &CliRunner, command: JobsCommands) -> Result<(), CliError> {
    runner.log_startup("jobs");
    let client = runner.engine_client();

    match command {
        JobsCommands::List {
            complete: _,
            running,
            queued,
        } => {
            let jobs = match Listing::from_flags(running, queued) {
                Listing::Complete => client.list_complete().await?,
                Listing::Running => client.list_running().await?,
                Listing::Queued => client.list_queued().await?,
            };
            if jobs.is_empty() {
                println!("No jobs.");
            }
            for job in jobs {
                println!("{}", job);
            }
        }
        JobsCommands::Delete { job } => {
            client.delete_job(&job).await?;
            println!("Deleted {}", job);
        }
        JobsCommands::Stop { job, priority } => {
            client.stop_job(&job, priority.into()).await?;
            println!("Stop requested for {} ({:?})", job, priority);
        }
        JobsCommands::Archive { job, format } => {
            match format {
                ArchiveFormat::Tar => client.archive_tar(&job).await?,
                ArchiveFormat::Zip => client.archive_zip(&job).await?,
            }
            println!("Archive of {} requested ({:?})", job, format);
        }
    }
    Ok(())
}
