//! Listen command - print status events for a running job.

use firejob::status::JobEvent;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Subscribe to `job` and print events until the simulation completes,
/// the listener stops, or Ctrl-C.
pub async fn run(runner: &CliRunner, job: &str) -> Result<(), CliError> {
    runner.log_startup("listen");
    let manager = runner.job_manager(job)?;
    let Some(mut events) = manager.take_events() else {
        return Ok(());
    };

    manager.start().await?;
    println!(
        "Listening for {} on {} (Ctrl-C to stop)",
        manager.job_name(),
        manager.config().address()
    );

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(event) => {
                    println!("{}", describe(&event));
                    if event == JobEvent::SimulationComplete {
                        break;
                    }
                }
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                println!("Interrupted");
                break;
            }
        }
    }

    manager.dispose().await;
    Ok(())
}

fn describe(event: &JobEvent) -> String {
    match event {
        JobEvent::SimulationComplete => "simulation complete".to_string(),
        JobEvent::ScenarioComplete {
            success: true, ..
        } => "scenario complete".to_string(),
        JobEvent::ScenarioComplete {
            success: false,
            error_message,
        } => format!(
            "scenario failed: {}",
            error_message.as_deref().unwrap_or("Unknown Error")
        ),
        JobEvent::StatisticsReceived(stats) => {
            let fields: Vec<String> = stats.iter().map(|s| format!("{}={}", s.key, s.value)).collect();
            format!("statistics: {}", fields.join(" "))
        }
    }
}
