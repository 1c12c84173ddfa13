//! Engine information commands: timezones, defaults, licenses.

use firejob::client::{ComponentType, License};
use firejob::model::TimezoneName;

use crate::error::CliError;
use crate::runner::CliRunner;

/// List the engine's named time zones.
pub async fn run_timezones(runner: &CliRunner) -> Result<(), CliError> {
    runner.log_startup("timezones");
    let zones = runner.engine_client().fetch_timezones().await?;
    print!("{}", format_timezones(&zones));
    Ok(())
}

/// Print the option defaults the engine applies to new jobs.
pub async fn run_defaults(runner: &CliRunner) -> Result<(), CliError> {
    runner.log_startup("defaults");
    let defaults = runner.engine_client().fetch_defaults().await?;

    println!(
        "Job directory: {}",
        defaults.job_directory.as_deref().unwrap_or("(not reported)")
    );
    println!();
    println!("[fgm]\n{:#?}", defaults.fgm);
    println!("[fbp]\n{:#?}", defaults.fbp);
    println!("[fmc]\n{:#?}", defaults.fmc);
    println!("[fwi]\n{:#?}", defaults.fwi);
    println!("[vector metadata]\n{:#?}", defaults.metadata);
    Ok(())
}

/// Print third-party license metadata.
pub async fn run_licenses(runner: &CliRunner) -> Result<(), CliError> {
    runner.log_startup("licenses");
    let licenses = runner.engine_client().fetch_licenses().await?;
    for license in &licenses {
        println!("{}", format_license(license));
    }
    if licenses.is_empty() {
        println!("No licenses reported.");
    }
    Ok(())
}

fn format_timezones(zones: &[TimezoneName]) -> String {
    let width = zones.iter().map(|z| z.name.len()).max().unwrap_or(0);
    zones
        .iter()
        .map(|z| format!("{:>4}  {:<width$}\n", z.value, z.name, width = width))
        .collect()
}

fn component_name(component: ComponentType) -> &'static str {
    match component {
        ComponentType::Manager => "manager",
        ComponentType::Builder => "builder",
        ComponentType::Windows => "windows",
        ComponentType::Linux => "linux",
        ComponentType::Unknown => "unknown",
    }
}

fn format_license(license: &License) -> String {
    let components: Vec<&str> = license.components.iter().map(|c| component_name(*c)).collect();
    format!(
        "{} ({})\n  {} <{}>\n  used by: {}",
        license.library_name,
        license.library_url,
        license.license_name,
        license.license_url,
        components.join(", ")
    )
}
