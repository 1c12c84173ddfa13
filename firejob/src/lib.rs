//! Firejob - client library for a remote fire-growth simulation engine
//!
//! Build a [`model::Job`], check it with [`validation::Validator`], send it
//! with [`client::EngineClient`] and follow its progress with
//! [`status::JobManager`].
//!
//! ```ignore
//! use firejob::client::{EngineClient, EngineConfig};
//! use firejob::model::{Job, LatLon};
//! use firejob::status::{BrokerConfig, JobEvent, JobManager};
//!
//! let mut job = Job::new();
//! job.set_projection_file("/data/elevation.prj");
//! job.set_lut_file("/data/fbp_lookup_table.lut");
//! job.set_fuel_map_file("/data/fuels.asc");
//! let ignition = job.add_point_ignition("2024-07-01T13:00:00", LatLon::new(51.65, -115.36), "").id().to_string();
//! // ... weather, scenarios and outputs ...
//!
//! let client = EngineClient::new(EngineConfig::default());
//! let name = client.submit(&job).await?;
//!
//! let manager = JobManager::new(&name, BrokerConfig::default())?;
//! let mut events = manager.take_events().unwrap();
//! manager.start().await?;
//! while let Some(event) = events.recv().await {
//!     if event == JobEvent::SimulationComplete {
//!         break;
//!     }
//! }
//! ```

pub mod client;
pub mod config;
pub mod duration;
pub mod ids;
pub mod log;
pub mod logging;
pub mod model;
pub mod protocol;
pub mod status;
pub mod validation;

/// Version of the firejob library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
