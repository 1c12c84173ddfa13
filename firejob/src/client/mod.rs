//! TCP client for the simulation engine.
//!
//! Every request follows the same shape: connect, write the request lines,
//! read until the request's terminator (or until the engine closes), close.
//! Requests differ only in what they write and how the reply ends:
//!
//! | Request | Written | Reply ends at |
//! |---|---|---|
//! | [`EngineClient::submit`] | `STARTUP`, `BEGINDATA`, job, `ENDDATA`, `STARTJOB` | first chunk (the job name), then `SHUTDOWN` |
//! | [`EngineClient::fetch_defaults`] | `STARTUP`, `GETDEFAULTS`, then write side closed | engine closes, or goes quiet after replying |
//! | [`EngineClient::fetch_timezones`] | `LIST_TIMEZONES` | `COMPLETE` |
//! | [`EngineClient::fetch_licenses`] | `GET_LICENSES` | trailing newline |
//! | `list_*` | `LIST_OPTIONS_*` | `COMPLETE` |
//! | admin commands | `TAR`, `ZIP`, `DELETE`, `STOP_JOB` | engine closes |
//!
//! Connecting and every read are bounded by the timeouts in
//! [`EngineConfig`].
//!
//! ```ignore
//! use firejob::client::{EngineClient, EngineConfig};
//!
//! let client = EngineClient::new(EngineConfig::default());
//! let name = client.submit(&job).await?;
//! ```

mod config;
mod connector;
mod engine;
mod error;
mod flight;
mod responses;

pub use config::{
    EngineConfig, DEFAULT_CONNECT_TIMEOUT, DEFAULT_ENGINE_HOST, DEFAULT_ENGINE_PORT,
    DEFAULT_RESPONSE_TIMEOUT,
};
pub use connector::{Connector, TcpConnector};
pub use engine::EngineClient;
pub use error::ClientError;
pub use flight::{FlightGuard, FlightState, SingleFlight};
pub use responses::{
    parse_defaults, parse_job_list, parse_licenses, parse_timezones, ComponentType, JobDefaults,
    License, StopPriority,
};
