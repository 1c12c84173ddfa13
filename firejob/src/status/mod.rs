//! Job status over MQTT.
//!
//! While a job runs, the engine publishes progress to a broker under
//! `{topic}/{sender}/{job}/status`. [`decode`] reads one of those messages,
//! [`derive_events`] turns it into at most one [`JobEvent`], and
//! [`JobManager`] wires both to a live broker subscription.
//!
//! | Status | Message | Event |
//! |---|---|---|
//! | `Complete` | [`SIMULATION_COMPLETE_MESSAGE`] | `SimulationComplete` |
//! | `Complete` | anything else | `ScenarioComplete { success: true }` |
//! | `ScenarioFailed` | any | `ScenarioComplete { success: false }` |
//! | see [`carries_statistics`] | non-empty, with `stats` | `StatisticsReceived` |
//!
//! Unknown status codes produce nothing.

mod config;
mod error;
mod events;
mod manager;
mod message;

pub use config::{
    generate_client_id, BrokerConfig, DEFAULT_BROKER_CONNECT_TIMEOUT, DEFAULT_BROKER_HOST,
    DEFAULT_BROKER_PORT, DEFAULT_BROKER_TOPIC, DEFAULT_KEEP_ALIVE,
};
pub use error::StatusError;
pub use events::{carries_statistics, derive_events, JobEvent, SIMULATION_COMPLETE_MESSAGE};
pub use manager::{JobManager, DEFAULT_EVENT_CAPACITY};
pub use message::{decode, MessageKind, StatValue, Statistic, StatusCode, StatusMessage};
