//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`config`] - Configuration management (path, show, init)
//! - [`engine`] - Engine information (timezones, defaults, licenses)
//! - [`jobs`] - Job administration (list, delete, stop, archive)
//! - [`listen`] - Follow a running job's status events

pub mod config;
pub mod engine;
pub mod jobs;
pub mod listen;
