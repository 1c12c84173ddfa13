//! Single-flight guard.
//!
//! A client runs at most one request at a time. A second call while one is
//! running is rejected immediately instead of being queued.

use std::sync::atomic::{AtomicU8, Ordering};

use super::ClientError;

const IDLE: u8 = 0;
const IN_FLIGHT: u8 = 1;
const SUCCEEDED: u8 = 2;
const FAILED: u8 = 3;

/// Where a client is in its request lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightState {
    /// No request issued yet.
    Idle,
    InFlight,
    /// The last request finished successfully.
    Succeeded,
    /// The last request failed or was dropped before finishing.
    Failed,
}

#[derive(Debug, Default)]
pub struct SingleFlight {
    state: AtomicU8,
}

impl SingleFlight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FlightState {
        match self.state.load(Ordering::Acquire) {
            IDLE => FlightState::Idle,
            IN_FLIGHT => FlightState::InFlight,
            SUCCEEDED => FlightState::Succeeded,
            _ => FlightState::Failed,
        }
    }

    /// Claim the flight, or fail with [`ClientError::Concurrency`].
    pub fn begin(&self) -> Result<FlightGuard<'_>, ClientError> {
        self.state
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |state| {
                (state != IN_FLIGHT).then_some(IN_FLIGHT)
            })
            .map_err(|_| ClientError::Concurrency)?;
        Ok(FlightGuard {
            flight: self,
            settled: false,
        })
    }
}

/// Held while a request runs. Dropping it unsettled marks the flight failed.
#[must_use]
pub struct FlightGuard<'a> {
    flight: &'a SingleFlight,
    settled: bool,
}

impl FlightGuard<'_> {
    /// Record the outcome and pass it through.
    pub fn settle<T>(mut self, result: Result<T, ClientError>) -> Result<T, ClientError> {
        let state = if result.is_ok() { SUCCEEDED } else { FAILED };
        self.flight.state.store(state, Ordering::Release);
        self.settled = true;
        result
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.flight.state.store(FAILED, Ordering::Release);
        }
    }
}
