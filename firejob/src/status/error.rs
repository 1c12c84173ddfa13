//! Status listener errors.

use std::time::Duration;

use thiserror::Error;

/// Errors raised while decoding broker messages or talking to the broker.
#[derive(Debug, Error)]
pub enum StatusError {
    /// The topic has fewer than the four `root/sender/job/type` segments.
    #[error("Malformed status topic '{0}'")]
    MalformedTopic(String),

    /// The payload is not JSON.
    #[error("Malformed status payload '{payload}': {source}")]
    MalformedPayload {
        payload: String,
        #[source]
        source: serde_json::Error,
    },

    /// The payload is JSON but lacks `message` or `status`.
    #[error("Status payload '{payload}' is missing '{field}'")]
    MissingField { payload: String, field: &'static str },

    /// The broker rejected a request, or the request queue is closed.
    #[error("Broker request failed: {0}")]
    Client(#[from] rumqttc::ClientError),

    /// The connection to the broker failed.
    #[error("Broker connection to {address} failed: {source}")]
    Connection {
        address: String,
        #[source]
        source: Box<rumqttc::ConnectionError>,
    },

    /// No connection acknowledgement arrived in time.
    #[error("Broker at {address} did not accept the connection within {timeout:?}")]
    ConnectTimeout { address: String, timeout: Duration },

    #[error("Job name is empty")]
    EmptyJobName,
}
