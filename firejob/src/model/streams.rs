//! Destinations the engine forwards finished output files to.

/// An output-stream sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputStreamSink {
    /// Publish files over the job's MQTT connection.
    Mqtt,
    /// Upload GeoTIFF outputs to a GeoServer instance.
    GeoServer {
        username: String,
        /// Stored and sent in plain text.
        password: String,
        /// Base URL; the REST API lives under `{url}/rest`.
        url: String,
        workspace: String,
        /// Prefix for the coverage store name.
        coverage_store: String,
        /// Without a declared SRS the uploaded coverage is left disabled.
        declared_srs: Option<String>,
    },
}

impl OutputStreamSink {
    pub fn is_mqtt(&self) -> bool {
        matches!(self, OutputStreamSink::Mqtt)
    }
}
