//! Broker connection settings.

use std::time::Duration;

pub const DEFAULT_BROKER_HOST: &str = "127.0.0.1";
pub const DEFAULT_BROKER_PORT: u16 = 1883;
/// Root segment of every status topic.
pub const DEFAULT_BROKER_TOPIC: &str = "psaas";
pub const DEFAULT_BROKER_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_KEEP_ALIVE: Duration = Duration::from_secs(30);

/// Where the status broker lives and how to log in.
#[derive(Debug, Clone, PartialEq)]
pub struct BrokerConfig {
    pub host: String,
    pub port: u16,
    pub topic: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Generated per connection when unset. See [`generate_client_id`].
    pub client_id: Option<String>,
    pub connect_timeout: Duration,
    pub keep_alive: Duration,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_BROKER_HOST.to_string(),
            port: DEFAULT_BROKER_PORT,
            topic: DEFAULT_BROKER_TOPIC.to_string(),
            username: None,
            password: None,
            client_id: None,
            connect_timeout: DEFAULT_BROKER_CONNECT_TIMEOUT,
            keep_alive: DEFAULT_KEEP_ALIVE,
        }
    }
}

impl BrokerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The configured client id, or a fresh one.
    pub fn resolve_client_id(&self) -> String {
        self.client_id.clone().unwrap_or_else(generate_client_id)
    }

    /// Subscription filter for every sender's status messages about `job`.
    pub fn status_filter(&self, job: &str) -> String {
        format!("{}/+/{}/status", self.topic, job)
    }
}

/// `firejob_{8 hex digits}-{hostname}`.
pub fn generate_client_id() -> String {
    let random = uuid::Uuid::new_v4().simple().to_string();
    format!("firejob_{}-{}", &random[..8], hostname())
}

fn hostname() -> String {
    ["HOSTNAME", "COMPUTERNAME"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .chain(std::fs::read_to_string("/etc/hostname").ok())
        .map(|name| name.trim().to_string())
        .find(|name| !name.is_empty())
        .unwrap_or_else(|| "localhost".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BrokerConfig::default();
        assert_eq!(config.address(), "127.0.0.1:1883");
        assert_eq!(config.topic, "psaas");
        assert!(config.username.is_none());
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_status_filter() {
        let config = BrokerConfig::default().with_topic("fires");
        assert_eq!(config.status_filter("job_20240701"), "fires/+/job_20240701/status");
    }

    #[test]
    fn test_generated_client_id_shape() {
        let id = generate_client_id();
        let rest = id.strip_prefix("firejob_").unwrap();
        let (hex, host) = rest.split_at(8);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(host.starts_with('-'));
        assert!(host.len() > 1);
    }

    #[test]
    fn test_explicit_client_id_is_kept() {
        let config = BrokerConfig::default().with_client_id("station-7");
        assert_eq!(config.resolve_client_id(), "station-7");
    }

    #[test]
    fn test_generated_ids_differ() {
        let config = BrokerConfig::default();
        assert_ne!(config.resolve_client_id(), config.resolve_client_id());
    }
}
