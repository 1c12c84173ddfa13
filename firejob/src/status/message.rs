//! Broker message decoding.
//!
//! The engine publishes on `{root}/{sender}/{job}/{type}`. Only `status`
//! messages carry a payload worth reading:
//!
//! ```text
//! {"message": "Scenario scen0 started", "status": 2, "stats": {"scenario_current_time": "2024-07-01T13:00:00"}}
//! ```
//!
//! Decoding is stateless. Each call looks only at the topic and payload it
//! is given.

use std::fmt;

use serde_json::Value;

use super::StatusError;

/// The fourth topic segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Status,
    /// `reportin`, a periodic check-in from the engine. Ignored.
    Checkin,
    Unknown,
}

impl MessageKind {
    /// Matches `status` and `reportin` without regard to ASCII case.
    pub fn from_segment(segment: &str) -> Self {
        if segment.eq_ignore_ascii_case("status") {
            MessageKind::Status
        } else if segment.eq_ignore_ascii_case("reportin") {
            MessageKind::Checkin
        } else {
            MessageKind::Unknown
        }
    }
}

/// Job state reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Submitted,
    Started,
    ScenarioStarted,
    ScenarioCompleted,
    ScenarioFailed,
    Complete,
    Failed,
    Error,
    Information,
    ShutdownRequested,
    /// Any code outside 0..=9, or a non-integer status.
    Unknown,
}

impl StatusCode {
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => StatusCode::Submitted,
            1 => StatusCode::Started,
            2 => StatusCode::ScenarioStarted,
            3 => StatusCode::ScenarioCompleted,
            4 => StatusCode::ScenarioFailed,
            5 => StatusCode::Complete,
            6 => StatusCode::Failed,
            7 => StatusCode::Error,
            8 => StatusCode::Information,
            9 => StatusCode::ShutdownRequested,
            _ => StatusCode::Unknown,
        }
    }

    pub fn is_known(self) -> bool {
        self != StatusCode::Unknown
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatusCode::Submitted => "Submitted",
            StatusCode::Started => "Started",
            StatusCode::ScenarioStarted => "Scenario Started",
            StatusCode::ScenarioCompleted => "Scenario Completed",
            StatusCode::ScenarioFailed => "Scenario Failed",
            StatusCode::Complete => "Complete",
            StatusCode::Failed => "Failed",
            StatusCode::Error => "Error",
            StatusCode::Information => "Information",
            StatusCode::ShutdownRequested => "Shutdown Requested",
            StatusCode::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of one reported statistic.
#[derive(Debug, Clone, PartialEq)]
pub enum StatValue {
    Number(f64),
    Text(String),
}

impl StatValue {
    fn from_json(value: &Value) -> Self {
        match value {
            Value::Number(n) => n
                .as_f64()
                .map(StatValue::Number)
                .unwrap_or_else(|| StatValue::Text(n.to_string())),
            Value::String(s) => StatValue::Text(s.clone()),
            other => StatValue::Text(other.to_string()),
        }
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Number(n) => write!(f, "{}", n),
            StatValue::Text(s) => f.write_str(s),
        }
    }
}

/// One named statistic from a status payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Statistic {
    pub key: String,
    pub value: StatValue,
}

/// A decoded broker message.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub sender: String,
    pub job: String,
    pub kind: MessageKind,
    /// Free text from the payload. Empty for non-status messages.
    pub message: String,
    pub status: StatusCode,
    /// In payload order. Only filled for a known status.
    pub statistics: Vec<Statistic>,
}

/// Decode one message received on `topic`.
///
/// Non-status messages are returned with [`StatusCode::Unknown`] and their
/// payload is not read. A status message must carry a JSON object with
/// `message` and `status`.
pub fn decode(topic: &str, payload: &[u8]) -> Result<StatusMessage, StatusError> {
    let segments: Vec<&str> = topic.split('/').collect();
    if segments.len() < 4 {
        return Err(StatusError::MalformedTopic(topic.to_string()));
    }

    let mut decoded = StatusMessage {
        sender: segments[1].to_string(),
        job: segments[2].to_string(),
        kind: MessageKind::from_segment(segments[3]),
        message: String::new(),
        status: StatusCode::Unknown,
        statistics: Vec::new(),
    };
    if decoded.kind != MessageKind::Status {
        return Ok(decoded);
    }

    let text = String::from_utf8_lossy(payload);
    let json: Value = serde_json::from_str(&text).map_err(|source| StatusError::MalformedPayload {
        payload: text.to_string(),
        source,
    })?;

    let message = json.get("message").ok_or_else(|| StatusError::MissingField {
        payload: text.to_string(),
        field: "message",
    })?;
    let status = json.get("status").ok_or_else(|| StatusError::MissingField {
        payload: text.to_string(),
        field: "status",
    })?;

    decoded.message = match message {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    };
    decoded.status = status.as_i64().map(StatusCode::from_code).unwrap_or(StatusCode::Unknown);

    if decoded.status.is_known() {
        if let Some(Value::Object(stats)) = json.get("stats") {
            decoded.statistics = stats
                .iter()
                .map(|(key, value)| Statistic {
                    key: key.clone(),
                    value: StatValue::from_json(value),
                })
                .collect();
        }
    }

    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_segments_are_extracted() {
        let msg = decode("psaas/s1/job1/status", br#"{"message":"hi","status":1}"#).unwrap();
        assert_eq!(msg.sender, "s1");
        assert_eq!(msg.job, "job1");
        assert_eq!(msg.kind, MessageKind::Status);
        assert_eq!(msg.status, StatusCode::Started);
        assert_eq!(msg.message, "hi");
    }

    #[test]
    fn test_message_kind_ignores_case() {
        assert_eq!(MessageKind::from_segment("STATUS"), MessageKind::Status);
        assert_eq!(MessageKind::from_segment("ReportIn"), MessageKind::Checkin);
        assert_eq!(MessageKind::from_segment("other"), MessageKind::Unknown);
    }

    #[test]
    fn test_checkin_payload_is_not_parsed() {
        let msg = decode("psaas/s1/job1/reportin", b"not json").unwrap();
        assert_eq!(msg.kind, MessageKind::Checkin);
        assert_eq!(msg.status, StatusCode::Unknown);
    }

    #[test]
    fn test_short_topic_is_rejected() {
        let err = decode("psaas/s1/job1", b"{}").unwrap_err();
        assert!(matches!(err, StatusError::MalformedTopic(t) if t == "psaas/s1/job1"));
    }

    #[test]
    fn test_bad_json_names_payload() {
        let err = decode("psaas/s1/job1/status", b"{oops").unwrap_err();
        assert!(err.to_string().contains("{oops"));
    }

    #[test]
    fn test_missing_status_field() {
        let err = decode("psaas/s1/job1/status", br#"{"message":"x"}"#).unwrap_err();
        assert!(matches!(err, StatusError::MissingField { field: "status", .. }));
    }

    #[test]
    fn test_all_status_codes() {
        let expected = [
            StatusCode::Submitted,
            StatusCode::Started,
            StatusCode::ScenarioStarted,
            StatusCode::ScenarioCompleted,
            StatusCode::ScenarioFailed,
            StatusCode::Complete,
            StatusCode::Failed,
            StatusCode::Error,
            StatusCode::Information,
            StatusCode::ShutdownRequested,
        ];
        for (code, status) in expected.iter().enumerate() {
            assert_eq!(StatusCode::from_code(code as i64), *status);
        }
        assert_eq!(StatusCode::from_code(10), StatusCode::Unknown);
        assert_eq!(StatusCode::from_code(-1), StatusCode::Unknown);
    }

    #[test]
    fn test_string_status_is_unknown() {
        let msg = decode(
            "psaas/s1/job1/status",
            br#"{"message":"x","status":"5","stats":{"a":1}}"#,
        )
        .unwrap();
        assert_eq!(msg.status, StatusCode::Unknown);
        assert!(msg.statistics.is_empty());
    }

    #[test]
    fn test_stats_keep_payload_order() {
        let msg = decode(
            "psaas/s1/job1/status",
            br#"{"message":"step","status":8,"stats":{"zeta":1.5,"alpha":"2024-07-01","mid":3}}"#,
        )
        .unwrap();
        let keys: Vec<&str> = msg.statistics.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        assert_eq!(msg.statistics[0].value, StatValue::Number(1.5));
        assert_eq!(msg.statistics[1].value, StatValue::Text("2024-07-01".into()));
    }

    #[test]
    fn test_status_display_names() {
        assert_eq!(StatusCode::ScenarioFailed.to_string(), "Scenario Failed");
        assert_eq!(StatusCode::ShutdownRequested.to_string(), "Shutdown Requested");
    }
}
