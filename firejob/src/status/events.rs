//! Job events derived from status messages.

use super::message::{MessageKind, Statistic, StatusCode, StatusMessage};

/// Message text the engine sends with [`StatusCode::Complete`] once the whole
/// job has finished. Any other `Complete` message ends a single scenario.
pub const SIMULATION_COMPLETE_MESSAGE: &str = "PSaaS.EXE operations";

/// Marker preceding the useful part of a scenario failure message.
const ERROR_MARKER: &str = "Error:";

const UNKNOWN_ERROR: &str = "Unknown Error";

/// Something a listener cares about.
#[derive(Debug, Clone, PartialEq)]
pub enum JobEvent {
    /// Every scenario has finished. Nothing further is promised after this.
    SimulationComplete,
    ScenarioComplete {
        success: bool,
        /// Set only when `success` is false.
        error_message: Option<String>,
    },
    /// Per-timestep statistics, in the order the engine sent them.
    StatisticsReceived(Vec<Statistic>),
}

impl JobEvent {
    fn scenario_failed(message: &str) -> Self {
        let error_message = if message.is_empty() {
            UNKNOWN_ERROR.to_string()
        } else if let Some(index) = message.find(ERROR_MARKER) {
            message[index + ERROR_MARKER.len()..].trim().to_string()
        } else {
            message.to_string()
        };
        JobEvent::ScenarioComplete {
            success: false,
            error_message: Some(error_message),
        }
    }
}

/// Statuses whose statistics are forwarded.
pub fn carries_statistics(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::Submitted
            | StatusCode::Started
            | StatusCode::ScenarioStarted
            | StatusCode::ScenarioCompleted
            | StatusCode::Failed
            | StatusCode::Error
            | StatusCode::Information
            | StatusCode::ShutdownRequested
    )
}

/// Events for one decoded message. At most one event is produced.
pub fn derive_events(message: &StatusMessage) -> Vec<JobEvent> {
    if message.kind != MessageKind::Status {
        return Vec::new();
    }
    match message.status {
        StatusCode::Complete if message.message == SIMULATION_COMPLETE_MESSAGE => {
            vec![JobEvent::SimulationComplete]
        }
        StatusCode::Complete => vec![JobEvent::ScenarioComplete {
            success: true,
            error_message: None,
        }],
        StatusCode::ScenarioFailed => vec![JobEvent::scenario_failed(&message.message)],
        status
            if carries_statistics(status)
                && !message.message.is_empty()
                && !message.statistics.is_empty() =>
        {
            vec![JobEvent::StatisticsReceived(message.statistics.clone())]
        }
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::message::{decode, StatValue};

    fn events(payload: &str) -> Vec<JobEvent> {
        let message = decode("root/s1/job1/status", payload.as_bytes()).unwrap();
        derive_events(&message)
    }

    #[test]
    fn test_simulation_complete_on_sentinel() {
        let got = events(r#"{"message":"PSaaS.EXE operations","status":5}"#);
        assert_eq!(got, vec![JobEvent::SimulationComplete]);
    }

    #[test]
    fn test_sentinel_must_match_exactly() {
        let got = events(r#"{"message":"PSaaS.EXE operations ","status":5}"#);
        assert_eq!(
            got,
            vec![JobEvent::ScenarioComplete {
                success: true,
                error_message: None
            }]
        );
    }

    #[test]
    fn test_complete_never_yields_statistics() {
        let got = events(r#"{"message":"PSaaS.EXE operations","status":5,"stats":{"a":1}}"#);
        assert_eq!(got, vec![JobEvent::SimulationComplete]);
    }

    #[test]
    fn test_scenario_failed_strips_error_marker() {
        let got = events(r#"{"message":"Scenario X failed: Error: bad input","status":4}"#);
        assert_eq!(
            got,
            vec![JobEvent::ScenarioComplete {
                success: false,
                error_message: Some("bad input".into())
            }]
        );
    }

    #[test]
    fn test_scenario_failed_without_marker_keeps_message() {
        let got = events(r#"{"message":"ran out of memory","status":4}"#);
        assert_eq!(
            got,
            vec![JobEvent::ScenarioComplete {
                success: false,
                error_message: Some("ran out of memory".into())
            }]
        );
    }

    #[test]
    fn test_scenario_failed_with_empty_message() {
        let got = events(r#"{"message":"","status":4,"stats":{"a":1}}"#);
        assert_eq!(
            got,
            vec![JobEvent::ScenarioComplete {
                success: false,
                error_message: Some("Unknown Error".into())
            }]
        );
    }

    #[test]
    fn test_statistics_eligible_statuses() {
        for code in 0..=11 {
            let payload = format!(r#"{{"message":"tick","status":{},"stats":{{"k":2}}}}"#, code);
            let got = events(&payload);
            let has_stats = matches!(got.as_slice(), [JobEvent::StatisticsReceived(_)]);
            let expected = matches!(code, 0 | 1 | 2 | 3 | 6 | 7 | 8 | 9);
            assert_eq!(has_stats, expected, "status code {}", code);
        }
    }

    #[test]
    fn test_statistics_need_message_text() {
        assert!(events(r#"{"message":"","status":8,"stats":{"k":2}}"#).is_empty());
    }

    #[test]
    fn test_empty_stats_yield_nothing() {
        assert!(events(r#"{"message":"tick","status":8,"stats":{}}"#).is_empty());
        assert!(events(r#"{"message":"tick","status":8}"#).is_empty());
    }

    #[test]
    fn test_statistics_event_contents() {
        let got = events(r#"{"message":"tick","status":2,"stats":{"b":"x","a":4}}"#);
        assert_eq!(
            got,
            vec![JobEvent::StatisticsReceived(vec![
                Statistic {
                    key: "b".into(),
                    value: StatValue::Text("x".into())
                },
                Statistic {
                    key: "a".into(),
                    value: StatValue::Number(4.0)
                },
            ])]
        );
    }

    #[test]
    fn test_checkin_yields_nothing() {
        let message = decode("root/s1/job1/reportin", b"{}").unwrap();
        assert!(derive_events(&message).is_empty());
    }

    #[test]
    fn test_decoder_is_stateless_after_completion() {
        let done = r#"{"message":"PSaaS.EXE operations","status":5}"#;
        assert_eq!(events(done), vec![JobEvent::SimulationComplete]);
        assert_eq!(events(done), vec![JobEvent::SimulationComplete]);
    }
}
