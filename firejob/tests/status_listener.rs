//! Status decoding scenarios and a listener session against a minimal
//! in-process MQTT broker.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use firejob::log::MemoryLogger;
use firejob::status::{
    decode, derive_events, BrokerConfig, JobEvent, JobManager, StatValue, Statistic,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

fn events_for(topic: &str, payload: &str) -> Vec<JobEvent> {
    derive_events(&decode(topic, payload.as_bytes()).unwrap())
}

#[test]
fn test_engine_shutdown_completes_simulation() {
    let events = events_for(
        "root/s1/job1/status",
        r#"{"message":"PSaaS.EXE operations","status":5}"#,
    );
    assert_eq!(events, vec![JobEvent::SimulationComplete]);
}

#[test]
fn test_failed_scenario_reports_error_text() {
    let events = events_for(
        "root/s1/job1/status",
        r#"{"message":"Scenario X failed: Error: bad input","status":4}"#,
    );
    assert_eq!(
        events,
        vec![JobEvent::ScenarioComplete {
            success: false,
            error_message: Some("bad input".to_string()),
        }]
    );
}

#[test]
fn test_statistics_only_for_eligible_statuses() {
    let accepted: Vec<i64> = (0..=12)
        .filter(|code| {
            let payload = format!(
                r#"{{"message":"timestep","status":{},"stats":{{"total_burn_area":12.5}}}}"#,
                code
            );
            matches!(
                events_for("root/s1/job1/status", &payload).as_slice(),
                [JobEvent::StatisticsReceived(_)]
            )
        })
        .collect();
    assert_eq!(accepted, vec![0, 1, 2, 3, 6, 7, 8, 9]);
}

#[test]
fn test_uppercase_status_segment_is_processed() {
    let events = events_for(
        "root/s1/job1/STATUS",
        r#"{"message":"tick","status":1,"stats":{"scenario_current_time":"2001-10-16T14:00:00"}}"#,
    );
    assert_eq!(
        events,
        vec![JobEvent::StatisticsReceived(vec![Statistic {
            key: "scenario_current_time".to_string(),
            value: StatValue::Text("2001-10-16T14:00:00".to_string()),
        }])]
    );
}

async fn read_packet(stream: &mut TcpStream) -> std::io::Result<(u8, Vec<u8>)> {
    let header = stream.read_u8().await?;
    let mut len = 0usize;
    let mut shift = 0;
    loop {
        let byte = stream.read_u8().await?;
        len |= ((byte & 0x7f) as usize) << shift;
        if byte & 0x80 == 0 {
            break;
        }
        shift += 7;
    }
    let mut body = vec![0u8; len];
    stream.read_exact(&mut body).await?;
    Ok((header, body))
}

fn remaining_length(mut len: usize, out: &mut Vec<u8>) {
    loop {
        let mut byte = (len % 128) as u8;
        len /= 128;
        if len > 0 {
            byte |= 0x80;
        }
        out.push(byte);
        if len == 0 {
            break;
        }
    }
}

fn publish(topic: &str, payload: &str) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(&(topic.len() as u16).to_be_bytes());
    body.extend_from_slice(topic.as_bytes());
    body.extend_from_slice(payload.as_bytes());

    let mut packet = vec![0x30];
    remaining_length(body.len(), &mut packet);
    packet.extend(body);
    packet
}

/// Accepts one client, acknowledges its connect and subscribe, reports the
/// subscribed filter and then publishes `messages` at QoS 0.
async fn broker(messages: Vec<(String, String)>) -> (u16, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let (filter_tx, filter_rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let (header, _) = read_packet(&mut socket).await.unwrap();
        assert_eq!(header >> 4, 1, "expected CONNECT");
        socket.write_all(&[0x20, 0x02, 0x00, 0x00]).await.unwrap();

        let (header, body) = read_packet(&mut socket).await.unwrap();
        assert_eq!(header, 0x82, "expected SUBSCRIBE");
        let filter_len = u16::from_be_bytes([body[2], body[3]]) as usize;
        let filter = String::from_utf8(body[4..4 + filter_len].to_vec()).unwrap();
        let qos = body[4 + filter_len];
        socket
            .write_all(&[0x90, 0x03, body[0], body[1], qos])
            .await
            .unwrap();
        let _ = filter_tx.send(format!("{}@{}", filter, qos));

        for (topic, payload) in messages {
            socket.write_all(&publish(&topic, &payload)).await.unwrap();
        }

        while read_packet(&mut socket).await.is_ok() {}
    });

    (port, filter_rx)
}

#[tokio::test]
async fn test_listener_session() {
    let topic = "fires/engine01/job1/status".to_string();
    let (port, filter) = broker(vec![
        (
            topic.clone(),
            r#"{"message":"Timestep","status":8,"stats":{"total_burn_area":42.5}}"#.to_string(),
        ),
        ("fires/engine01/job1/reportin".to_string(), "alive".to_string()),
        (topic.clone(), r#"{"message":"scen0","status":5}"#.to_string()),
        (topic.clone(), r#"{"message":"PSaaS.EXE operations","status":5}"#.to_string()),
    ])
    .await;

    let config = BrokerConfig::new("127.0.0.1", port)
        .with_topic("fires")
        .with_client_id("firejob-test")
        .with_connect_timeout(Duration::from_secs(5));
    let memory = Arc::new(MemoryLogger::new());
    let manager = JobManager::new(" job1 ", config).unwrap().with_logger(memory.clone());

    let handled = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&handled);
    manager.on_event(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    let mut events = manager.take_events().unwrap();

    manager.start().await.unwrap();
    assert!(manager.is_running());
    // Second start is a no-op; the broker only accepts one connection.
    manager.start().await.unwrap();

    let filter = tokio::time::timeout(Duration::from_secs(5), filter).await.unwrap().unwrap();
    assert_eq!(filter, "fires/+/job1/status@2");

    let mut received = Vec::new();
    while received.len() < 3 {
        let event = tokio::time::timeout(Duration::from_secs(5), events.recv())
            .await
            .unwrap()
            .unwrap();
        received.push(event);
    }
    assert_eq!(
        received,
        vec![
            JobEvent::StatisticsReceived(vec![Statistic {
                key: "total_burn_area".to_string(),
                value: StatValue::Number(42.5),
            }]),
            JobEvent::ScenarioComplete {
                success: true,
                error_message: None,
            },
            JobEvent::SimulationComplete,
        ]
    );
    assert_eq!(handled.load(Ordering::SeqCst), 3);
    assert!(memory.contains("listening for fires/+/job1/status"));

    manager.dispose().await;
    assert!(!manager.is_running());
}
