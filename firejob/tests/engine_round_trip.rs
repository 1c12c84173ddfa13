//! Build, validate, encode and submit a job against an in-process engine.

use std::time::Duration;

use firejob::client::{ClientError, EngineClient, EngineConfig, FlightState, StopPriority};
use firejob::duration::Duration as SimDuration;
use firejob::model::{Entity, FgmOptions, GlobalStatistics, Job, LatLon, WeatherStreamSettings};
use firejob::validation::Validator;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Accepts one connection, reads lines up to `last`, replies, then collects
/// everything else the client sends until it closes.
async fn engine_once(last: &'static str, reply: &'static str) -> (u16, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let handle = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        let mut reader = BufReader::new(socket);
        let mut lines = Vec::new();
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).await.unwrap() == 0 {
                break;
            }
            let line = line.trim_end_matches('\n').to_string();
            let done = line == last;
            lines.push(line);
            if done {
                break;
            }
        }
        reader.get_mut().write_all(reply.as_bytes()).await.unwrap();
        let mut rest = String::new();
        reader.read_to_string(&mut rest).await.unwrap();
        lines.extend(rest.lines().map(str::to_string));
        lines
    });
    (port, handle)
}

fn config(port: u16) -> EngineConfig {
    EngineConfig::new("127.0.0.1", port)
        .with_connect_timeout(Duration::from_secs(5))
        .with_response_timeout(Duration::from_secs(5))
}

fn build_job() -> Job {
    let mut job = Job::new();
    job.comments = "Spring burn planning".into();
    job.set_projection_file("/data/dogrib/elevation.prj");
    job.set_lut_file("/data/dogrib/fbp_lookup_table.lut");
    job.set_fuel_map_file("/data/dogrib/fbp_fuel_type.asc");
    job.set_elevation_file("/data/dogrib/dem.asc");
    job.set_timezone_by_value(25);

    let station = job
        .add_weather_station(1483.0, LatLon::new(51.6547, -115.3617), "Dogrib station")
        .id()
        .to_string();
    let stream = job
        .add_weather_stream(
            &station,
            WeatherStreamSettings {
                filename: "/data/dogrib/weather.txt".into(),
                hffmc_value: 94.0,
                hffmc_hour: 17,
                starting_ffmc: 89.9,
                starting_dmc: 58.5,
                starting_dc: 482.4,
                start_time: "2001-10-16".into(),
                end_time: "2001-10-16".into(),
                ..Default::default()
            },
        )
        .unwrap()
        .id()
        .to_string();
    let ignition = job
        .add_point_ignition("2001-10-16T13:00:00", LatLon::new(51.6547, -115.3617), "")
        .id()
        .to_string();

    let scenario = job.add_scenario("2001-10-16T13:00:00", "2001-10-16T22:00:00", "first run");
    scenario.fgm = FgmOptions {
        max_accel_timestep: Some(SimDuration::create_time(0.0, 2.0, 0.0, false)),
        distance_resolution: Some(1.0),
        perimeter_resolution: Some(1.0),
        stop_at_grid_end: Some(false),
        breaching: Some(true),
        spotting: Some(true),
        ..FgmOptions::default()
    };
    scenario.add_ignition_reference(&ignition);
    scenario.add_weather_stream_reference(&station, &stream);

    job.timestep_settings.add_statistic(GlobalStatistics::TotalBurnArea);
    job
}

#[tokio::test]
async fn test_submit_round_trip() {
    let (port, engine) = engine_once("STARTJOB", "job_20011016133000\n").await;
    let client = EngineClient::new(config(port)).with_validator(Validator::new().with_file_checks(false));
    let job = build_job();

    let name = client.submit(&job).await.unwrap();
    assert_eq!(name, "job_20011016133000");
    assert_eq!(client.state(), FlightState::Succeeded);

    let lines = engine.await.unwrap();
    assert_eq!(&lines[..4], &["STARTUP", "BEGINDATA", "GLOBALCOMMENTS", "Spring burn planning"]);
    assert!(lines.contains(&"scenariostart".to_string()));
    assert!(lines.contains(&"ignitionref".to_string()));
    let start = lines.iter().position(|l| l == "STARTJOB").unwrap();
    assert_eq!(lines[start - 1], "ENDDATA");
    assert_eq!(lines.last().map(String::as_str), Some("SHUTDOWN"));
}

#[tokio::test]
async fn test_invalid_job_never_connects() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let client = EngineClient::new(config(port));

    let err = client.submit(&Job::new()).await.unwrap_err();
    let errors = err.validation_errors().unwrap();
    assert!(!errors.is_empty());

    let accepted = tokio::time::timeout(Duration::from_millis(200), listener.accept()).await;
    assert!(accepted.is_err(), "client connected for an invalid job");
}

#[tokio::test]
async fn test_refused_connection() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = EngineClient::new(config(port));
    let err = client.list_queued().await.unwrap_err();
    assert!(matches!(err, ClientError::Connect { .. }), "{err}");
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_job_listing() {
    let (port, engine) =
        engine_once("LIST_OPTIONS_COMPLETE", "job_a\n  job_b \nCOMPLETE\n").await;
    let client = EngineClient::new(config(port));

    let jobs = client.list_complete().await.unwrap();
    assert_eq!(jobs, vec!["job_a".to_string(), "job_b".to_string()]);
    drop(client);
    assert_eq!(engine.await.unwrap(), vec!["LIST_OPTIONS_COMPLETE".to_string()]);
}

#[tokio::test]
async fn test_stop_job_command() {
    let (port, engine) = engine_once("STOP_JOB job_a|2", "").await;
    let client = EngineClient::new(config(port));

    client.stop_job("job_a", StopPriority::Now).await.unwrap();
    assert_eq!(engine.await.unwrap(), vec!["STOP_JOB job_a|2".to_string()]);
}
