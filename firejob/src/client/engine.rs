//! The engine client.

use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::time::timeout;

use super::connector::{Connector, TcpConnector};
use super::flight::{FlightState, SingleFlight};
use super::responses::{
    parse_defaults, parse_job_list, parse_licenses, parse_timezones, JobDefaults, License,
    StopPriority,
};
use super::{ClientError, EngineConfig};
use crate::log::{Logger, NoOpLogger};
use crate::model::{Job, TimezoneName};
use crate::protocol::{encode_submission, tokens};
use crate::validation::Validator;
use crate::{log_debug, log_info, log_warn};

/// Size of one read from the engine.
const READ_CHUNK: usize = 8 * 1024;

/// Talks to one engine over its line protocol.
///
/// Each call opens its own connection and closes it when done. A client
/// runs one call at a time; a call made while another is in flight fails
/// with [`ClientError::Concurrency`] without connecting. Use separate
/// clients for parallel requests.
pub struct EngineClient<C: Connector = TcpConnector> {
    config: EngineConfig,
    connector: C,
    validator: Validator,
    flight: SingleFlight,
    logger: Arc<dyn Logger>,
}

impl EngineClient<TcpConnector> {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_connector(config, TcpConnector)
    }
}

impl<C: Connector> EngineClient<C> {
    pub fn with_connector(config: EngineConfig, connector: C) -> Self {
        Self {
            config,
            connector,
            validator: Validator::new(),
            flight: SingleFlight::new(),
            logger: Arc::new(NoOpLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    /// Replace the validator run before every submission.
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> FlightState {
        self.flight.state()
    }

    /// Validate and submit a job. Returns the name the engine assigned.
    pub async fn submit(&self, job: &Job) -> Result<String, ClientError> {
        let guard = self.flight.begin()?;
        let errors = self.validator.check(job);
        if !errors.is_empty() {
            log_warn!(self.logger, "job rejected with {} validation error(s)", errors.len());
            return guard.settle(Err(ClientError::InvalidJob(errors)));
        }
        guard.settle(self.submit_exchange(job).await)
    }

    async fn submit_exchange(&self, job: &Job) -> Result<String, ClientError> {
        let mut stream = self.open().await?;
        let frame = encode_submission(job);
        tracing::debug!(
            engine = %self.config.address(),
            lines = frame.line_count(),
            bytes = frame.as_str().len(),
            "writing job"
        );
        stream.write_all(frame.as_str().as_bytes()).await?;
        stream.flush().await?;

        let mut buf = vec![0u8; READ_CHUNK];
        let n = self.read_chunk(&mut stream, &mut buf).await?;
        if n == 0 {
            return Err(ClientError::ConnectionClosed);
        }
        let name = String::from_utf8_lossy(&buf[..n]).trim().to_string();

        stream.write_all(line(tokens::SHUTDOWN).as_bytes()).await?;
        stream.shutdown().await?;

        if name.is_empty() {
            return Err(ClientError::Protocol("engine returned an empty job name".into()));
        }
        log_info!(self.logger, "job {} submitted", name);
        Ok(name)
    }

    /// Ask the engine for its option defaults.
    pub async fn fetch_defaults(&self) -> Result<JobDefaults, ClientError> {
        let request = format!("{}{}", line(tokens::STARTUP), line(tokens::GETDEFAULTS));
        let text = self.request_until_close(&request).await?;
        Ok(parse_defaults(&text))
    }

    /// Time zones the engine knows, for [`Job::set_timezone_by_value`].
    pub async fn fetch_timezones(&self) -> Result<Vec<TimezoneName>, ClientError> {
        let text = self
            .request(&line(tokens::LIST_TIMEZONES), |text| text.contains(tokens::COMPLETE))
            .await?;
        Ok(parse_timezones(&text))
    }

    /// Third-party licenses used by the engine's components.
    pub async fn fetch_licenses(&self) -> Result<Vec<License>, ClientError> {
        let text = self
            .request(&line(tokens::GET_LICENSES), |text| text.ends_with('\n'))
            .await?;
        Ok(parse_licenses(&text))
    }

    /// Archive a job directory as a tar file. The directory is kept.
    pub async fn archive_tar(&self, job: &str) -> Result<(), ClientError> {
        self.command(&format!("{} {}", tokens::TAR, job)).await
    }

    /// Archive a job directory as a zip file. The directory is kept.
    pub async fn archive_zip(&self, job: &str) -> Result<(), ClientError> {
        self.command(&format!("{} {}", tokens::ZIP, job)).await
    }

    /// Delete a job directory. Not reversible.
    pub async fn delete_job(&self, job: &str) -> Result<(), ClientError> {
        self.command(&format!("{} {}", tokens::DELETE, job)).await
    }

    pub async fn stop_job(&self, job: &str, priority: StopPriority) -> Result<(), ClientError> {
        self.command(&format!("{} {}|{}", tokens::STOP_JOB, job, priority.code()))
            .await
    }

    /// Jobs that have finished, successfully or not.
    pub async fn list_complete(&self) -> Result<Vec<String>, ClientError> {
        self.list(tokens::LIST_OPTIONS_COMPLETE).await
    }

    pub async fn list_running(&self) -> Result<Vec<String>, ClientError> {
        self.list(tokens::LIST_OPTIONS_RUNNING).await
    }

    pub async fn list_queued(&self) -> Result<Vec<String>, ClientError> {
        self.list(tokens::LIST_OPTIONS_QUEUED).await
    }

    async fn list(&self, token: &str) -> Result<Vec<String>, ClientError> {
        let text = self
            .request(&line(token), |text| text.contains(tokens::COMPLETE))
            .await?;
        Ok(parse_job_list(&text))
    }

    /// Write `request`, then read until `done` holds or the engine closes.
    async fn request<F>(&self, request: &str, done: F) -> Result<String, ClientError>
    where
        F: Fn(&str) -> bool,
    {
        let guard = self.flight.begin()?;
        guard.settle(self.request_exchange(request, done, false).await)
    }

    /// Write `request`, close the write side and read until the engine
    /// hangs up.
    ///
    /// A reply with no terminator can only end with the connection. If the
    /// engine goes quiet without closing, whatever arrived before the
    /// response timeout is the reply.
    async fn request_until_close(&self, request: &str) -> Result<String, ClientError> {
        let guard = self.flight.begin()?;
        guard.settle(self.request_exchange(request, |_| false, true).await)
    }

    async fn request_exchange<F>(
        &self,
        request: &str,
        done: F,
        until_close: bool,
    ) -> Result<String, ClientError>
    where
        F: Fn(&str) -> bool,
    {
        let mut stream = self.open().await?;
        stream.write_all(request.as_bytes()).await?;
        stream.flush().await?;
        if until_close {
            stream.shutdown().await?;
        }

        let mut text = String::new();
        let mut buf = vec![0u8; READ_CHUNK];
        loop {
            let n = match self.read_chunk(&mut stream, &mut buf).await {
                Ok(n) => n,
                Err(ClientError::Timeout { .. }) if until_close && !text.is_empty() => {
                    log_warn!(
                        self.logger,
                        "engine went quiet without closing; keeping {} bytes",
                        text.len()
                    );
                    break;
                }
                Err(e) => return Err(e),
            };
            if n == 0 {
                break;
            }
            text.push_str(&String::from_utf8_lossy(&buf[..n]));
            if done(&text) {
                break;
            }
        }
        // The engine may already have hung up.
        let _ = stream.shutdown().await;
        log_debug!(self.logger, "received {} bytes from engine", text.len());
        Ok(text)
    }

    /// Write one line, close the write side and wait for the engine to hang up.
    async fn command(&self, request: &str) -> Result<(), ClientError> {
        let guard = self.flight.begin()?;
        let result = async {
            let mut stream = self.open().await?;
            stream.write_all(line(request).as_bytes()).await?;
            stream.shutdown().await?;
            let mut buf = vec![0u8; READ_CHUNK];
            while self.read_chunk(&mut stream, &mut buf).await? > 0 {}
            log_debug!(self.logger, "sent {}", request);
            Ok::<(), ClientError>(())
        }
        .await;
        guard.settle(result)
    }

    async fn open(&self) -> Result<C::Stream, ClientError> {
        let address = self.config.address();
        log_debug!(self.logger, "connecting to engine at {}", address);
        match timeout(
            self.config.connect_timeout,
            self.connector.connect(&self.config.host, self.config.port),
        )
        .await
        {
            Ok(Ok(stream)) => Ok(stream),
            Ok(Err(source)) => Err(ClientError::Connect { address, source }),
            Err(_) => Err(timed_out("connect", self.config.connect_timeout)),
        }
    }

    async fn read_chunk<S>(&self, stream: &mut S, buf: &mut [u8]) -> Result<usize, ClientError>
    where
        S: AsyncRead + Unpin,
    {
        timeout(self.config.response_timeout, stream.read(buf))
            .await
            .map_err(|_| timed_out("engine response", self.config.response_timeout))?
            .map_err(ClientError::from)
    }
}

fn line(text: &str) -> String {
    format!("{}\n", text)
}

fn timed_out(operation: &'static str, after: Duration) -> ClientError {
    ClientError::Timeout {
        operation,
        timeout: after,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::connector::testing::DuplexConnector;
    use crate::log::MemoryLogger;
    use crate::duration::Duration as SimDuration;
    use crate::model::{Entity, FgmOptions, LatLon, WeatherStreamSettings};
    use tokio::io::{AsyncBufReadExt, BufReader, DuplexStream};
    use tokio::sync::mpsc;

    fn valid_job() -> Job {
        let mut job = Job::new();
        job.set_projection_file("/data/a.prj");
        job.set_lut_file("/data/a.lut");
        job.set_fuel_map_file("/data/a.tif");
        job.set_timezone_by_value(18);
        let station = job
            .add_weather_station(1000.0, LatLon::new(51.0, -115.0), "")
            .id()
            .to_string();
        job.add_weather_stream(
            &station,
            WeatherStreamSettings {
                filename: "/data/wx.txt".into(),
                hffmc_value: 86.0,
                hffmc_hour: 13,
                starting_ffmc: 86.0,
                starting_dmc: 20.0,
                starting_dc: 300.0,
                start_time: "2024-06-01".into(),
                end_time: "2024-06-02".into(),
                ..Default::default()
            },
        )
        .unwrap();
        let scenario = job.add_scenario("2024-06-01T13:00:00", "2024-06-02T13:00:00", "");
        scenario.fgm = FgmOptions {
            max_accel_timestep: Some(SimDuration::create_time(0.0, 2.0, 0.0, false)),
            distance_resolution: Some(1.0),
            perimeter_resolution: Some(1.0),
            stop_at_grid_end: Some(true),
            breaching: Some(true),
            spotting: Some(true),
            ..FgmOptions::default()
        };
        job
    }

    fn client(config: EngineConfig) -> (EngineClient<DuplexConnector>, mpsc::UnboundedReceiver<DuplexStream>) {
        let (connector, servers) = DuplexConnector::new();
        let client = EngineClient::with_connector(config, connector)
            .with_validator(Validator::new().with_file_checks(false));
        (client, servers)
    }

    /// Read request lines until `last`, then send `reply` and read to EOF.
    async fn fake_engine(server: DuplexStream, last: &str, reply: &str) -> Vec<String> {
        let mut reader = BufReader::new(server);
        let mut lines = Vec::new();
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).await.unwrap() == 0 {
                break;
            }
            let line = line.trim_end_matches('\n').to_string();
            let finished = line == last;
            lines.push(line);
            if finished {
                break;
            }
        }
        reader.get_mut().write_all(reply.as_bytes()).await.unwrap();
        let mut rest = String::new();
        reader.read_to_string(&mut rest).await.unwrap();
        lines.extend(rest.lines().map(str::to_string));
        lines
    }

    #[tokio::test]
    async fn test_submit_exchange() {
        let (client, mut servers) = client(EngineConfig::default());
        let job = valid_job();

        let engine = tokio::spawn(async move {
            let server = servers.recv().await.unwrap();
            fake_engine(server, "STARTJOB", "job_20240601\n").await
        });

        let name = client.submit(&job).await.unwrap();
        assert_eq!(name, "job_20240601");
        assert_eq!(client.state(), FlightState::Succeeded);

        let lines = engine.await.unwrap();
        assert_eq!(&lines[..2], &["STARTUP", "BEGINDATA"]);
        let n = lines.len();
        assert_eq!(&lines[n - 3..], &["ENDDATA", "STARTJOB", "SHUTDOWN"]);
    }

    #[tokio::test]
    async fn test_concurrent_call_is_rejected_without_connecting() {
        let (client, mut servers) = client(EngineConfig::default());
        let job = valid_job();

        let engine = tokio::spawn(async move {
            let server = servers.recv().await.unwrap();
            fake_engine(server, "STARTJOB", "job_1\n").await;
            servers.try_recv().is_err()
        });

        let (first, second) = tokio::join!(client.submit(&job), async {
            tokio::task::yield_now().await;
            client.submit(&job).await
        });
        assert_eq!(first.unwrap(), "job_1");
        assert!(matches!(second, Err(ClientError::Concurrency)));
        assert_eq!(client.connector.connects(), 1);
        assert!(engine.await.unwrap());
    }

    #[tokio::test]
    async fn test_invalid_job_is_not_sent() {
        let (client, _servers) = client(EngineConfig::default());
        let err = client.submit(&Job::new()).await.unwrap_err();
        let errors = err.validation_errors().unwrap();
        assert!(!errors.is_empty());
        assert_eq!(client.connector.connects(), 0);
        assert_eq!(client.state(), FlightState::Failed);
    }

    #[tokio::test]
    async fn test_connect_failure() {
        let (client, _servers) = client(EngineConfig::default());
        client.connector.refuse(true);
        let err = client.fetch_timezones().await.unwrap_err();
        assert!(matches!(err, ClientError::Connect { .. }));
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_engine_closing_early() {
        let (client, mut servers) = client(EngineConfig::default());
        let job = valid_job();
        let engine = tokio::spawn(async move {
            let server = servers.recv().await.unwrap();
            drop(server);
        });
        let err = client.submit(&job).await.unwrap_err();
        engine.await.unwrap();
        assert!(err.is_transport());
    }

    #[tokio::test(start_paused = true)]
    async fn test_response_timeout() {
        let config = EngineConfig::default().with_response_timeout(Duration::from_secs(2));
        let (client, mut servers) = client(config);
        let engine = tokio::spawn(async move {
            let _server = servers.recv().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });
        let err = client.list_running().await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Timeout {
                operation: "engine response",
                ..
            }
        ));
        engine.abort();
    }

    #[tokio::test]
    async fn test_list_and_timezones() {
        let (client, mut servers) = client(EngineConfig::default());
        let engine = tokio::spawn(async move {
            let first = servers.recv().await.unwrap();
            let a = fake_engine(first, "LIST_OPTIONS_QUEUED", "job_a\njob_b\nCOMPLETE\n").await;
            let second = servers.recv().await.unwrap();
            let b = fake_engine(second, "LIST_TIMEZONES", "UTC|0|MDT|22\nCOMPLETE\n").await;
            (a, b)
        });

        let queued = client.list_queued().await.unwrap();
        assert_eq!(queued, vec!["job_a", "job_b"]);
        let zones = client.fetch_timezones().await.unwrap();
        assert_eq!(zones.len(), 2);
        assert_eq!(zones[1].value, 22);

        let (a, b) = engine.await.unwrap();
        assert_eq!(a, vec!["LIST_OPTIONS_QUEUED"]);
        assert_eq!(b, vec!["LIST_TIMEZONES"]);
    }

    #[tokio::test]
    async fn test_admin_commands() {
        let memory = Arc::new(MemoryLogger::new());
        let (client, mut servers) = client(EngineConfig::default());
        let client = client.with_logger(memory.clone());
        let engine = tokio::spawn(async move {
            let mut seen = Vec::new();
            for _ in 0..2 {
                let server = servers.recv().await.unwrap();
                seen.extend(fake_engine(server, "", "").await);
            }
            seen
        });

        client.stop_job("job_a", StopPriority::Now).await.unwrap();
        client.archive_zip("job_a").await.unwrap();

        let seen = engine.await.unwrap();
        assert_eq!(seen, vec!["STOP_JOB job_a|2", "ZIP job_a"]);
        assert!(memory.contains("sent STOP_JOB job_a|2"));
    }

    #[tokio::test]
    async fn test_fetch_defaults_reads_until_close() {
        let (client, mut servers) = client(EngineConfig::default());
        let engine = tokio::spawn(async move {
            let server = servers.recv().await.unwrap();
            let mut reader = BufReader::new(server);
            let mut request = String::new();
            reader.read_line(&mut request).await.unwrap();
            reader.read_line(&mut request).await.unwrap();
            let mut server = reader.into_inner();
            server.write_all(b"DISTRES\n1\nPERIMRES\n").await.unwrap();
            server.write_all(b"2.5\nJOBLOCATION\n/jobs\n").await.unwrap();
            drop(server);
            request
        });
        let defaults = client.fetch_defaults().await.unwrap();
        assert_eq!(defaults.fgm.distance_resolution, Some(1.0));
        assert_eq!(defaults.fgm.perimeter_resolution, Some(2.5));
        assert_eq!(defaults.job_directory.as_deref(), Some("/jobs"));
        assert_eq!(engine.await.unwrap(), "STARTUP\nGETDEFAULTS\n");
    }

    #[tokio::test]
    async fn test_fetch_defaults_closes_write_side() {
        let (client, mut servers) = client(EngineConfig::default());
        let engine = tokio::spawn(async move {
            let mut server = servers.recv().await.unwrap();
            let mut request = String::new();
            // Ends only once the client has closed its side.
            server.read_to_string(&mut request).await.unwrap();
            server.write_all(b"DISTRES\n1.5\nPERIMRES\n2.0\n").await.unwrap();
            request
        });
        let defaults = client.fetch_defaults().await.unwrap();
        assert_eq!(defaults.fgm.distance_resolution, Some(1.5));
        assert_eq!(defaults.fgm.perimeter_resolution, Some(2.0));
        assert_eq!(engine.await.unwrap(), "STARTUP\nGETDEFAULTS\n");
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_defaults_keeps_reply_when_engine_stays_open() {
        let config = EngineConfig::default().with_response_timeout(Duration::from_secs(2));
        let (client, mut servers) = client(config);
        let engine = tokio::spawn(async move {
            let mut server = servers.recv().await.unwrap();
            server.write_all(b"DISTRES\n1.5\nPERIMRES\n2.0\n").await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
            drop(server);
        });
        let defaults = client.fetch_defaults().await.unwrap();
        assert_eq!(defaults.fgm.distance_resolution, Some(1.5));
        assert_eq!(defaults.fgm.perimeter_resolution, Some(2.0));
        assert_eq!(client.state(), FlightState::Succeeded);
        engine.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_defaults_times_out_on_silence() {
        let config = EngineConfig::default().with_response_timeout(Duration::from_secs(2));
        let (client, mut servers) = client(config);
        let engine = tokio::spawn(async move {
            let _server = servers.recv().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });
        let err = client.fetch_defaults().await.unwrap_err();
        assert!(matches!(err, ClientError::Timeout { .. }));
        engine.abort();
    }
}
