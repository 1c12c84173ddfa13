//! Long-lived status listener for one job.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use rumqttc::{AsyncClient, Event, EventLoop, MqttOptions, Packet, QoS};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use super::events::{derive_events, JobEvent};
use super::message::decode;
use super::{BrokerConfig, StatusError};
use crate::log::{Logger, NoOpLogger};
use crate::{log_debug, log_info, log_warn};

/// Pending requests the MQTT client may queue.
const REQUEST_CAPACITY: usize = 10;

/// Events buffered for a receiver that is not keeping up.
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Pause after a broker error before the event loop reconnects.
const RECONNECT_DELAY: Duration = Duration::from_secs(2);

/// Time allowed to flush the disconnect packet on shutdown.
const DISCONNECT_GRACE: Duration = Duration::from_millis(500);

type EventHandler = Arc<dyn Fn(&JobEvent) + Send + Sync>;

struct Running {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

/// Listens for status messages about one job and turns them into
/// [`JobEvent`]s.
///
/// Events go to every handler registered with [`JobManager::on_event`] and
/// to the channel returned by [`JobManager::take_events`].
///
/// ```ignore
/// let manager = JobManager::new("job_20240701", BrokerConfig::default())?;
/// let mut events = manager.take_events().unwrap();
/// manager.start().await?;
/// while let Some(event) = events.recv().await {
///     if event == JobEvent::SimulationComplete {
///         break;
///     }
/// }
/// manager.dispose().await;
/// ```
pub struct JobManager {
    job_name: String,
    config: BrokerConfig,
    logger: Arc<dyn Logger>,
    handlers: Arc<RwLock<Vec<EventHandler>>>,
    events_tx: mpsc::Sender<JobEvent>,
    events_rx: Mutex<Option<mpsc::Receiver<JobEvent>>>,
    running: Mutex<Option<Running>>,
}

impl JobManager {
    /// Leading and trailing whitespace is removed from `job_name`.
    pub fn new(job_name: &str, config: BrokerConfig) -> Result<Self, StatusError> {
        let job_name = job_name.trim();
        if job_name.is_empty() {
            return Err(StatusError::EmptyJobName);
        }
        let (events_tx, events_rx) = mpsc::channel(DEFAULT_EVENT_CAPACITY);
        Ok(Self {
            job_name: job_name.to_string(),
            config,
            logger: Arc::new(NoOpLogger),
            handlers: Arc::new(RwLock::new(Vec::new())),
            events_tx,
            events_rx: Mutex::new(Some(events_rx)),
            running: Mutex::new(None),
        })
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn job_name(&self) -> &str {
        &self.job_name
    }

    pub fn config(&self) -> &BrokerConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.running.lock().is_some()
    }

    /// Register a callback run for every event, on the listener task.
    pub fn on_event<F>(&self, handler: F)
    where
        F: Fn(&JobEvent) + Send + Sync + 'static,
    {
        self.handlers.write().push(Arc::new(handler));
    }

    /// The event channel. Only the first call returns it.
    pub fn take_events(&self) -> Option<mpsc::Receiver<JobEvent>> {
        self.events_rx.lock().take()
    }

    /// Connect, subscribe and start listening. Does nothing if already started.
    pub async fn start(&self) -> Result<(), StatusError> {
        if self.is_running() {
            return Ok(());
        }

        let address = self.config.address();
        let client_id = self.config.resolve_client_id();
        let filter = self.config.status_filter(&self.job_name);

        let mut options = MqttOptions::new(client_id.clone(), self.config.host.clone(), self.config.port);
        options.set_keep_alive(self.config.keep_alive);
        if let Some(username) = &self.config.username {
            options.set_credentials(username.clone(), self.config.password.clone().unwrap_or_default());
        }

        let (client, mut eventloop) = AsyncClient::new(options, REQUEST_CAPACITY);
        match timeout(self.config.connect_timeout, wait_for_connack(&mut eventloop)).await {
            Err(_) => {
                return Err(StatusError::ConnectTimeout {
                    address,
                    timeout: self.config.connect_timeout,
                })
            }
            Ok(Err(source)) => {
                return Err(StatusError::Connection {
                    address,
                    source: Box::new(source),
                })
            }
            Ok(Ok(())) => {}
        }
        client.subscribe(filter.clone(), QoS::ExactlyOnce).await?;

        tracing::info!(broker = %address, client_id = %client_id, topic = %filter, "status listener connected");
        log_info!(self.logger, "listening for {} on {}", filter, address);

        let cancel = CancellationToken::new();
        let dispatcher = Dispatcher {
            handlers: Arc::clone(&self.handlers),
            events: self.events_tx.clone(),
            logger: Arc::clone(&self.logger),
        };
        let listener = Listener {
            client,
            eventloop,
            filter,
            dispatcher,
            cancel: cancel.clone(),
        };

        let mut running = self.running.lock();
        if running.is_some() {
            // Another start() won the race; drop this connection.
            cancel.cancel();
        }
        let task = tokio::spawn(listener.run());
        if running.is_none() {
            *running = Some(Running { cancel, task });
        }
        Ok(())
    }

    /// Disconnect and stop the listener task. Safe to call when not running.
    pub async fn dispose(&self) {
        let running = self.running.lock().take();
        if let Some(running) = running {
            running.cancel.cancel();
            if let Err(e) = running.task.await {
                tracing::warn!(error = %e, "status listener task ended abnormally");
            }
            log_debug!(self.logger, "status listener for {} stopped", self.job_name);
        }
    }
}

impl Drop for JobManager {
    fn drop(&mut self) {
        if let Some(running) = self.running.get_mut().take() {
            running.cancel.cancel();
        }
    }
}

async fn wait_for_connack(eventloop: &mut EventLoop) -> Result<(), rumqttc::ConnectionError> {
    loop {
        if let Event::Incoming(Packet::ConnAck(_)) = eventloop.poll().await? {
            return Ok(());
        }
    }
}

/// Owns the MQTT connection after a successful start.
struct Listener {
    client: AsyncClient,
    eventloop: EventLoop,
    filter: String,
    dispatcher: Dispatcher,
    cancel: CancellationToken,
}

impl Listener {
    async fn run(mut self) {
        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => break,
                polled = self.eventloop.poll() => match polled {
                    Ok(Event::Incoming(Packet::Publish(publish))) => {
                        self.dispatcher.dispatch(&publish.topic, &publish.payload);
                    }
                    Ok(Event::Incoming(Packet::ConnAck(_))) => {
                        tracing::debug!(topic = %self.filter, "reconnected, subscribing again");
                        if let Err(e) = self.client.try_subscribe(self.filter.clone(), QoS::ExactlyOnce) {
                            log_warn!(self.dispatcher.logger, "resubscribe to {} failed: {}", self.filter, e);
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        log_warn!(self.dispatcher.logger, "broker connection error: {}", e);
                        tokio::select! {
                            _ = self.cancel.cancelled() => break,
                            _ = tokio::time::sleep(RECONNECT_DELAY) => {}
                        }
                    }
                },
            }
        }

        if self.client.try_disconnect().is_ok() {
            let _ = timeout(DISCONNECT_GRACE, self.eventloop.poll()).await;
        }
    }
}

/// Decodes messages and fans events out to handlers and the channel.
struct Dispatcher {
    handlers: Arc<RwLock<Vec<EventHandler>>>,
    events: mpsc::Sender<JobEvent>,
    logger: Arc<dyn Logger>,
}

impl Dispatcher {
    /// Returns how many events the message produced.
    fn dispatch(&self, topic: &str, payload: &[u8]) -> usize {
        let message = match decode(topic, payload) {
            Ok(message) => message,
            Err(e) => {
                log_warn!(self.logger, "ignoring message on {}: {}", topic, e);
                return 0;
            }
        };
        tracing::trace!(topic, status = %message.status, "status message");

        let events = derive_events(&message);
        for event in &events {
            let handlers: Vec<EventHandler> = self.handlers.read().clone();
            for handler in handlers {
                handler(event);
            }
            match self.events.try_send(event.clone()) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    log_warn!(self.logger, "event channel full, dropping {:?}", event);
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {}
            }
        }
        events.len()
    }
}
