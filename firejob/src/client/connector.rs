//! Stream factory used by the client.
//!
//! [`EngineClient`](super::EngineClient) only needs a byte stream per request.
//! [`TcpConnector`] opens real sockets; tests substitute in-memory pipes.

use std::future::Future;
use std::io;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;

/// Opens one stream to the engine.
pub trait Connector: Send + Sync {
    type Stream: AsyncRead + AsyncWrite + Unpin + Send;

    fn connect(&self, host: &str, port: u16) -> impl Future<Output = io::Result<Self::Stream>> + Send;
}

/// Plain TCP.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpConnector;

impl Connector for TcpConnector {
    type Stream = TcpStream;

    fn connect(&self, host: &str, port: u16) -> impl Future<Output = io::Result<TcpStream>> + Send {
        let address = format!("{}:{}", host, port);
        async move {
            let stream = TcpStream::connect(address).await?;
            stream.set_nodelay(true)?;
            Ok(stream)
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::io::DuplexStream;
    use tokio::sync::mpsc;

    /// Hands the engine side of every connection to the test over a channel.
    pub(crate) struct DuplexConnector {
        servers: mpsc::UnboundedSender<DuplexStream>,
        connects: AtomicUsize,
        refuse: Mutex<bool>,
    }

    impl DuplexConnector {
        pub(crate) fn new() -> (Self, mpsc::UnboundedReceiver<DuplexStream>) {
            let (tx, rx) = mpsc::unbounded_channel();
            (
                Self {
                    servers: tx,
                    connects: AtomicUsize::new(0),
                    refuse: Mutex::new(false),
                },
                rx,
            )
        }

        pub(crate) fn connects(&self) -> usize {
            self.connects.load(Ordering::SeqCst)
        }

        pub(crate) fn refuse(&self, refuse: bool) {
            *self.refuse.lock() = refuse;
        }
    }

    impl Connector for DuplexConnector {
        type Stream = DuplexStream;

        fn connect(&self, _host: &str, _port: u16) -> impl Future<Output = io::Result<DuplexStream>> + Send {
            self.connects.fetch_add(1, Ordering::SeqCst);
            let result = if *self.refuse.lock() {
                Err(io::Error::new(io::ErrorKind::ConnectionRefused, "refused"))
            } else {
                let (client, server) = tokio::io::duplex(64 * 1024);
                self.servers
                    .send(server)
                    .map(|_| client)
                    .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "test engine gone"))
            };
            std::future::ready(result)
        }
    }
}
