//! A reconnecting TCP client for the telemetry wire format.

use std::collections::VecDeque;
use std::fmt;
use std::io::Write;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::{Duration, Instant};

use crate::codec::encode_frame;
use crate::error::TelemetryError;
use crate::frame::TelemetryFrame;

/// Tunables for [`TelemetryClient`]'s reconnect and queuing behavior.
#[derive(Clone, Debug, PartialEq)]
pub struct TelemetryConfig {
    /// Host to connect to.
    pub host: String,
    /// Port to connect to.
    pub port: u16,
    /// Backoff before the first reconnect attempt.
    pub initial_backoff: Duration,
    /// Upper bound the backoff is capped at.
    pub max_backoff: Duration,
    /// Multiplier applied to the backoff after each failed attempt.
    pub backoff_multiplier: f64,
    /// Maximum number of unsent frames held in the outbound queue; the
    /// oldest frame is dropped to make room for a new one past this bound.
    pub max_queue_len: usize,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 8765,
            initial_backoff: Duration::from_millis(250),
            max_backoff: Duration::from_secs(10),
            backoff_multiplier: 2.0,
            max_queue_len: 1024,
        }
    }
}

/// A [`TelemetryConfig`] field was out of range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `port` was zero.
    ZeroPort,
    /// `initial_backoff` was zero, or exceeded `max_backoff`.
    BackoffOutOfRange,
    /// `backoff_multiplier` was not finite and greater than 1.0.
    InvalidMultiplier,
    /// `max_queue_len` was zero.
    ZeroQueueLen,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroPort => write!(f, "port must be nonzero"),
            Self::BackoffOutOfRange => {
                write!(f, "initial_backoff must be nonzero and at most max_backoff")
            }
            Self::InvalidMultiplier => write!(f, "backoff_multiplier must be finite and greater than 1.0"),
            Self::ZeroQueueLen => write!(f, "max_queue_len must be nonzero"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl TelemetryConfig {
    /// Validates that every tunable is in a range the client can actually
    /// back off and queue with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::ZeroPort);
        }
        if self.initial_backoff.is_zero() || self.initial_backoff > self.max_backoff {
            return Err(ConfigError::BackoffOutOfRange);
        }
        if !self.backoff_multiplier.is_finite() || self.backoff_multiplier <= 1.0 {
            return Err(ConfigError::InvalidMultiplier);
        }
        if self.max_queue_len == 0 {
            return Err(ConfigError::ZeroQueueLen);
        }
        Ok(())
    }
}

/// A reconnecting TCP sender for [`TelemetryFrame`]s.
///
/// `send` never blocks waiting on a socket: a frame is pushed onto the
/// outbound queue, then the client tries to flush as much of the queue as
/// the current connection (if any) will take. A failed write drops the
/// connection and leaves the unsent frame at the front of the queue, per
/// the "unsent packets are re-queued on socket error" contract; the next
/// `send` retries the connection once its backoff has elapsed.
pub struct TelemetryClient {
    config: TelemetryConfig,
    stream: Option<TcpStream>,
    backoff: Duration,
    next_attempt: Instant,
    queue: VecDeque<TelemetryFrame>,
}

impl TelemetryClient {
    /// Builds a disconnected client that will attempt its first connection
    /// on the next `send`.
    pub fn new(config: TelemetryConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let backoff = config.initial_backoff;
        Ok(Self {
            config,
            stream: None,
            backoff,
            next_attempt: Instant::now(),
            queue: VecDeque::new(),
        })
    }

    /// True if the client currently holds a live connection.
    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    /// Number of frames waiting to be sent.
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Queues `frame` and attempts to flush the outbound queue.
    ///
    /// Returns the number of frames successfully flushed. A connection or
    /// write failure is not an error here — the frame stays queued and a
    /// future `send` retries once the backoff elapses.
    pub fn send(&mut self, frame: TelemetryFrame) -> usize {
        if self.queue.len() >= self.config.max_queue_len {
            self.queue.pop_front();
        }
        self.queue.push_back(frame);
        self.flush()
    }

    /// Attempts to drain the outbound queue over the current connection,
    /// reconnecting first if necessary and due for a retry.
    pub fn flush(&mut self) -> usize {
        if !self.ensure_connected() {
            return 0;
        }

        let mut sent = 0;
        while let Some(frame) = self.queue.front() {
            let mut buf = Vec::new();
            if encode_frame(&mut buf, frame).is_err() {
                // Malformed frame content cannot become well-formed by
                // retrying; drop it rather than stalling the queue forever.
                self.queue.pop_front();
                continue;
            }
            match self.write_all(&buf) {
                Ok(()) => {
                    self.queue.pop_front();
                    sent += 1;
                }
                Err(_) => {
                    self.disconnect();
                    break;
                }
            }
        }
        sent
    }

    fn write_all(&mut self, buf: &[u8]) -> Result<(), TelemetryError> {
        match &mut self.stream {
            Some(stream) => {
                stream.write_all(buf)?;
                Ok(())
            }
            None => Err(TelemetryError::NotConnected),
        }
    }

    fn ensure_connected(&mut self) -> bool {
        if self.stream.is_some() {
            return true;
        }
        if Instant::now() < self.next_attempt {
            return false;
        }

        match self.connect() {
            Ok(stream) => {
                self.stream = Some(stream);
                self.backoff = self.config.initial_backoff;
                true
            }
            Err(_) => {
                self.next_attempt = Instant::now() + self.backoff;
                self.backoff = self
                    .backoff
                    .mul_f64(self.config.backoff_multiplier)
                    .min(self.config.max_backoff);
                false
            }
        }
    }

    fn connect(&self) -> Result<TcpStream, TelemetryError> {
        let addr = (self.config.host.as_str(), self.config.port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| {
                TelemetryError::Io(std::io::Error::new(
                    std::io::ErrorKind::AddrNotAvailable,
                    format!("no address resolved for {}:{}", self.config.host, self.config.port),
                ))
            })?;
        let stream = TcpStream::connect(addr)?;
        stream.set_nodelay(true)?;
        Ok(stream)
    }

    fn disconnect(&mut self) {
        self.stream = None;
        self.next_attempt = Instant::now() + self.backoff;
        self.backoff = self.backoff.mul_f64(self.config.backoff_multiplier).min(self.config.max_backoff);
    }
}
