//! Error types for telemetry frame encoding and transport.

use std::fmt;
use std::io;

/// Errors that can occur while encoding, decoding, or sending telemetry.
#[derive(Debug)]
pub enum TelemetryError {
    /// An I/O error occurred during a socket read or write.
    Io(io::Error),
    /// A frame tag byte did not match any known frame type.
    UnknownFrameTag {
        /// The unrecognized tag byte.
        tag: u8,
    },
    /// A frame could not be decoded (truncated or corrupt data).
    MalformedFrame {
        /// Human-readable description of what went wrong.
        detail: String,
    },
    /// The client has exhausted its reconnect attempts and is not connected.
    NotConnected,
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::UnknownFrameTag { tag } => write!(f, "unknown frame tag {tag:#04x}"),
            Self::MalformedFrame { detail } => write!(f, "malformed frame: {detail}"),
            Self::NotConnected => write!(f, "telemetry client is not connected"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for TelemetryError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
