//! The telemetry wire protocol: a tagged frame format for streaming robot
//! state to an external dashboard, and a reconnecting TCP client for it.
//!
//! This crate is a producer only — decoding exists for round-trip testing
//! and for the receiving side of anything that speaks the same format.

mod client;
mod codec;
mod error;
mod frame;

pub use client::{ConfigError, TelemetryClient, TelemetryConfig};
pub use codec::{decode_frame, encode_frame};
pub use error::TelemetryError;
pub use frame::{
    TelemetryFrame, TAG_LOG, TAG_POSITION, TAG_TRANSFORM, TAG_UPDATABLE_OBJECT, TAG_VECTOR,
};
