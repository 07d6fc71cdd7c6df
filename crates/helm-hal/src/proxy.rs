//! The hardware proxy contract: typed key/value access to device channels.
//!
//! Motor channels expose `velocity_{a|b}`, `enc_{a|b}`, `invert_{a|b}`,
//! `deadband_{a|b}`, `pid_enabled_{a|b}`, `pid_k{p|i|d}_{a|b}`. Servo
//! channels expose `servo{N}`. Distance sensors expose `distance`.

use std::fmt;

use crate::error::HalError;

/// Identifies a physical device addressed through a [`HardwareProxy`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceId(pub u32);

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "device#{}", self.0)
    }
}

/// The kind of device a [`crate::DeviceConfigEntry`] can configure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    /// A two-channel (A/B) DC motor controller.
    Motor,
    /// A single-channel positional servo.
    Servo,
    /// A time-of-flight or ultrasonic distance sensor.
    DistanceSensor,
}

/// A typed value exchanged with a [`HardwareProxy`] channel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HardwareValue {
    /// A numeric channel value (velocity in `-1..1`, encoder ticks,
    /// servo position, distance in meters, or a PID gain).
    Number(f64),
    /// A boolean channel value (invert flags, PID-enabled flags).
    Bool(bool),
}

impl HardwareValue {
    /// Returns the numeric payload, or `None` if this is a [`Self::Bool`].
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Bool(_) => None,
        }
    }

    /// Returns the boolean payload, or `None` if this is a [`Self::Number`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Number(_) => None,
        }
    }
}

/// Synchronous, non-blocking access to device channels.
///
/// Reads are polls against cached hardware state; they never block inside
/// a tick. A layer addressing a disjoint channel set per its own
/// configuration is the caller's responsibility — concurrent writes to
/// the same channel from two layers is a configuration error, not
/// something this trait detects at runtime.
pub trait HardwareProxy {
    /// Reads a channel value for the given device.
    fn get_value(&self, device: DeviceId, key: &str) -> Result<HardwareValue, HalError>;

    /// Writes a channel value for the given device.
    fn set_value(&mut self, device: DeviceId, key: &str, value: HardwareValue)
        -> Result<(), HalError>;
}
