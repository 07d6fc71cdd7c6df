//! Error types for the hardware contracts.

use std::fmt;

/// Errors surfaced by a [`crate::HardwareProxy`] or device lookup.
///
/// Per the propagation policy, hardware errors are recovered locally by the
/// caller (logged, and for sensors reported as stale data) rather than
/// propagated to the harness.
#[derive(Clone, Debug, PartialEq)]
pub enum HalError {
    /// No configuration entry exists under this logical device name.
    UnknownDevice {
        /// The logical name that was looked up.
        name: String,
    },
    /// The configuration entry under this name cannot configure the
    /// requested device kind.
    KindMismatch {
        /// The logical name that was looked up.
        name: String,
        /// The device kind that was requested.
        requested: crate::DeviceKind,
    },
    /// The requested channel key is not exposed by this device kind.
    UnknownKey {
        /// The device kind the key was requested against.
        kind: crate::DeviceKind,
        /// The key that was not recognized.
        key: String,
    },
    /// The proxy reported the device as unavailable (disconnected,
    /// timed out, or otherwise unreachable).
    Unavailable {
        /// The device identifier that was unavailable.
        device: crate::DeviceId,
    },
}

impl fmt::Display for HalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownDevice { name } => {
                write!(f, "no hardware configuration entry named '{name}'")
            }
            Self::KindMismatch { name, requested } => {
                write!(
                    f,
                    "device '{name}' cannot be configured as {requested:?}"
                )
            }
            Self::UnknownKey { kind, key } => {
                write!(f, "{kind:?} does not expose key '{key}'")
            }
            Self::Unavailable { device } => {
                write!(f, "device {device:?} is unavailable")
            }
        }
    }
}

impl std::error::Error for HalError {}
