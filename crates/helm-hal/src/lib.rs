//! Hardware contracts consumed by Helm layers.
//!
//! This crate defines the boundary between the task-flow scheduler and the
//! physical robot: a [`HardwareProxy`] for reading/writing device channels,
//! a [`HardwareConfig`] for resolving logical device names to configuration
//! entries, and an [`InputDevice`] contract for gamepad/keyboard adapters.
//! The real drivers behind these traits are out of scope for this
//! workspace — see `mock` for the in-memory implementations used by tests.

mod config;
mod device;
mod error;
mod input;
pub mod mock;
mod proxy;

pub use config::{DeviceConfigEntry, DeviceConfigEntryBuilder, PidGains};
pub use device::{DeviceHandle, DistanceSensorHandle, HardwareConfig, MotorHandle, ServoHandle};
pub use error::HalError;
pub use input::{InputDevice, InputValue};
pub use proxy::{DeviceId, DeviceKind, HardwareProxy, HardwareValue};
