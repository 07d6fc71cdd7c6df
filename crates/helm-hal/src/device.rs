//! Typed device handles and the logical-name configuration registry.
//!
//! A [`HardwareConfig`] maps a logical device name (`"belt_motor_left"`) to a
//! [`DeviceConfigEntry`]. [`HardwareConfig::resolve`] is the single place
//! that turns `(kind, name)` into a typed [`DeviceHandle`], applying the
//! entry's invert/gearing/PID configuration to every read and write so
//! layers never see raw channel keys.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::config::DeviceConfigEntry;
use crate::error::HalError;
use crate::proxy::{DeviceId, DeviceKind, HardwareProxy, HardwareValue};

/// The logical-name → configuration-entry map consulted by device lookups.
#[derive(Default)]
pub struct HardwareConfig {
    entries: HashMap<String, DeviceConfigEntry>,
}

impl HardwareConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a named entry, replacing any prior entry under the name.
    pub fn register(&mut self, name: impl Into<String>, entry: DeviceConfigEntry) {
        self.entries.insert(name.into(), entry);
    }

    /// Resolves a logical name and requested kind to a typed device handle
    /// backed by `proxy`.
    pub fn resolve(
        &self,
        proxy: Rc<RefCell<dyn HardwareProxy>>,
        kind: DeviceKind,
        name: &str,
    ) -> Result<DeviceHandle, HalError> {
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| HalError::UnknownDevice {
                name: name.to_string(),
            })?;
        if !entry.can_configure(kind) {
            return Err(HalError::KindMismatch {
                name: name.to_string(),
                requested: kind,
            });
        }
        let entry = entry.clone();
        Ok(match kind {
            DeviceKind::Motor => DeviceHandle::Motor(MotorHandle { proxy, entry }),
            DeviceKind::Servo => DeviceHandle::Servo(ServoHandle { proxy, entry }),
            DeviceKind::DistanceSensor => {
                DeviceHandle::DistanceSensor(DistanceSensorHandle { proxy, entry })
            }
        })
    }
}

/// A device handle returned by [`HardwareConfig::resolve`], typed by kind.
pub enum DeviceHandle {
    /// A two-channel motor controller.
    Motor(MotorHandle),
    /// A positional servo.
    Servo(ServoHandle),
    /// A distance sensor.
    DistanceSensor(DistanceSensorHandle),
}

impl DeviceHandle {
    /// Unwraps a motor handle, panicking if this is a different kind.
    ///
    /// Safe to call unconditionally right after a `get_device(Motor, ..)`
    /// call, since [`HardwareConfig::resolve`] already validated the kind.
    pub fn into_motor(self) -> MotorHandle {
        match self {
            Self::Motor(m) => m,
            _ => panic!("device handle is not a motor"),
        }
    }

    /// Unwraps a servo handle, panicking if this is a different kind.
    pub fn into_servo(self) -> ServoHandle {
        match self {
            Self::Servo(s) => s,
            _ => panic!("device handle is not a servo"),
        }
    }

    /// Unwraps a distance sensor handle, panicking if this is a different kind.
    pub fn into_distance_sensor(self) -> DistanceSensorHandle {
        match self {
            Self::DistanceSensor(d) => d,
            _ => panic!("device handle is not a distance sensor"),
        }
    }
}

fn sign(invert: bool) -> f64 {
    if invert {
        -1.0
    } else {
        1.0
    }
}

/// A two-channel (A/B) motor, or a single-channel motor using only the A
/// side, depending on how the layer addresses it.
pub struct MotorHandle {
    proxy: Rc<RefCell<dyn HardwareProxy>>,
    entry: DeviceConfigEntry,
}

impl MotorHandle {
    /// Sets the A-channel velocity in `-1.0..=1.0`, applying the configured
    /// invert flag.
    pub fn set_velocity_a(&self, velocity: f64) -> Result<(), HalError> {
        let signed = velocity * sign(self.entry.invert_a());
        self.proxy.borrow_mut().set_value(
            self.entry.controller_id(),
            "velocity_a",
            HardwareValue::Number(signed),
        )
    }

    /// Sets the B-channel velocity in `-1.0..=1.0`, applying the configured
    /// invert flag.
    pub fn set_velocity_b(&self, velocity: f64) -> Result<(), HalError> {
        let signed = velocity * sign(self.entry.invert_b());
        self.proxy.borrow_mut().set_value(
            self.entry.controller_id(),
            "velocity_b",
            HardwareValue::Number(signed),
        )
    }

    /// Reads the A-channel encoder, applying invert and gearing.
    pub fn encoder_a(&self) -> Result<f64, HalError> {
        let raw = self
            .proxy
            .borrow()
            .get_value(self.entry.controller_id(), "enc_a")?
            .as_number()
            .ok_or_else(|| HalError::UnknownKey {
                kind: DeviceKind::Motor,
                key: "enc_a".to_string(),
            })?;
        Ok(raw * sign(self.entry.encoder_invert_a()) / self.entry.internal_gearing())
    }

    /// Reads the B-channel encoder, applying invert and gearing.
    pub fn encoder_b(&self) -> Result<f64, HalError> {
        let raw = self
            .proxy
            .borrow()
            .get_value(self.entry.controller_id(), "enc_b")?
            .as_number()
            .ok_or_else(|| HalError::UnknownKey {
                kind: DeviceKind::Motor,
                key: "enc_b".to_string(),
            })?;
        Ok(raw * sign(self.entry.encoder_invert_b()) / self.entry.internal_gearing())
    }
}

/// A single-channel positional servo, addressed by the config entry's
/// channel index.
pub struct ServoHandle {
    proxy: Rc<RefCell<dyn HardwareProxy>>,
    entry: DeviceConfigEntry,
}

impl ServoHandle {
    /// Commands the servo to `degrees`.
    pub fn set_position(&self, degrees: f64) -> Result<(), HalError> {
        let key = format!("servo{}", self.entry.channel());
        self.proxy.borrow_mut().set_value(
            self.entry.controller_id(),
            &key,
            HardwareValue::Number(degrees),
        )
    }
}

/// A distance sensor reporting range in meters.
pub struct DistanceSensorHandle {
    proxy: Rc<RefCell<dyn HardwareProxy>>,
    entry: DeviceConfigEntry,
}

impl DistanceSensorHandle {
    /// Reads the current distance in meters.
    pub fn distance(&self) -> Result<f64, HalError> {
        self.proxy
            .borrow()
            .get_value(self.entry.controller_id(), "distance")?
            .as_number()
            .ok_or_else(|| HalError::UnknownKey {
                kind: DeviceKind::DistanceSensor,
                key: "distance".to_string(),
            })
    }

    /// The configured staleness threshold in meters, if any. A reading past
    /// this range should be treated by the caller as unreliable rather than
    /// a confirmed open-field measurement.
    pub fn stale_threshold(&self) -> Option<f64> {
        self.entry.distance_threshold()
    }
}
