//! In-memory implementations of the hardware contracts, for tests only.

use std::collections::HashMap;

use crate::error::HalError;
use crate::input::{InputDevice, InputValue};
use crate::proxy::{DeviceId, HardwareProxy, HardwareValue};

/// A [`HardwareProxy`] backed by an in-memory channel map.
///
/// Reads return [`HalError::Unavailable`] for a device that was never
/// seeded via [`Self::seed`] or written via [`HardwareProxy::set_value`].
#[derive(Default)]
pub struct MockHardwareProxy {
    channels: HashMap<(DeviceId, String), HardwareValue>,
    unavailable: std::collections::HashSet<DeviceId>,
}

impl MockHardwareProxy {
    /// Creates an empty mock proxy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a channel value without going through `set_value`.
    pub fn seed(&mut self, device: DeviceId, key: &str, value: HardwareValue) {
        self.channels.insert((device, key.to_string()), value);
    }

    /// Marks a device as unavailable; subsequent reads/writes fail.
    pub fn mark_unavailable(&mut self, device: DeviceId) {
        self.unavailable.insert(device);
    }
}

impl HardwareProxy for MockHardwareProxy {
    fn get_value(&self, device: DeviceId, key: &str) -> Result<HardwareValue, HalError> {
        if self.unavailable.contains(&device) {
            return Err(HalError::Unavailable { device });
        }
        self.channels
            .get(&(device, key.to_string()))
            .copied()
            .ok_or(HalError::Unavailable { device })
    }

    fn set_value(
        &mut self,
        device: DeviceId,
        key: &str,
        value: HardwareValue,
    ) -> Result<(), HalError> {
        if self.unavailable.contains(&device) {
            return Err(HalError::Unavailable { device });
        }
        self.channels.insert((device, key.to_string()), value);
        Ok(())
    }
}

/// An [`InputDevice`] backed by an in-memory key map. Unseeded keys read as
/// neutral, matching the contract's "unknown keys are neutral" rule.
#[derive(Default)]
pub struct MockInputDevice {
    values: HashMap<String, InputValue>,
}

impl MockInputDevice {
    /// Creates an empty mock input device.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of a named input channel.
    pub fn set(&mut self, key: &str, value: InputValue) {
        self.values.insert(key.to_string(), value);
    }
}

impl InputDevice for MockInputDevice {
    fn get_value(&self, key: &str) -> InputValue {
        self.values
            .get(key)
            .copied()
            .unwrap_or(InputValue::Down(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unseeded_channel_is_unavailable() {
        let proxy = MockHardwareProxy::new();
        assert_eq!(
            proxy.get_value(DeviceId(0), "velocity_a"),
            Err(HalError::Unavailable {
                device: DeviceId(0)
            })
        );
    }

    #[test]
    fn seeded_channel_reads_back() {
        let mut proxy = MockHardwareProxy::new();
        proxy.seed(DeviceId(1), "distance", HardwareValue::Number(0.5));
        assert_eq!(
            proxy.get_value(DeviceId(1), "distance"),
            Ok(HardwareValue::Number(0.5))
        );
    }

    #[test]
    fn set_value_then_get_value_round_trips() {
        let mut proxy = MockHardwareProxy::new();
        proxy
            .set_value(DeviceId(2), "velocity_a", HardwareValue::Number(0.25))
            .unwrap();
        assert_eq!(
            proxy.get_value(DeviceId(2), "velocity_a"),
            Ok(HardwareValue::Number(0.25))
        );
    }

    #[test]
    fn unavailable_device_rejects_reads_and_writes() {
        let mut proxy = MockHardwareProxy::new();
        proxy.mark_unavailable(DeviceId(3));
        assert!(proxy.get_value(DeviceId(3), "distance").is_err());
        assert!(proxy
            .set_value(DeviceId(3), "distance", HardwareValue::Number(1.0))
            .is_err());
    }

    #[test]
    fn unknown_input_key_is_neutral() {
        let input = MockInputDevice::new();
        assert_eq!(input.get_value("button_a"), InputValue::Down(false));
    }

    #[test]
    fn seeded_input_key_reads_back() {
        let mut input = MockInputDevice::new();
        input.set("joystick_left_x", InputValue::Axis(0.75));
        assert_eq!(input.get_value("joystick_left_x"), InputValue::Axis(0.75));
    }
}
