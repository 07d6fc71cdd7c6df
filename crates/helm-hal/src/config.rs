//! Hardware configuration: the logical-name → device-entry map consumed by
//! [`crate::HardwareProxy`] lookups at layer setup time.

use crate::proxy::{DeviceId, DeviceKind};

/// PID gains for a motor channel with closed-loop velocity control enabled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PidGains {
    /// Proportional gain.
    pub kp: f64,
    /// Integral gain.
    pub ki: f64,
    /// Derivative gain.
    pub kd: f64,
}

/// One entry in the hardware configuration map.
///
/// Carries the fields a device kind needs to construct and initialize
/// itself, plus [`Self::can_configure`] — the predicate `get_device` uses
/// to validate a requested kind against this entry before handing out a
/// device handle.
#[derive(Clone, Debug, PartialEq)]
pub struct DeviceConfigEntry {
    controller_id: DeviceId,
    channel: u8,
    invert_a: bool,
    invert_b: bool,
    encoder_invert_a: bool,
    encoder_invert_b: bool,
    internal_gearing: f64,
    pid: Option<PidGains>,
    distance_threshold: Option<f64>,
    kinds: Vec<DeviceKind>,
}

impl DeviceConfigEntry {
    /// Starts a builder for a config entry supporting the given kinds.
    pub fn builder(controller_id: DeviceId, channel: u8) -> DeviceConfigEntryBuilder {
        DeviceConfigEntryBuilder::new(controller_id, channel)
    }

    /// The controller this device is wired to.
    pub fn controller_id(&self) -> DeviceId {
        self.controller_id
    }

    /// The channel index on the controller.
    pub fn channel(&self) -> u8 {
        self.channel
    }

    /// Whether the A-side (or sole) channel is inverted.
    pub fn invert_a(&self) -> bool {
        self.invert_a
    }

    /// Whether the B-side channel is inverted (two-channel motors only).
    pub fn invert_b(&self) -> bool {
        self.invert_b
    }

    /// Whether the A-side encoder direction is inverted.
    pub fn encoder_invert_a(&self) -> bool {
        self.encoder_invert_a
    }

    /// Whether the B-side encoder direction is inverted.
    pub fn encoder_invert_b(&self) -> bool {
        self.encoder_invert_b
    }

    /// The internal gearing ratio applied to encoder reads.
    pub fn internal_gearing(&self) -> f64 {
        self.internal_gearing
    }

    /// The configured closed-loop PID gains, if enabled.
    pub fn pid(&self) -> Option<PidGains> {
        self.pid
    }

    /// The configured stale-read distance threshold, in meters.
    pub fn distance_threshold(&self) -> Option<f64> {
        self.distance_threshold
    }

    /// Whether this entry can configure a device of the given kind.
    pub fn can_configure(&self, kind: DeviceKind) -> bool {
        self.kinds.contains(&kind)
    }
}

/// Builder for [`DeviceConfigEntry`].
pub struct DeviceConfigEntryBuilder {
    controller_id: DeviceId,
    channel: u8,
    invert_a: bool,
    invert_b: bool,
    encoder_invert_a: bool,
    encoder_invert_b: bool,
    internal_gearing: f64,
    pid: Option<PidGains>,
    distance_threshold: Option<f64>,
    kinds: Vec<DeviceKind>,
}

impl DeviceConfigEntryBuilder {
    fn new(controller_id: DeviceId, channel: u8) -> Self {
        Self {
            controller_id,
            channel,
            invert_a: false,
            invert_b: false,
            encoder_invert_a: false,
            encoder_invert_b: false,
            internal_gearing: 1.0,
            pid: None,
            distance_threshold: None,
            kinds: Vec::new(),
        }
    }

    /// Marks this entry as able to configure the given device kind.
    pub fn supports(mut self, kind: DeviceKind) -> Self {
        if !self.kinds.contains(&kind) {
            self.kinds.push(kind);
        }
        self
    }

    /// Sets the A-side invert flag.
    pub fn invert_a(mut self, invert: bool) -> Self {
        self.invert_a = invert;
        self
    }

    /// Sets the B-side invert flag.
    pub fn invert_b(mut self, invert: bool) -> Self {
        self.invert_b = invert;
        self
    }

    /// Sets the A-side encoder-invert flag.
    pub fn encoder_invert_a(mut self, invert: bool) -> Self {
        self.encoder_invert_a = invert;
        self
    }

    /// Sets the B-side encoder-invert flag.
    pub fn encoder_invert_b(mut self, invert: bool) -> Self {
        self.encoder_invert_b = invert;
        self
    }

    /// Sets the internal gearing ratio.
    pub fn internal_gearing(mut self, gearing: f64) -> Self {
        self.internal_gearing = gearing;
        self
    }

    /// Enables closed-loop velocity control with the given gains.
    pub fn pid(mut self, gains: PidGains) -> Self {
        self.pid = Some(gains);
        self
    }

    /// Sets the stale-read distance threshold, in meters.
    pub fn distance_threshold(mut self, meters: f64) -> Self {
        self.distance_threshold = Some(meters);
        self
    }

    /// Finishes the entry.
    pub fn build(self) -> DeviceConfigEntry {
        DeviceConfigEntry {
            controller_id: self.controller_id,
            channel: self.channel,
            invert_a: self.invert_a,
            invert_b: self.invert_b,
            encoder_invert_a: self.encoder_invert_a,
            encoder_invert_b: self.encoder_invert_b,
            internal_gearing: self.internal_gearing,
            pid: self.pid,
            distance_threshold: self.distance_threshold,
            kinds: self.kinds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_configure_reflects_supported_kinds() {
        let entry = DeviceConfigEntry::builder(DeviceId(0), 1)
            .supports(DeviceKind::Motor)
            .build();
        assert!(entry.can_configure(DeviceKind::Motor));
        assert!(!entry.can_configure(DeviceKind::Servo));
    }

    #[test]
    fn builder_defaults_are_unset() {
        let entry = DeviceConfigEntry::builder(DeviceId(2), 0)
            .supports(DeviceKind::DistanceSensor)
            .build();
        assert_eq!(entry.pid(), None);
        assert_eq!(entry.distance_threshold(), None);
        assert_eq!(entry.internal_gearing(), 1.0);
    }
}
