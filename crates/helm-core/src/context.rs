//! The setup-time context a [`crate::Layer`] receives once, before the
//! first tick.

use helm_hal::{DeviceHandle, DeviceKind, HalError};

use crate::logger::{Logger, LoggerFactory};

/// Setup-time access to devices, logging, and controller listener
/// registration.
///
/// Borrowed by a layer's [`crate::Layer::setup`] only — layers do not
/// retain a `&mut dyn SetupContext` past setup; device handles and loggers
/// obtained here are owned values a layer keeps in its own state.
pub trait SetupContext {
    /// Looks up the hardware configuration entry named `name`, validates
    /// it can configure `kind`, and constructs the device handle.
    fn get_device(&mut self, kind: DeviceKind, name: &str) -> Result<DeviceHandle, HalError>;

    /// Returns a logger labeled `label`.
    fn get_logger(&self, label: &str) -> Box<dyn Logger>;

    /// Returns a clone of the owning controller's logger factory.
    fn get_logger_factory(&self) -> Box<dyn LoggerFactory>;

    /// Registers a callback invoked once per tick, after routing
    /// completes, regardless of which layers were hot.
    fn add_update_listener(&mut self, listener: Box<dyn FnMut()>);

    /// Registers a callback invoked once, when the controller transitions
    /// to `Finished`.
    fn add_teardown_listener(&mut self, listener: Box<dyn FnMut()>);
}
