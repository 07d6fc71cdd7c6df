//! The concrete [`SetupContext`] handed to layers during
//! [`crate::RobotController::setup`].

use std::cell::RefCell;
use std::rc::Rc;

use helm_core::{Logger, LoggerFactory, SetupContext};
use helm_hal::{DeviceHandle, DeviceKind, HalError, HardwareConfig, HardwareProxy};

/// Borrows the pieces of a [`crate::RobotController`] a layer needs during
/// setup: the hardware configuration and proxy, the logger factory, and
/// the controller's listener lists.
pub struct SetupContextImpl<'a> {
    pub(crate) hardware_config: &'a HardwareConfig,
    pub(crate) proxy: Rc<RefCell<dyn HardwareProxy>>,
    pub(crate) logger_factory: &'a dyn LoggerFactory,
    pub(crate) update_listeners: &'a mut Vec<Box<dyn FnMut()>>,
    pub(crate) teardown_listeners: &'a mut Vec<Box<dyn FnMut()>>,
}

impl SetupContext for SetupContextImpl<'_> {
    fn get_device(&mut self, kind: DeviceKind, name: &str) -> Result<DeviceHandle, HalError> {
        self.hardware_config.resolve(self.proxy.clone(), kind, name)
    }

    fn get_logger(&self, label: &str) -> Box<dyn Logger> {
        self.logger_factory.get_logger(label)
    }

    fn get_logger_factory(&self) -> Box<dyn LoggerFactory> {
        self.logger_factory.clone_factory()
    }

    fn add_update_listener(&mut self, listener: Box<dyn FnMut()>) {
        self.update_listeners.push(listener);
    }

    fn add_teardown_listener(&mut self, listener: Box<dyn FnMut()>) {
        self.teardown_listeners.push(listener);
    }
}
