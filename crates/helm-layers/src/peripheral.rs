//! Peripheral actuator layers: consume a manipulator task, drive a device,
//! and have no output tasks of their own.

use std::collections::HashSet;

use helm_core::{Layer, ProcessOutput, SetupContext, Task, TaskKind, TaskPayload};
use helm_hal::{DeviceKind, MotorHandle};

/// Drives a two-motor belt manipulator from `DriveBelt` tasks.
///
/// Both motors are commanded together at the task's `power`; the task is
/// completed the tick after it's accepted. `process` always escalates —
/// whether idle or just having completed a task — so its parent stays hot
/// and keeps feeding it fresh `DriveBelt` commands every tick, the same
/// convention `RatStrategy`/`FunctionMapLayer` use.
pub struct BeltLayer {
    left_name: String,
    right_name: String,
    left: Option<MotorHandle>,
    right: Option<MotorHandle>,
    pending: Option<Task>,
}

impl BeltLayer {
    /// Names the two motors to resolve during setup.
    pub fn new(left_name: impl Into<String>, right_name: impl Into<String>) -> Self {
        Self {
            left_name: left_name.into(),
            right_name: right_name.into(),
            left: None,
            right: None,
            pending: None,
        }
    }
}

impl Layer for BeltLayer {
    fn input_tasks(&self) -> HashSet<TaskKind> {
        HashSet::from([TaskKind::DriveBelt])
    }

    fn output_tasks(&self) -> HashSet<TaskKind> {
        HashSet::new()
    }

    fn setup(&mut self, ctx: &mut dyn SetupContext) {
        self.left = Some(
            ctx.get_device(DeviceKind::Motor, &self.left_name)
                .expect("belt left motor must resolve")
                .into_motor(),
        );
        self.right = Some(
            ctx.get_device(DeviceKind::Motor, &self.right_name)
                .expect("belt right motor must resolve")
                .into_motor(),
        );
    }

    fn accept_task(&mut self, task: Task) {
        let power = match task.payload() {
            TaskPayload::DriveBelt { power } => *power,
            other => panic!("BeltLayer cannot accept {:?}", other.kind()),
        };
        if let Some(left) = &self.left {
            left.set_velocity_a(power).expect("belt left motor write");
        }
        if let Some(right) = &self.right {
            right.set_velocity_a(power).expect("belt right motor write");
        }
        self.pending = Some(task);
    }

    fn process(&mut self) -> ProcessOutput {
        match self.pending.take() {
            Some(task) => ProcessOutput::none().complete_task(task).request_task(),
            None => ProcessOutput::none().request_task(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helm_core::LoggerFactory;
    use helm_hal::mock::MockHardwareProxy;
    use helm_hal::{DeviceConfigEntry, DeviceId, HardwareConfig, HardwareProxy, HardwareValue};
    use std::cell::RefCell;
    use std::rc::Rc;

    struct StubCtx<'a> {
        config: &'a HardwareConfig,
        proxy: Rc<RefCell<dyn HardwareProxy>>,
        logger_factory: helm_core::StderrLoggerFactory,
    }

    impl SetupContext for StubCtx<'_> {
        fn get_device(
            &mut self,
            kind: DeviceKind,
            name: &str,
        ) -> Result<helm_hal::DeviceHandle, helm_hal::HalError> {
            self.config.resolve(self.proxy.clone(), kind, name)
        }
        fn get_logger(&self, label: &str) -> Box<dyn helm_core::Logger> {
            self.logger_factory.get_logger(label)
        }
        fn get_logger_factory(&self) -> Box<dyn helm_core::LoggerFactory> {
            Box::new(self.logger_factory.clone())
        }
        fn add_update_listener(&mut self, _listener: Box<dyn FnMut()>) {}
        fn add_teardown_listener(&mut self, _listener: Box<dyn FnMut()>) {}
    }

    #[test]
    fn accepted_task_drives_both_motors_and_completes_next_process() {
        let proxy: Rc<RefCell<dyn HardwareProxy>> = Rc::new(RefCell::new(MockHardwareProxy::new()));
        let mut config = HardwareConfig::new();
        config.register(
            "belt_left",
            DeviceConfigEntry::builder(DeviceId(0), 0)
                .supports(DeviceKind::Motor)
                .build(),
        );
        config.register(
            "belt_right",
            DeviceConfigEntry::builder(DeviceId(1), 0)
                .supports(DeviceKind::Motor)
                .build(),
        );

        let mut layer = BeltLayer::new("belt_left", "belt_right");
        let mut ctx = StubCtx {
            config: &config,
            proxy: proxy.clone(),
            logger_factory: helm_core::StderrLoggerFactory::default(),
        };
        layer.setup(&mut ctx);

        layer.accept_task(Task::new(TaskPayload::DriveBelt { power: 0.75 }));
        assert_eq!(
            proxy.borrow().get_value(DeviceId(0), "velocity_a"),
            Ok(HardwareValue::Number(0.75))
        );
        assert_eq!(
            proxy.borrow().get_value(DeviceId(1), "velocity_a"),
            Ok(HardwareValue::Number(0.75))
        );

        let out = layer.process();
        assert_eq!(out.completed().len(), 1);
        assert!(out.escalated());

        let idle = layer.process();
        assert!(idle.completed().is_empty());
        assert!(idle.escalated());
    }
}
