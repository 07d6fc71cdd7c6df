//! An illustrative autonomous strategy layer, seeded by `Win`.

use std::collections::HashSet;

use helm_core::{Layer, ProcessOutput, SetupContext, Task, TaskId, TaskKind, TaskPayload};
use helm_hal::{DeviceKind, DistanceSensorHandle};

/// Drives straight ahead at a fixed speed until a distance sensor reads
/// inside a target band, then stops and completes the `Win` it was given.
///
/// Seeded by a `Win` task from a parent win layer; emits `TankDrive`
/// subtasks to a drive-train child until the strategy finishes, at which
/// point the accepted `Win` is completed and the layer goes quiet until
/// handed another one.
pub struct RatStrategy {
    sensor_name: String,
    sensor: Option<DistanceSensorHandle>,
    noise_threshold: f64,
    stop_threshold: f64,
    drive_speed: f64,
    accepted: Option<Task>,
    emitted: Option<TaskId>,
    finished: bool,
}

impl RatStrategy {
    /// Builds a strategy reading `sensor_name`, driving at `drive_speed`
    /// until the sensor settles between `noise_threshold` and
    /// `stop_threshold` meters.
    pub fn new(sensor_name: impl Into<String>, noise_threshold: f64, stop_threshold: f64, drive_speed: f64) -> Self {
        Self {
            sensor_name: sensor_name.into(),
            sensor: None,
            noise_threshold,
            stop_threshold,
            drive_speed,
            accepted: None,
            emitted: None,
            finished: true,
        }
    }
}

impl Layer for RatStrategy {
    fn input_tasks(&self) -> HashSet<TaskKind> {
        HashSet::from([TaskKind::Win])
    }

    fn output_tasks(&self) -> HashSet<TaskKind> {
        HashSet::from([TaskKind::TankDrive])
    }

    fn setup(&mut self, ctx: &mut dyn SetupContext) {
        self.sensor = Some(
            ctx.get_device(DeviceKind::DistanceSensor, &self.sensor_name)
                .expect("strategy distance sensor must resolve")
                .into_distance_sensor(),
        );
    }

    fn accept_task(&mut self, task: Task) {
        match task.payload() {
            TaskPayload::Win => {}
            other => panic!("RatStrategy cannot accept {:?}", other.kind()),
        }
        self.accepted = Some(task);
        self.finished = false;
    }

    fn process(&mut self) -> ProcessOutput {
        if self.finished {
            return match self.accepted.take() {
                Some(task) => ProcessOutput::none().complete_task(task).request_task(),
                None => ProcessOutput::none().request_task(),
            };
        }

        if self.emitted.is_some() {
            return ProcessOutput::none();
        }

        let distance = self
            .sensor
            .as_ref()
            .expect("setup must run before process")
            .distance()
            .unwrap_or(0.0);
        self.finished = distance > self.noise_threshold && distance < self.stop_threshold;
        let speed = if self.finished { 0.0 } else { self.drive_speed };
        let subtask = Task::new(TaskPayload::TankDrive { left: speed, right: speed });
        self.emitted = Some(subtask.id());
        ProcessOutput::none().emit_subtask(subtask)
    }

    fn subtask_completed(&mut self, task: &Task) {
        if self.emitted == Some(task.id()) {
            self.emitted = None;
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

    fn strategy_with_distance(distance: f64) -> (RatStrategy, Rc<RefCell<dyn HardwareProxy>>) {
        let proxy: Rc<RefCell<dyn HardwareProxy>> = Rc::new(RefCell::new(MockHardwareProxy::new()));
        proxy
            .borrow_mut()
            .set_value(DeviceId(0), "distance", HardwareValue::Number(distance))
            .unwrap();
        let mut config = HardwareConfig::new();
        config.register(
            "sensor",
            DeviceConfigEntry::builder(DeviceId(0), 0)
                .supports(DeviceKind::DistanceSensor)
                .build(),
        );
        let mut strategy = RatStrategy::new("sensor", 2.0, 3.0, 0.1);
        let mut ctx = StubCtx { config: &config, proxy: proxy.clone(), logger_factory: helm_core::StderrLoggerFactory::default() };
        strategy.setup(&mut ctx);
        (strategy, proxy)
    }

    #[test]
    fn drives_until_sensor_settles_in_band_then_completes_win() {
        let (mut strategy, _proxy) = strategy_with_distance(5.0);
        strategy.accept_task(Task::new(TaskPayload::Win));

        let first = strategy.process();
        assert_eq!(first.subtasks().len(), 1);
        assert!(!strategy.finished);
    }

    #[test]
    fn already_in_band_completes_immediately() {
        let (mut strategy, _proxy) = strategy_with_distance(2.5);
        strategy.accept_task(Task::new(TaskPayload::Win));

        let first = strategy.process();
        assert_eq!(first.subtasks().len(), 1);
        assert!(strategy.finished);

        strategy.subtask_completed(&first.subtasks()[0].clone());

        let second = strategy.process();
        assert_eq!(second.completed().len(), 1);
        assert!(second.escalated());
    }
}
