//! Helm quickstart — a complete, minimal robot graph from scratch.
//!
//! Demonstrates:
//!   1. Writing a custom `Layer` (a two-motor drive train actuator)
//!   2. Registering mock hardware under logical device names
//!   3. Wiring `WinLayer -> RatStrategy -> DriveTrainLayer` into a graph
//!   4. Driving the graph to completion through `RobotController::update`
//!
//! Run with:
//!   cargo run -p helm --example quickstart

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use helm::prelude::*;
use helm::hal::mock::MockHardwareProxy;
use helm::hal::{DeviceKind, MotorHandle};

// ─── Custom layer: a two-motor drive train ──────────────────────
//
// Consumes `TankDrive` tasks and writes each side's power straight to a
// named motor. Completes the task the tick after it's accepted, then
// always escalates — the same convention `BeltLayer` and `RatStrategy`
// use — so its parent keeps getting pulled in with fresh commands.

struct DriveTrainLayer {
    left_name: String,
    right_name: String,
    left: Option<MotorHandle>,
    right: Option<MotorHandle>,
    pending: Option<Task>,
}

impl DriveTrainLayer {
    fn new(left_name: impl Into<String>, right_name: impl Into<String>) -> Self {
        Self {
            left_name: left_name.into(),
            right_name: right_name.into(),
            left: None,
            right: None,
            pending: None,
        }
    }
}

impl Layer for DriveTrainLayer {
    fn input_tasks(&self) -> HashSet<TaskKind> {
        HashSet::from([TaskKind::TankDrive])
    }

    fn output_tasks(&self) -> HashSet<TaskKind> {
        HashSet::new()
    }

    fn setup(&mut self, ctx: &mut dyn helm::core::SetupContext) {
        self.left = Some(
            ctx.get_device(DeviceKind::Motor, &self.left_name)
                .expect("left drive motor must resolve")
                .into_motor(),
        );
        self.right = Some(
            ctx.get_device(DeviceKind::Motor, &self.right_name)
                .expect("right drive motor must resolve")
                .into_motor(),
        );
    }

    fn accept_task(&mut self, task: Task) {
        let (left, right) = match task.payload() {
            TaskPayload::TankDrive { left, right } => (*left, *right),
            other => panic!("DriveTrainLayer cannot accept {:?}", other.kind()),
        };
        self.left.as_ref().unwrap().set_velocity_a(left).expect("left motor write");
        self.right.as_ref().unwrap().set_velocity_a(right).expect("right motor write");
        self.pending = Some(task);
    }

    fn process(&mut self) -> ProcessOutput {
        match self.pending.take() {
            Some(task) => ProcessOutput::none().complete_task(task).request_task(),
            None => ProcessOutput::none().request_task(),
        }
    }
}

fn main() {
    // ─── Graph: Win -> RatStrategy -> DriveTrainLayer ───────────

    let mut graph = LayerGraph::new();
    let win = graph.add_layer(Box::new(WinLayer::new()));
    let strategy = graph.add_layer(Box::new(RatStrategy::new("front_sensor", 0.3, 0.5, 0.6)));
    let drive = graph.add_layer(Box::new(DriveTrainLayer::new("drive_left", "drive_right")));
    graph.add_connection(win, strategy).expect("Win -> RatStrategy must be wire-compatible");
    graph.add_connection(strategy, drive).expect("RatStrategy -> DriveTrainLayer must be wire-compatible");

    // ─── Hardware: two drive motors, one front distance sensor ──

    let mut hardware = HardwareConfig::new();
    hardware.register(
        "drive_left",
        DeviceConfigEntry::builder(DeviceId(0), 0).supports(DeviceKind::Motor).build(),
    );
    hardware.register(
        "drive_right",
        DeviceConfigEntry::builder(DeviceId(1), 0).supports(DeviceKind::Motor).build(),
    );
    hardware.register(
        "front_sensor",
        DeviceConfigEntry::builder(DeviceId(2), 0)
            .supports(DeviceKind::DistanceSensor)
            .build(),
    );

    let proxy: Rc<RefCell<dyn HardwareProxy>> = Rc::new(RefCell::new(MockHardwareProxy::new()));
    // The robot starts 2 meters from the wall it's driving toward; the
    // strategy stops once the sensor reads between 0.3 and 0.5 meters.
    proxy
        .borrow_mut()
        .set_value(DeviceId(2), "distance", HardwareValue::Number(2.0))
        .expect("mock proxy accepts a distance reading");

    // ─── Run ─────────────────────────────────────────────────────

    let mut controller = RobotController::new(Box::new(StderrLoggerFactory::default()));
    let config = RobotControllerConfig { debug_multiplier: 1 };
    controller.setup(graph, hardware, proxy.clone(), config).expect("setup should succeed");

    for tick in 0..10 {
        let finished = controller.update().expect("update should not error");
        let left = proxy.borrow().get_value(DeviceId(0), "velocity_a").unwrap();
        println!("tick {tick}: left motor = {left:?}, finished = {finished}");
        if finished {
            break;
        }
        // The sensor never actually moves in this demo — a real robot
        // would update it from odometry each tick. Nudge it by hand so
        // the strategy eventually sees itself arrive.
        proxy
            .borrow_mut()
            .set_value(DeviceId(2), "distance", HardwareValue::Number(2.0 - 0.3 * tick as f64))
            .unwrap();
    }
}
