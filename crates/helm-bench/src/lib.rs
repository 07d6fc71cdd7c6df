//! Fixture builders shared by `helm-bench`'s benchmark binaries.
//!
//! Kept out of `benches/` so the fixtures aren't duplicated across bench
//! files, mirroring how `murk-bench` separates its reference-profile
//! builders from the `#[bench_function]` call sites.

use std::cell::RefCell;
use std::rc::Rc;

use helm_core::{StderrLoggerFactory, TaskKind};
use helm_geom::Mat3;
use helm_graph::LayerGraph;
use helm_hal::mock::MockHardwareProxy;
use helm_hal::{DeviceConfigEntry, DeviceId, DeviceKind, HardwareConfig, HardwareProxy, HardwareValue};
use helm_layers::{RatStrategy, WinLayer};
use helm_localize::{LocalizationData, NewtonLocalizer, NewtonSolverConfig, SqFalloffLocalizationData};
use helm_scheduler::{RobotController, RobotControllerConfig};
use helm_test_utils::fixtures::RecordingSink;

/// A `WinLayer -> RatStrategy -> RecordingSink` chain, seeded with a
/// distance sensor reading that never settles into the target band —
/// `RatStrategy` keeps emitting `TankDrive` and `WinLayer` never sees its
/// `Win` acknowledged, so every `update()` after the first does a full,
/// steady amount of routing work. Representative of one autonomous
/// strategy running continuously during a match rather than a graph that
/// drains and tears down. `debug_multiplier` is exposed so a benchmark
/// can compare the scheduler's default fold count against 1.
pub fn drive_chain_controller(debug_multiplier: u8) -> RobotController {
    let mut graph = LayerGraph::new();
    let win = graph.add_layer(Box::new(WinLayer::new()));
    let strategy = graph.add_layer(Box::new(RatStrategy::new("sensor", 2.0, 3.0, 0.6)));
    let (sink, _log) = RecordingSink::new(TaskKind::TankDrive);
    let sink = graph.add_layer(Box::new(sink));
    graph.add_connection(win, strategy).expect("Win -> RatStrategy must be wire-compatible");
    graph.add_connection(strategy, sink).expect("RatStrategy -> RecordingSink must be wire-compatible");

    let mut hardware = HardwareConfig::new();
    hardware.register(
        "sensor",
        DeviceConfigEntry::builder(DeviceId(0), 0)
            .supports(DeviceKind::DistanceSensor)
            .build(),
    );
    let proxy: Rc<RefCell<dyn HardwareProxy>> = Rc::new(RefCell::new(MockHardwareProxy::new()));
    proxy
        .borrow_mut()
        .set_value(DeviceId(0), "distance", HardwareValue::Number(10.0))
        .expect("mock proxy accepts a distance reading");

    let mut controller = RobotController::new(Box::new(StderrLoggerFactory::default()));
    controller
        .setup(graph, hardware, proxy, RobotControllerConfig { debug_multiplier })
        .expect("fixture config is valid");
    controller
}

/// A fresh [`NewtonLocalizer`] plus `count` square-falloff sources spread
/// evenly around the origin, each biased to a distinct pose so the solver
/// has genuine multi-modal disagreement to resolve rather than a single
/// trivially-satisfied peak.
pub fn localizer_with_sources(count: usize, seed: u64) -> (NewtonLocalizer, Vec<Box<dyn LocalizationData>>) {
    let localizer = NewtonLocalizer::new(NewtonSolverConfig::default(), seed);
    let sources: Vec<Box<dyn LocalizationData>> = (0..count)
        .map(|i| {
            let angle = std::f64::consts::TAU * (i as f64) / (count.max(1) as f64);
            let mean = Mat3::from_transform(
                helm_geom::Mat2::from_angle(angle * 0.1),
                helm_geom::Vec2::new(angle.cos() * 2.0, angle.sin() * 2.0),
            );
            Box::new(SqFalloffLocalizationData::new(mean, 0.9, 1.0, 1.0, 0.05)) as Box<dyn LocalizationData>
        })
        .collect();
    (localizer, sources)
}
