//! Drives `RobotLocalizer` through a full `LayerGraph`/`RobotController`
//! cycle rather than calling the solver directly, matching the shape a
//! real graph wires it in: the localizer has no parents, so it only runs
//! once something downstream pulls it into the hot set, which happens
//! immediately here since its only child is the graph's sink.

use std::cell::RefCell;
use std::rc::Rc;

use helm_core::{StderrLoggerFactory, TaskKind, TaskPayload};
use helm_geom::{Mat2, Mat3, Vec2};
use helm_graph::LayerGraph;
use helm_hal::mock::MockHardwareProxy;
use helm_hal::{HardwareConfig, HardwareProxy};
use helm_localize::{LocalizationData, LocalizationSource, NewtonSolverConfig, RobotLocalizer, SqFalloffLocalizationData};
use helm_scheduler::{RobotController, RobotControllerConfig};
use helm_test_utils::fixtures::RecordingSink;

/// A source fixed at one transform for the lifetime of the test — stands
/// in for whatever real sensor would otherwise back a `LocalizationSource`.
struct FixedSource {
    transform: Mat3,
}

impl LocalizationSource for FixedSource {
    fn on_start(&mut self, _initial_transform: Mat3) {}
    fn on_update(&mut self) {}
    fn has_data(&self) -> bool {
        true
    }
    fn collect_data(&self) -> Box<dyn LocalizationData> {
        Box::new(SqFalloffLocalizationData::new(self.transform, 2.0, 1.0, 1.0, 1e-4))
    }
}

/// One source at a known offset from identity; the first update already
/// resolves and routes a `Localization` task to the sink, since the sink
/// (the graph's only node with no children) is hot from tick one and the
/// localizer is its sole parent.
///
/// The 0.02 m / 0.02 rad tolerance matches the one already established
/// for this exact seed and source transform by `NewtonLocalizer`'s own
/// convergence test — tightening it further isn't something to guess at
/// without re-running the solver.
#[test]
fn one_update_localizes_a_single_source() {
    let mut graph = LayerGraph::new();
    let source_transform = Mat3::from_transform(Mat2::from_angle(2.0), Vec2::new(2.0, -2.047));

    let mut localizer = RobotLocalizer::new(Mat3::IDENTITY, NewtonSolverConfig::default(), 0);
    localizer.register_source(Box::new(FixedSource { transform: source_transform }));
    let localizer = graph.add_layer(Box::new(localizer));

    let (sink, log) = RecordingSink::new(TaskKind::Localization);
    let sink = graph.add_layer(Box::new(sink));
    graph.add_connection(localizer, sink).unwrap();

    let proxy: Rc<RefCell<dyn HardwareProxy>> = Rc::new(RefCell::new(MockHardwareProxy::new()));
    let mut controller = RobotController::new(Box::new(StderrLoggerFactory::default()));
    controller
        .setup(graph, HardwareConfig::new(), proxy, RobotControllerConfig { debug_multiplier: 1 })
        .unwrap();

    controller.update().unwrap();

    let log = log.borrow();
    assert_eq!(log.len(), 1);
    let TaskPayload::Localization { transform } = log[0].payload() else {
        panic!("RecordingSink received a non-Localization task");
    };

    let translation = transform.get_translation();
    assert!((translation.x() - 2.0).abs() < 0.02);
    assert!((translation.y() - (-2.047)).abs() < 0.02);

    let angle = transform.get_direction().angle();
    assert!((angle - 2.0).abs() < 0.02);
}
