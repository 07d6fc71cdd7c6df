//! End-to-end graph shapes driven through `RobotController`, built from the
//! shared fixtures in `helm-test-utils` rather than bespoke stubs.
//!
//! None of these graphs are expected to reach the `Ok(true)` teardown
//! state: their sinks always escalate (the `RecordingSink` convention), but
//! their sources never do once exhausted (the `EscalatingSource`
//! convention) — a root layer's escalation only ever affects global
//! teardown bookkeeping, never whether it gets run, so a fixture root is
//! free to skip it. Tests here just drive a fixed, generous number of
//! ticks and assert on what reached the sinks.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use helm_core::{Layer, ProcessOutput, StderrLoggerFactory, Task, TaskId, TaskKind, TaskPayload};
use helm_graph::LayerGraph;
use helm_hal::mock::MockHardwareProxy;
use helm_hal::{HardwareConfig, HardwareProxy};
use helm_scheduler::{RobotController, RobotControllerConfig};
use helm_test_utils::fixtures::{EscalatingSource, RecordingSink};

fn proxy() -> Rc<RefCell<dyn HardwareProxy>> {
    Rc::new(RefCell::new(MockHardwareProxy::new()))
}

fn controller() -> RobotController {
    RobotController::new(Box::new(StderrLoggerFactory::default()))
}

fn drive(controller: &mut RobotController, ticks: usize) {
    for _ in 0..ticks {
        controller.update().unwrap();
    }
}

/// A parentless-below layer that accepts one task and fans it out into a
/// fixed number of same-kind subtasks, emitting them one at a time and
/// waiting for each to be acknowledged before emitting the next — the same
/// shape `FunctionMapLayer` uses for a single output, generalized to a
/// fixed fan-out count. Idle with nothing accepted and nothing in flight,
/// it escalates (the `BeltLayer`/`RatStrategy` convention for a non-root
/// layer: ask upstream for work rather than sit quietly forever).
struct FlatMap {
    input_kind: TaskKind,
    output_kind: TaskKind,
    fanout: usize,
    pending: Option<Task>,
    queued: Vec<TaskPayload>,
    awaiting: Option<TaskId>,
}

impl FlatMap {
    fn new(input_kind: TaskKind, output_kind: TaskKind, fanout: usize) -> Self {
        Self {
            input_kind,
            output_kind,
            fanout,
            pending: None,
            queued: Vec::new(),
            awaiting: None,
        }
    }

    fn payload_for(&self, kind: TaskKind) -> TaskPayload {
        match kind {
            TaskKind::Turn => TaskPayload::Turn { angle: 0.0 },
            TaskKind::AxialMovement => TaskPayload::AxialMovement { distance: 0.0 },
            other => panic!("FlatMap fixture does not know how to build a {other:?}"),
        }
    }
}

impl Layer for FlatMap {
    fn input_tasks(&self) -> HashSet<TaskKind> {
        HashSet::from([self.input_kind])
    }

    fn output_tasks(&self) -> HashSet<TaskKind> {
        HashSet::from([self.output_kind])
    }

    fn accept_task(&mut self, task: Task) {
        assert_eq!(task.kind(), self.input_kind);
        self.pending = Some(task);
        self.queued = (0..self.fanout).map(|_| self.payload_for(self.output_kind)).collect();
    }

    fn process(&mut self) -> ProcessOutput {
        if self.awaiting.is_some() {
            return ProcessOutput::none();
        }
        if let Some(payload) = self.queued.pop() {
            let task = Task::new(payload);
            self.awaiting = Some(task.id());
            return ProcessOutput::none().emit_subtask(task);
        }
        match self.pending.take() {
            Some(task) => ProcessOutput::none().complete_task(task).request_task(),
            None => ProcessOutput::none().request_task(),
        }
    }

    fn subtask_completed(&mut self, task: &Task) {
        if self.awaiting == Some(task.id()) {
            self.awaiting = None;
        }
    }
}

/// Accepts both `Turn` and `AxialMovement`, recording every task it sees
/// regardless of kind — the "snooper" sink in the split-routing scenario.
struct SnoopSink {
    log: Rc<RefCell<Vec<Task>>>,
    pending: Vec<Task>,
}

impl Layer for SnoopSink {
    fn input_tasks(&self) -> HashSet<TaskKind> {
        HashSet::from([TaskKind::Turn, TaskKind::AxialMovement])
    }

    fn output_tasks(&self) -> HashSet<TaskKind> {
        HashSet::new()
    }

    fn accept_task(&mut self, task: Task) {
        self.log.borrow_mut().push(task.clone());
        self.pending.push(task);
    }

    fn process(&mut self) -> ProcessOutput {
        self.pending
            .drain(..)
            .fold(ProcessOutput::none(), |out, task| out.complete_task(task))
            .request_task()
    }
}

/// Direct emit: one source, one sink, nothing in between.
#[test]
fn direct_emit() {
    let mut graph = LayerGraph::new();
    let source = graph.add_layer(Box::new(EscalatingSource::new(TaskKind::Win, 1, || TaskPayload::Win)));
    let (sink, log) = RecordingSink::new(TaskKind::Win);
    let sink = graph.add_layer(Box::new(sink));
    graph.add_connection(source, sink).unwrap();

    let mut controller = controller();
    controller
        .setup(graph, HardwareConfig::new(), proxy(), RobotControllerConfig { debug_multiplier: 1 })
        .unwrap();

    drive(&mut controller, 5);
    assert_eq!(log.borrow().len(), 1);
}

/// Short chain: `Emitter([Win]) -> FlatMap(Win -> [Turn, Turn]) -> Collect`.
/// The one emitted objective fans out into exactly two subtasks by the
/// time it reaches the sink.
#[test]
fn short_chain() {
    let mut graph = LayerGraph::new();
    let source = graph.add_layer(Box::new(EscalatingSource::new(TaskKind::Win, 1, || TaskPayload::Win)));
    let flat_map = graph.add_layer(Box::new(FlatMap::new(TaskKind::Win, TaskKind::Turn, 2)));
    let (sink, log) = RecordingSink::new(TaskKind::Turn);
    let sink = graph.add_layer(Box::new(sink));
    graph.add_connection(source, flat_map).unwrap();
    graph.add_connection(flat_map, sink).unwrap();

    let mut controller = controller();
    controller
        .setup(graph, HardwareConfig::new(), proxy(), RobotControllerConfig { debug_multiplier: 1 })
        .unwrap();

    drive(&mut controller, 20);
    assert_eq!(log.borrow().len(), 2);
}

/// Two-level fan-out: each of the two first-level subtasks fans out into
/// two more, so the sink ends up with four.
#[test]
fn two_level_fan_out() {
    let mut graph = LayerGraph::new();
    let source = graph.add_layer(Box::new(EscalatingSource::new(TaskKind::Win, 1, || TaskPayload::Win)));
    let first = graph.add_layer(Box::new(FlatMap::new(TaskKind::Win, TaskKind::Turn, 2)));
    let second = graph.add_layer(Box::new(FlatMap::new(TaskKind::Turn, TaskKind::Turn, 2)));
    let (sink, log) = RecordingSink::new(TaskKind::Turn);
    let sink = graph.add_layer(Box::new(sink));
    graph.add_connection(source, first).unwrap();
    graph.add_connection(first, second).unwrap();
    graph.add_connection(second, sink).unwrap();

    let mut controller = controller();
    controller
        .setup(graph, HardwareConfig::new(), proxy(), RobotControllerConfig { debug_multiplier: 1 })
        .unwrap();

    drive(&mut controller, 40);
    assert_eq!(log.borrow().len(), 4);
}

/// Split routing by kind: one layer fans out `Turn` and `AxialMovement`
/// tasks; each kind-specific sink only ever sees its own kind, while a
/// third sink declaring interest in both sees everything.
#[test]
fn split_routing_by_kind() {
    struct TwoKindSource {
        remaining: usize,
    }

    impl Layer for TwoKindSource {
        fn input_tasks(&self) -> HashSet<TaskKind> {
            HashSet::new()
        }
        fn output_tasks(&self) -> HashSet<TaskKind> {
            HashSet::from([TaskKind::Turn, TaskKind::AxialMovement])
        }
        fn accept_task(&mut self, task: Task) {
            panic!("TwoKindSource has no parents and cannot accept {:?}", task.kind());
        }
        fn process(&mut self) -> ProcessOutput {
            if self.remaining == 0 {
                return ProcessOutput::none();
            }
            self.remaining -= 1;
            let turn = Task::new(TaskPayload::Turn { angle: 1.0 });
            let axial = Task::new(TaskPayload::AxialMovement { distance: 1.0 });
            ProcessOutput::none().emit_subtask(turn).emit_subtask(axial)
        }
    }

    let mut graph = LayerGraph::new();
    let source = graph.add_layer(Box::new(TwoKindSource { remaining: 1 }));
    let (turn_sink, turn_log) = RecordingSink::new(TaskKind::Turn);
    let turn_sink = graph.add_layer(Box::new(turn_sink));
    let (axial_sink, axial_log) = RecordingSink::new(TaskKind::AxialMovement);
    let axial_sink = graph.add_layer(Box::new(axial_sink));
    let snoop_log = Rc::new(RefCell::new(Vec::new()));
    let snoop = graph.add_layer(Box::new(SnoopSink { log: snoop_log.clone(), pending: Vec::new() }));

    graph.add_connection(source, turn_sink).unwrap();
    graph.add_connection(source, axial_sink).unwrap();
    graph.add_connection(source, snoop).unwrap();

    let mut controller = controller();
    controller
        .setup(graph, HardwareConfig::new(), proxy(), RobotControllerConfig { debug_multiplier: 1 })
        .unwrap();

    drive(&mut controller, 5);

    assert_eq!(turn_log.borrow().len(), 1);
    assert!(turn_log.borrow().iter().all(|t| t.kind() == TaskKind::Turn));
    assert_eq!(axial_log.borrow().len(), 1);
    assert!(axial_log.borrow().iter().all(|t| t.kind() == TaskKind::AxialMovement));
    assert_eq!(snoop_log.borrow().len(), 2);
}
