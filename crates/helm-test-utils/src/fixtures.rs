//! Reusable `Layer` test fixtures.
//!
//! Three standard layers for scheduler and graph tests:
//!
//! - [`EscalatingSource`] — a parentless layer that emits one task per
//!   `process` call, for a configurable number of calls, then goes quiet.
//! - [`RecordingSink`] — accepts tasks of one kind, appends them to a
//!   shared log, and completes each as soon as it's accepted.
//! - [`PassthroughLayer`] — accepts one kind and emits another, 1:1,
//!   building the outgoing payload from the incoming task via a closure.

use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

use helm_core::{Layer, ProcessOutput, Task, TaskId, TaskKind, TaskPayload};

/// Emits one task of `output_kind` per `process` call by invoking
/// `make_payload`, until `remaining` calls are exhausted; after that it
/// reports nothing and never escalates.
///
/// Useful for standing in for a source layer (`RobotLocalizer`, a gamepad
/// adapter) in tests that only care about how many tasks a downstream
/// layer received.
pub struct EscalatingSource {
    output_kind: TaskKind,
    make_payload: Box<dyn FnMut() -> TaskPayload>,
    remaining: usize,
}

impl EscalatingSource {
    /// Builds a source that emits `count` tasks, each built by calling
    /// `make_payload` once per `process`.
    pub fn new(
        output_kind: TaskKind,
        count: usize,
        make_payload: impl FnMut() -> TaskPayload + 'static,
    ) -> Self {
        Self {
            output_kind,
            make_payload: Box::new(make_payload),
            remaining: count,
        }
    }
}

impl Layer for EscalatingSource {
    fn input_tasks(&self) -> HashSet<TaskKind> {
        HashSet::new()
    }

    fn output_tasks(&self) -> HashSet<TaskKind> {
        HashSet::from([self.output_kind])
    }

    fn accept_task(&mut self, task: Task) {
        panic!("EscalatingSource has no parents and cannot accept {:?}", task.kind());
    }

    fn process(&mut self) -> ProcessOutput {
        if self.remaining == 0 {
            return ProcessOutput::none();
        }
        self.remaining -= 1;
        let task = Task::new((self.make_payload)());
        ProcessOutput::none().emit_subtask(task)
    }
}

/// Accepts tasks of `input_kind`, appends each to a shared log, and
/// reports it complete on the next `process` call.
///
/// Always escalates — it has no in-flight emission of its own to wait
/// on, so (like `BeltLayer`/`RatStrategy`) it stays hot forever, keeping
/// its parent pulled in every tick. `log()` exposes the accumulated
/// tasks for assertions; the log is shared via `Rc<RefCell<_>>` so a
/// test can hold a handle to it after the sink has been moved into a
/// graph.
pub struct RecordingSink {
    input_kind: TaskKind,
    log: Rc<RefCell<Vec<Task>>>,
    pending: Vec<Task>,
}

impl RecordingSink {
    /// Builds a sink accepting `input_kind`, sharing its log with any
    /// clone of the returned `Rc`.
    pub fn new(input_kind: TaskKind) -> (Self, Rc<RefCell<Vec<Task>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                input_kind,
                log: log.clone(),
                pending: Vec::new(),
            },
            log,
        )
    }
}

impl Layer for RecordingSink {
    fn input_tasks(&self) -> HashSet<TaskKind> {
        HashSet::from([self.input_kind])
    }

    fn output_tasks(&self) -> HashSet<TaskKind> {
        HashSet::new()
    }

    fn accept_task(&mut self, task: Task) {
        assert_eq!(task.kind(), self.input_kind, "RecordingSink received an unexpected kind");
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

/// Accepts tasks of `input_kind`, queues them, and emits one task of
/// `output_kind` built from the front of the queue via `transform` at a
/// time — the next queued input isn't translated until the previous
/// output is acknowledged via `subtask_completed`.
///
/// Mirrors the emit-then-wait-for-ack shape every acknowledgment-gated
/// layer in this workspace uses (`FunctionMapLayer`, `RobotLocalizer`):
/// at most one outstanding emission at a time, no escalation while an
/// emission is in flight, and escalates once its queue runs dry so its
/// own parent gets pulled in to refill it.
pub struct PassthroughLayer {
    input_kind: TaskKind,
    output_kind: TaskKind,
    transform: Box<dyn FnMut(&Task) -> TaskPayload>,
    queued: VecDeque<Task>,
    awaiting: Option<TaskId>,
}

impl PassthroughLayer {
    /// Builds a passthrough translating `input_kind` to `output_kind` via
    /// `transform`.
    pub fn new(
        input_kind: TaskKind,
        output_kind: TaskKind,
        transform: impl FnMut(&Task) -> TaskPayload + 'static,
    ) -> Self {
        Self {
            input_kind,
            output_kind,
            transform: Box::new(transform),
            queued: VecDeque::new(),
            awaiting: None,
        }
    }
}

impl Layer for PassthroughLayer {
    fn input_tasks(&self) -> HashSet<TaskKind> {
        HashSet::from([self.input_kind])
    }

    fn output_tasks(&self) -> HashSet<TaskKind> {
        HashSet::from([self.output_kind])
    }

    fn accept_task(&mut self, task: Task) {
        assert_eq!(task.kind(), self.input_kind, "PassthroughLayer received an unexpected kind");
        self.queued.push_back(task);
    }

    fn process(&mut self) -> ProcessOutput {
        if self.awaiting.is_some() {
            return ProcessOutput::none();
        }
        let Some(input) = self.queued.pop_front() else {
            return ProcessOutput::none().request_task();
        };
        let payload = (self.transform)(&input);
        let output = Task::new(payload);
        self.awaiting = Some(output.id());
        ProcessOutput::none().emit_subtask(output)
    }

    fn subtask_completed(&mut self, task: &Task) {
        if self.awaiting == Some(task.id()) {
            self.awaiting = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escalating_source_stops_after_count() {
        let mut source = EscalatingSource::new(TaskKind::Turn, 2, || TaskPayload::Turn { angle: 1.0 });
        assert_eq!(source.process().subtasks().len(), 1);
        assert_eq!(source.process().subtasks().len(), 1);
        assert_eq!(source.process().subtasks().len(), 0);
    }

    #[test]
    fn recording_sink_logs_and_completes() {
        let (mut sink, log) = RecordingSink::new(TaskKind::Turn);
        let task = Task::new(TaskPayload::Turn { angle: 0.5 });
        sink.accept_task(task.clone());
        assert_eq!(log.borrow().len(), 1);

        let out = sink.process();
        assert_eq!(out.completed().len(), 1);
        assert!(out.completed()[0].same_instance(&task));
        assert!(out.escalated());

        let idle = sink.process();
        assert!(idle.completed().is_empty());
        assert!(idle.escalated());
    }

    #[test]
    #[should_panic]
    fn recording_sink_rejects_wrong_kind() {
        let (mut sink, _log) = RecordingSink::new(TaskKind::Turn);
        sink.accept_task(Task::new(TaskPayload::Win));
    }

    #[test]
    fn passthrough_waits_for_ack_before_emitting_again() {
        let mut layer = PassthroughLayer::new(TaskKind::Turn, TaskKind::AxialMovement, |t| {
            match t.payload() {
                TaskPayload::Turn { angle } => TaskPayload::AxialMovement { distance: *angle },
                _ => unreachable!(),
            }
        });

        layer.accept_task(Task::new(TaskPayload::Turn { angle: 2.0 }));
        let first = layer.process();
        assert_eq!(first.subtasks().len(), 1);
        assert!(!first.escalated());

        layer.accept_task(Task::new(TaskPayload::Turn { angle: 3.0 }));
        let silent = layer.process();
        assert_eq!(silent.subtasks().len(), 0);
        assert!(!silent.escalated());

        layer.subtask_completed(&first.subtasks()[0].clone());
        let second = layer.process();
        assert_eq!(second.subtasks().len(), 1);
        assert!(!second.escalated());

        layer.subtask_completed(&second.subtasks()[0].clone());
        let drained = layer.process();
        assert!(drained.subtasks().is_empty());
        assert!(drained.escalated());
    }
}
