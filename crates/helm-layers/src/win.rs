//! The terminal source layer that seeds the graph's objective.

use std::collections::HashSet;

use helm_core::{Layer, ProcessOutput, Task, TaskId, TaskKind, TaskPayload};

/// A source layer with no parents: emits a single `Win` task, waits for it
/// to be acknowledged, then escalates indefinitely. Never accepts a task —
/// there is nothing upstream of it.
///
/// The `Win` objective is one-time, not a stream: there is nothing left to
/// emit once it's acknowledged, so every `process()` call from then on
/// signals "done, but still ready to be pulled" the same way `Emitter` does
/// in `RobotController`'s own tests — it pulls its parents into the hot set
/// without ever producing another task.
#[derive(Default)]
pub struct WinLayer {
    emitted: bool,
    awaiting_ack: Option<TaskId>,
}

impl WinLayer {
    /// Creates a fresh win layer with nothing emitted yet.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Layer for WinLayer {
    fn input_tasks(&self) -> HashSet<TaskKind> {
        HashSet::new()
    }

    fn output_tasks(&self) -> HashSet<TaskKind> {
        HashSet::from([TaskKind::Win])
    }

    fn accept_task(&mut self, task: Task) {
        panic!("WinLayer has no parents and cannot accept {:?}", task.kind());
    }

    fn process(&mut self) -> ProcessOutput {
        if self.awaiting_ack.is_some() {
            return ProcessOutput::none();
        }
        if self.emitted {
            return ProcessOutput::none().request_task();
        }
        let task = Task::new(TaskPayload::Win);
        self.emitted = true;
        self.awaiting_ack = Some(task.id());
        ProcessOutput::none().emit_subtask(task)
    }

    fn subtask_completed(&mut self, task: &Task) {
        if self.awaiting_ack == Some(task.id()) {
            self.awaiting_ack = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_once_then_escalates_instead_of_emitting_again() {
        let mut layer = WinLayer::new();

        let first = layer.process();
        assert_eq!(first.subtasks().len(), 1);
        assert!(!first.escalated());
        let win = first.subtasks()[0].clone();

        let quiet = layer.process();
        assert!(quiet.subtasks().is_empty());
        assert!(!quiet.escalated());

        layer.subtask_completed(&win);
        let next = layer.process();
        assert!(next.subtasks().is_empty());
        assert!(next.escalated());

        let still = layer.process();
        assert!(still.subtasks().is_empty());
        assert!(still.escalated());
    }

    #[test]
    #[should_panic]
    fn rejects_accepted_tasks() {
        let mut layer = WinLayer::new();
        layer.accept_task(Task::new(TaskPayload::Win));
    }
}
