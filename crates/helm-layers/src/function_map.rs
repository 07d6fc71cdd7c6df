//! 1-to-1 function-map layer base.

use std::collections::HashSet;

use helm_core::{Layer, ProcessOutput, Task, TaskId, TaskKind};

/// A layer holding at most one pending task, mapped to a single output
/// subtask per input.
///
/// Implementors provide [`FunctionMap::map`] and the input/output kind
/// sets; [`FunctionMapLayer`] handles staging, emission, and
/// acknowledgment-gated completion.
pub trait FunctionMap {
    /// Declared accepted task kinds.
    fn input_tasks(&self) -> HashSet<TaskKind>;

    /// Declared emitted task kinds.
    fn output_tasks(&self) -> HashSet<TaskKind>;

    /// Computes the single subtask to emit for an accepted task.
    fn map(&mut self, task: &Task) -> Task;
}

/// Wraps a [`FunctionMap`] implementation into a [`Layer`].
///
/// `accept_task` stages `map(t)`; `process` emits the staged subtask once,
/// then — once a child reports that subtask complete via
/// `subtask_completed` — completes `t` and requests a new task.
pub struct FunctionMapLayer<M> {
    inner: M,
    pending: Option<Task>,
    staged: Option<Task>,
    awaiting_ack: Option<TaskId>,
}

impl<M: FunctionMap> FunctionMapLayer<M> {
    /// Wraps `inner`, starting with no pending task.
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            pending: None,
            staged: None,
            awaiting_ack: None,
        }
    }
}

impl<M: FunctionMap> Layer for FunctionMapLayer<M> {
    fn input_tasks(&self) -> HashSet<TaskKind> {
        self.inner.input_tasks()
    }

    fn output_tasks(&self) -> HashSet<TaskKind> {
        self.inner.output_tasks()
    }

    fn accept_task(&mut self, task: Task) {
        let subtask = self.inner.map(&task);
        self.pending = Some(task);
        self.staged = Some(subtask);
    }

    fn process(&mut self) -> ProcessOutput {
        if let Some(subtask) = self.staged.take() {
            self.awaiting_ack = Some(subtask.id());
            return ProcessOutput::none().emit_subtask(subtask);
        }
        if self.awaiting_ack.is_none() {
            if let Some(task) = self.pending.take() {
                return ProcessOutput::none().complete_task(task).request_task();
            }
        }
        ProcessOutput::none()
    }

    fn subtask_completed(&mut self, task: &Task) {
        if self.awaiting_ack == Some(task.id()) {
            self.awaiting_ack = None;
        }
    }
}
