//! 1-to-N queued layer base.

use std::collections::{HashSet, VecDeque};

use helm_core::{Layer, ProcessOutput, Task, TaskId, TaskKind};

/// A layer that expands one accepted task into a finite ordered sequence
/// of subtasks, emitted one at a time.
pub trait QueuedMap {
    /// Declared accepted task kinds.
    fn input_tasks(&self) -> HashSet<TaskKind>;

    /// Declared emitted task kinds.
    fn output_tasks(&self) -> HashSet<TaskKind>;

    /// Expands `task` into the ordered sequence of subtasks to emit.
    fn map_to_subtasks(&mut self, task: &Task) -> VecDeque<Task>;
}

/// Wraps a [`QueuedMap`] implementation into a [`Layer`].
///
/// `accept_task` builds the sequence; `process` emits the next entry once
/// the previous one has been acknowledged, and completes the accepted
/// task (then requests a new one) once the sequence is exhausted.
pub struct QueuedLayer<M> {
    inner: M,
    pending: Option<Task>,
    queue: VecDeque<Task>,
    awaiting_ack: Option<TaskId>,
}

impl<M: QueuedMap> QueuedLayer<M> {
    /// Wraps `inner`, starting with an empty queue.
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            pending: None,
            queue: VecDeque::new(),
            awaiting_ack: None,
        }
    }
}

impl<M: QueuedMap> Layer for QueuedLayer<M> {
    fn input_tasks(&self) -> HashSet<TaskKind> {
        self.inner.input_tasks()
    }

    fn output_tasks(&self) -> HashSet<TaskKind> {
        self.inner.output_tasks()
    }

    fn accept_task(&mut self, task: Task) {
        self.queue = self.inner.map_to_subtasks(&task);
        self.pending = Some(task);
    }

    fn process(&mut self) -> ProcessOutput {
        if self.awaiting_ack.is_some() {
            return ProcessOutput::none();
        }
        if let Some(subtask) = self.queue.pop_front() {
            self.awaiting_ack = Some(subtask.id());
            return ProcessOutput::none().emit_subtask(subtask);
        }
        if let Some(task) = self.pending.take() {
            return ProcessOutput::none().complete_task(task).request_task();
        }
        ProcessOutput::none()
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
    use helm_core::TaskPayload;

    struct Split;

    impl QueuedMap for Split {
        fn input_tasks(&self) -> HashSet<TaskKind> {
            HashSet::from([TaskKind::AxialMovement])
        }
        fn output_tasks(&self) -> HashSet<TaskKind> {
            HashSet::from([TaskKind::AxialMovement])
        }
        fn map_to_subtasks(&mut self, task: &Task) -> VecDeque<Task> {
            let distance = match task.payload() {
                TaskPayload::AxialMovement { distance } => *distance,
                _ => unreachable!(),
            };
            VecDeque::from([
                Task::new(TaskPayload::AxialMovement { distance: distance / 2.0 }),
                Task::new(TaskPayload::AxialMovement { distance: distance / 2.0 }),
            ])
        }
    }

    #[test]
    fn drains_queue_before_completing_accepted_task() {
        let mut layer = QueuedLayer::new(Split);
        layer.accept_task(Task::new(TaskPayload::AxialMovement { distance: 1.0 }));

        let first = layer.process();
        let sub1 = first.subtasks()[0].clone();
        assert!(first.completed().is_empty());

        // No acknowledgment yet: stays quiet.
        assert!(layer.process().subtasks().is_empty());

        layer.subtask_completed(&sub1);
        let second = layer.process();
        let sub2 = second.subtasks()[0].clone();

        layer.subtask_completed(&sub2);
        let done = layer.process();
        assert_eq!(done.completed().len(), 1);
        assert!(done.escalated());
    }
}
