//! Serial composition of a fixed list of sublayers.

use std::collections::HashSet;

use helm_core::{Layer, ProcessOutput, Task, TaskKind};

/// Composes a fixed list of sublayers into one [`Layer`], run serially.
///
/// The task accepted from a parent is forwarded (by clone, so identity is
/// shared) to every sublayer up front. At any time exactly one sublayer is
/// *active*; `process` delegates to it. When the active sublayer reports
/// the forwarded task complete, that stage is done: the sequence advances
/// to the next sublayer rather than surfacing the completion, and only
/// completes the outer task once the last sublayer finishes its stage.
/// Subtasks the active sublayer emits pass straight through to this
/// layer's own children.
pub struct SequenceLayer {
    sublayers: Vec<Box<dyn Layer>>,
    active: usize,
    pending: Vec<Task>,
}

impl SequenceLayer {
    /// Builds a sequence from `sublayers`, run in order.
    pub fn new(sublayers: Vec<Box<dyn Layer>>) -> Self {
        Self {
            sublayers,
            active: 0,
            pending: Vec::new(),
        }
    }
}

impl Layer for SequenceLayer {
    fn input_tasks(&self) -> HashSet<TaskKind> {
        self.sublayers
            .first()
            .map(|l| l.input_tasks())
            .unwrap_or_default()
    }

    fn output_tasks(&self) -> HashSet<TaskKind> {
        self.sublayers
            .iter()
            .flat_map(|l| l.output_tasks())
            .collect()
    }

    fn accept_task(&mut self, task: Task) {
        for sublayer in &mut self.sublayers {
            sublayer.accept_task(task.clone());
        }
        self.pending.push(task);
        self.active = 0;
    }

    fn process(&mut self) -> ProcessOutput {
        let Some(active) = self.sublayers.get_mut(self.active) else {
            return ProcessOutput::none();
        };

        let (subtasks, completed, escalate) = active.process().into_parts();
        let mut result = ProcessOutput::none();
        for subtask in subtasks {
            result = result.emit_subtask(subtask);
        }

        let mut stage_finished = false;
        for _ in completed {
            stage_finished = true;
        }
        if stage_finished {
            if self.active + 1 < self.sublayers.len() {
                self.active += 1;
            } else {
                for task in self.pending.drain(..) {
                    result = result.complete_task(task);
                }
            }
        }

        if escalate {
            result = result.request_task();
        }
        result
    }

    fn subtask_completed(&mut self, task: &Task) {
        if let Some(active) = self.sublayers.get_mut(self.active) {
            active.subtask_completed(task);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helm_core::TaskPayload;

    /// Completes whatever it's given on its first `process` call, then
    /// stays quiet — a minimal stage for sequence tests.
    struct OneShot {
        pending: Option<Task>,
    }

    impl Layer for OneShot {
        fn input_tasks(&self) -> HashSet<TaskKind> {
            HashSet::from([TaskKind::Win])
        }
        fn output_tasks(&self) -> HashSet<TaskKind> {
            HashSet::new()
        }
        fn accept_task(&mut self, task: Task) {
            self.pending = Some(task);
        }
        fn process(&mut self) -> ProcessOutput {
            match self.pending.take() {
                Some(task) => ProcessOutput::none().complete_task(task),
                None => ProcessOutput::none(),
            }
        }
    }

    #[test]
    fn advances_stages_and_completes_once_at_the_end() {
        let mut seq = SequenceLayer::new(vec![
            Box::new(OneShot { pending: None }),
            Box::new(OneShot { pending: None }),
        ]);
        seq.accept_task(Task::new(TaskPayload::Win));

        let first = seq.process();
        assert!(first.completed().is_empty());
        assert_eq!(seq.active, 1);

        let second = seq.process();
        assert_eq!(second.completed().len(), 1);
    }
}
