//! The `Layer` contract: the unit of composition in the task-flow graph.

use std::collections::HashSet;

use crate::context::SetupContext;
use crate::kind::TaskKind;
use crate::task::Task;

/// What a layer produced during one [`Layer::process`] call.
///
/// Built with the fluent helpers below rather than constructed directly,
/// mirroring the three things the old closure-based context offered:
/// emitting a subtask to children, completing a task a parent is waiting
/// on, and escalating (asking a parent to keep this layer in the hot set).
#[derive(Default)]
pub struct ProcessOutput {
    subtasks: Vec<Task>,
    completed: Vec<Task>,
    escalate: bool,
}

impl ProcessOutput {
    /// An output with nothing to report — no subtasks, no completions, no
    /// escalation. Equivalent to a layer going quiet for this tick.
    pub fn none() -> Self {
        Self::default()
    }

    /// Queues `task` to be routed to this layer's children.
    pub fn emit_subtask(mut self, task: Task) -> Self {
        self.subtasks.push(task);
        self
    }

    /// Marks `task` (previously accepted from a parent) as complete.
    pub fn complete_task(mut self, task: Task) -> Self {
        self.completed.push(task);
        self
    }

    /// Requests that this layer remain active — its parents are escalated
    /// to and kept in the hot set for the next tick.
    pub fn request_task(mut self) -> Self {
        self.escalate = true;
        self
    }

    /// The subtasks emitted this call.
    pub fn subtasks(&self) -> &[Task] {
        &self.subtasks
    }

    /// The tasks completed this call.
    pub fn completed(&self) -> &[Task] {
        &self.completed
    }

    /// Whether this layer asked to stay hot.
    pub fn escalated(&self) -> bool {
        self.escalate
    }

    /// Consumes the output, returning its parts.
    pub fn into_parts(self) -> (Vec<Task>, Vec<Task>, bool) {
        (self.subtasks, self.completed, self.escalate)
    }

    /// Folds `other` into `self`: subtasks and completions are
    /// concatenated, escalation is OR'd. Used to accumulate repeated
    /// `process` calls under a debug multiplier — an idempotent layer
    /// contributes nothing new on its repeat calls, so this only changes
    /// behavior for buggy, non-idempotent layers.
    pub fn merge(mut self, other: Self) -> Self {
        self.subtasks.extend(other.subtasks);
        self.completed.extend(other.completed);
        self.escalate = self.escalate || other.escalate;
        self
    }
}

/// A node in the task-flow graph.
///
/// `input_tasks`/`output_tasks` declare the kinds this layer accepts from
/// parents and may emit to children — the scheduler uses these to validate
/// graph structure at construction and to route tasks at runtime. Both are
/// expected to be stable for the lifetime of the layer; they're queried
/// once at graph-construction time, not every tick.
///
/// `setup` runs once, before the first tick, with access to devices,
/// loggers, and update/teardown listener registration. `accept_task` may
/// be called zero or more times between two `process` calls, once per
/// parent emission routed to this layer this tick. `process` runs once per
/// tick (or more, under a debug multiplier) and reports emissions,
/// completions, and escalation via the returned [`ProcessOutput`].
/// `subtask_completed` is called when a child reports completion of a task
/// this layer previously emitted to it.
///
/// Implementations that receive a task kind they don't actually expect
/// (the routing table let it through, but the specific payload is wrong
/// for this layer) or are asked to complete a task they never emitted
/// should panic — these are graph-construction bugs, not recoverable
/// runtime conditions.
pub trait Layer {
    /// Task kinds this layer accepts from parents.
    fn input_tasks(&self) -> HashSet<TaskKind>;

    /// Task kinds this layer may emit to children.
    fn output_tasks(&self) -> HashSet<TaskKind>;

    /// One-time setup, run before the first tick.
    fn setup(&mut self, ctx: &mut dyn SetupContext) {
        let _ = ctx;
    }

    /// Receives a task routed from a parent.
    fn accept_task(&mut self, task: Task);

    /// Advances this layer by one step.
    fn process(&mut self) -> ProcessOutput;

    /// Notifies this layer that a child completed a task it previously
    /// emitted.
    fn subtask_completed(&mut self, task: &Task) {
        let _ = task;
    }
}
