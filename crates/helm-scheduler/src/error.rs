//! Runtime (tick) error types.

use std::fmt;

use helm_core::TaskId;
use helm_graph::LayerHandle;

/// `accept_task` would be invoked with a kind the target layer's
/// `input_tasks` does not declare. This indicates a graph-construction
/// bug — `add_connection`'s compatibility check only guarantees a
/// *non-empty* intersection, not that every emitted kind is accepted by
/// every child — and is fatal to the tick.
///
/// The controller's routing loop checks `input_tasks` before calling
/// `accept_task`, so this never actually triggers today; the variant
/// documents the condition the check guards against, per the taxonomy in
/// the error handling design.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoutingError {
    /// The layer that was about to receive the task.
    pub child: LayerHandle,
}

impl fmt::Display for RoutingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "routing produced a task kind not declared in {}'s input_tasks",
            self.child
        )
    }
}

impl std::error::Error for RoutingError {}

/// A layer violated its declared task contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContractError {
    /// A layer's `process` emitted a subtask whose kind is not in its own
    /// `output_tasks`.
    UnexpectedEmission {
        /// The offending layer.
        layer: LayerHandle,
    },
    /// A layer's `process` marked a task as completed that it was never
    /// handed via `accept_task` (or had already completed).
    UnknownCompletion {
        /// The offending layer.
        layer: LayerHandle,
        /// The task id that was not pending.
        task: TaskId,
    },
}

impl fmt::Display for ContractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEmission { layer } => {
                write!(f, "{layer} emitted a task kind outside its output_tasks")
            }
            Self::UnknownCompletion { layer, task } => {
                write!(f, "{layer} completed {task:?}, which it was never given")
            }
        }
    }
}

impl std::error::Error for ContractError {}

/// The union of tick-fatal errors a [`crate::RobotController::update`] call
/// can return. Per the propagation policy, both variants propagate to the
/// harness and terminate the opmode — there is no in-band recovery.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerError {
    /// See [`RoutingError`].
    Routing(RoutingError),
    /// See [`ContractError`].
    Contract(ContractError),
}

impl fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Routing(e) => write!(f, "{e}"),
            Self::Contract(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SchedulerError {}

impl From<RoutingError> for SchedulerError {
    fn from(e: RoutingError) -> Self {
        Self::Routing(e)
    }
}

impl From<ContractError> for SchedulerError {
    fn from(e: ContractError) -> Self {
        Self::Contract(e)
    }
}
