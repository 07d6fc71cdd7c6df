//! Task vocabulary, the `Layer` contract, and the setup-time context
//! shared by every layer-graph crate in the workspace.

mod context;
mod kind;
mod layer;
mod logger;
mod task;

pub use context::SetupContext;
pub use kind::{kind_satisfies, set_accepts, TaskKind, WIDENING};
pub use layer::{Layer, ProcessOutput};
pub use logger::{LogLevel, Logger, LoggerFactory, StderrLogger, StderrLoggerFactory};
pub use task::{
    Buttons, Bumpers, Dpad, GamepadInput, KeyboardInput, Stick, Sticks, Task, TaskId, TaskPayload,
    Triggers,
};
