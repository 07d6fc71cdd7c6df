//! The probabilistic localizer: a [`LocalizationData`] field contract, a
//! square-falloff default model, a gradient-ascent Newton solver for
//! multi-modal fields, and `RobotLocalizer`, the `Layer` that wires it
//! all into the scheduler's tick lifecycle.

mod data;
mod robot_localizer;
mod solver;
mod source;

pub use data::{LocalizationData, SqFalloffLocalizationData};
pub use robot_localizer::RobotLocalizer;
pub use solver::{ConfigError, NewtonLocalizer, NewtonSolverConfig};
pub use source::LocalizationSource;
