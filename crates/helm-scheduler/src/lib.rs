//! The `RobotController` tick state machine: the single-threaded,
//! cooperative scheduler that drives a `helm-graph` `LayerGraph` through
//! repeated update cycles.

mod config;
mod context_impl;
mod controller;
mod error;

pub use config::{ConfigError, RobotControllerConfig};
pub use controller::{ControllerState, RobotController};
pub use error::{ContractError, RoutingError, SchedulerError};
