//! Reusable [`helm_core::Layer`] bases — function-map, queued, sequence,
//! and source — plus a handful of illustrative concrete layers wired
//! against `helm-hal` devices.
//!
//! The concrete layers (`TankDriveMapping`, `BeltLayer`, `RatStrategy`)
//! are examples of domain wiring, not a normative robot configuration.

mod function_map;
mod mapping;
mod peripheral;
mod queued;
mod sequence;
mod strategy;
mod win;

pub use function_map::{FunctionMap, FunctionMapLayer};
pub use mapping::TankDriveMapping;
pub use peripheral::BeltLayer;
pub use queued::{QueuedLayer, QueuedMap};
pub use sequence::SequenceLayer;
pub use strategy::RatStrategy;
pub use win::WinLayer;
