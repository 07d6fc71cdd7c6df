//! Helm: a layered task-flow scheduler and probabilistic localizer for
//! competition robots.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Helm sub-crates. For most users, adding `helm` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use helm::prelude::*;
//! use helm::hal::mock::MockHardwareProxy;
//! use helm_test_utils::fixtures::RecordingSink;
//!
//! // WinLayer seeds a `Win` objective; RatStrategy drives toward a target
//! // distance reading and completes it; the sink just records what it's
//! // handed.
//! let mut graph = LayerGraph::new();
//! let win = graph.add_layer(Box::new(WinLayer::new()));
//! let strategy = graph.add_layer(Box::new(RatStrategy::new("sensor", 2.0, 3.0, 0.5)));
//! let (sink, log) = RecordingSink::new(TaskKind::TankDrive);
//! let sink = graph.add_layer(Box::new(sink));
//! graph.add_connection(win, strategy).unwrap();
//! graph.add_connection(strategy, sink).unwrap();
//!
//! let mut hardware = HardwareConfig::new();
//! hardware.register(
//!     "sensor",
//!     DeviceConfigEntry::builder(DeviceId(0), 0)
//!         .supports(DeviceKind::DistanceSensor)
//!         .build(),
//! );
//! let proxy: Rc<RefCell<dyn HardwareProxy>> = Rc::new(RefCell::new(MockHardwareProxy::new()));
//! proxy.borrow_mut().set_value(DeviceId(0), "distance", HardwareValue::Number(2.5)).unwrap();
//!
//! let mut controller = RobotController::new(Box::new(StderrLoggerFactory::default()));
//! let config = RobotControllerConfig { debug_multiplier: 1 };
//! controller.setup(graph, hardware, proxy, config).unwrap();
//! // First tick routes the Win objective down to the strategy; the second
//! // is what lets the strategy see the sensor reading and emit a drive
//! // command the sink actually records.
//! controller.update().unwrap();
//! controller.update().unwrap();
//! assert!(!log.borrow().is_empty());
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`core`] | `helm-core` | Task vocabulary, the `Layer` trait, logging |
//! | [`graph`] | `helm-graph` | `LayerGraph`, `LayerHandle`, shape errors |
//! | [`scheduler`] | `helm-scheduler` | `RobotController`, tick configuration |
//! | [`layers`] | `helm-layers` | Reusable layer bases and illustrative concrete layers |
//! | [`geom`] | `helm-geom` | `Vec2`, `Vec3`, `Mat2`, `Mat3` |
//! | [`localize`] | `helm-localize` | The probabilistic localizer and its `Layer` wiring |
//! | [`hal`] | `helm-hal` | Hardware device contracts and mocks |
//! | [`telemetry`] | `helm-telemetry` | The dashboard wire protocol and streaming client |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Task vocabulary, the `Layer` contract, and logging (`helm-core`).
///
/// Most users only need [`core::Layer`] and [`core::ProcessOutput`] from
/// this module — they are also available in the [`prelude`].
pub use helm_core as core;

/// The typed layer-graph DAG (`helm-graph`).
///
/// Provides [`graph::LayerGraph`] for registering layers and wiring
/// compatibility-checked connections between them.
pub use helm_graph as graph;

/// The tick state machine that drives a layer graph (`helm-scheduler`).
///
/// [`scheduler::RobotController`] owns a [`graph::LayerGraph`] and steps it
/// one escalation cascade at a time via `update`.
pub use helm_scheduler as scheduler;

/// Reusable `Layer` bases and illustrative concrete layers (`helm-layers`).
///
/// [`layers::FunctionMapLayer`], [`layers::QueuedLayer`], and
/// [`layers::SequenceLayer`] are generic bases; [`layers::TankDriveMapping`],
/// [`layers::BeltLayer`], and [`layers::RatStrategy`] show how to wire them
/// against real devices.
pub use helm_layers as layers;

/// Fixed-dimension linear algebra for robot pose transforms (`helm-geom`).
pub use helm_geom as geom;

/// The probabilistic localizer (`helm-localize`).
///
/// [`localize::NewtonLocalizer`] resolves a robot pose from a set of
/// [`localize::LocalizationData`] fields; [`localize::RobotLocalizer`] wires
/// that solver into the scheduler as a `Layer`.
pub use helm_localize as localize;

/// Hardware device contracts consumed by layers (`helm-hal`).
///
/// [`hal::HardwareProxy`] and [`hal::HardwareConfig`] are the boundary
/// between the task-flow scheduler and physical devices; see [`hal::mock`]
/// for the in-memory implementations used by tests and examples.
pub use helm_hal as hal;

/// The telemetry wire protocol and streaming client (`helm-telemetry`).
pub use helm_telemetry as telemetry;

/// Common imports for typical Helm usage.
///
/// ```rust
/// use helm::prelude::*;
/// ```
///
/// This imports the most frequently used types: the layer-graph builder,
/// the `Layer` trait, the scheduler, common hardware types, and the
/// reference source/sink layers.
pub mod prelude {
    // Core trait and task vocabulary
    pub use helm_core::{Layer, ProcessOutput, Task, TaskId, TaskKind, TaskPayload};

    // Logging
    pub use helm_core::{Logger, LoggerFactory, StderrLogger, StderrLoggerFactory};

    // Graph
    pub use helm_graph::{LayerGraph, LayerHandle};

    // Scheduler
    pub use helm_scheduler::{ControllerState, RobotController, RobotControllerConfig};

    // Errors
    pub use helm_scheduler::SchedulerError;

    // Hardware
    pub use helm_hal::{
        DeviceConfigEntry, DeviceId, DeviceKind, HardwareConfig, HardwareProxy, HardwareValue,
    };

    // Reference layers
    pub use helm_layers::{FunctionMap, FunctionMapLayer, RatStrategy, WinLayer};

    // Localization
    pub use helm_localize::{LocalizationData, NewtonLocalizer, RobotLocalizer};
}
