//! The task vocabulary: a closed set of immutable payload records, plus the
//! identity wrapper the scheduler uses to track which emitted instance a
//! completion or escalation refers to.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use helm_geom::Mat3;

use crate::kind::TaskKind;

/// Identifies one emitted [`Task`] instance. Two clones of the same `Task`
/// share a `TaskId`; two tasks built from identical field values do not —
/// completion tracking is by identity, never by structural equality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

impl TaskId {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// One joystick's position, each axis in `-1.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stick {
    /// Horizontal axis; positive is rightward.
    pub x: f64,
    /// Vertical axis; positive is forward (already sign-corrected by the
    /// generator for whichever physical gamepad convention is in use).
    pub y: f64,
}

/// The two analog sticks of a gamepad.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sticks {
    /// Left stick.
    pub left: Stick,
    /// Right stick.
    pub right: Stick,
}

/// The two shoulder triggers of a gamepad, each in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triggers {
    /// Left trigger.
    pub left: f64,
    /// Right trigger.
    pub right: f64,
}

/// The two shoulder bumpers of a gamepad.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bumpers {
    /// Left bumper.
    pub left: bool,
    /// Right bumper.
    pub right: bool,
}

/// The four directions of a gamepad's directional pad.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dpad {
    /// Up.
    pub up: bool,
    /// Right.
    pub right: bool,
    /// Down.
    pub down: bool,
    /// Left.
    pub left: bool,
}

/// The four face buttons of a gamepad.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Buttons {
    /// A.
    pub a: bool,
    /// B.
    pub b: bool,
    /// X.
    pub x: bool,
    /// Y.
    pub y: bool,
}

/// A snapshot of a gamepad's state at the tick it was generated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GamepadInput {
    /// The two analog sticks.
    pub joysticks: Sticks,
    /// The two shoulder bumpers.
    pub bumpers: Bumpers,
    /// The two shoulder triggers.
    pub triggers: Triggers,
    /// The directional pad.
    pub dpad: Dpad,
    /// The four face buttons.
    pub buttons: Buttons,
}

/// A snapshot of a keyboard's state at the tick it was generated. Keys are
/// looked up by name; an unseen key reads as `false`, matching the "unknown
/// keys are neutral" rule the underlying input device observes.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct KeyboardInput {
    keys: HashMap<String, bool>,
}

impl KeyboardInput {
    /// Builds a snapshot from a key → down-state map.
    pub fn new(keys: HashMap<String, bool>) -> Self {
        Self { keys }
    }

    /// Whether `key` was down at the moment this snapshot was taken.
    pub fn get(&self, key: &str) -> bool {
        self.keys.get(key).copied().unwrap_or(false)
    }

    /// `get` converted to `0.0`/`1.0`, for the common "axis = plus - minus"
    /// mapping idiom.
    pub fn axis(&self, key: &str) -> f64 {
        self.get(key) as u8 as f64
    }
}

/// The closed vocabulary of task payloads exchanged between layers.
///
/// Every variant is an immutable record; `Task` equality and hashing are
/// never derived from these fields — see [`TaskId`] and [`Task::id`].
#[derive(Clone, Debug, PartialEq)]
pub enum TaskPayload {
    /// Move the robot forward (positive) or backward (negative) by
    /// `distance` meters.
    AxialMovement {
        /// Distance in meters.
        distance: f64,
    },
    /// Turn the robot in place by `angle` radians, counterclockwise
    /// positive.
    Turn {
        /// Angle in radians.
        angle: f64,
    },
    /// Move a holonomic-capable robot in a straight line without turning.
    LinearMovement {
        /// Forward distance in meters.
        axial: f64,
        /// Rightward distance in meters.
        lateral: f64,
    },
    /// Relative accelerations for a holonomic drive train.
    HolonomicDrive {
        /// Forward acceleration, `-1.0..=1.0`.
        axial: f64,
        /// Rightward acceleration, `-1.0..=1.0`.
        lateral: f64,
        /// Counterclockwise yaw acceleration, `-1.0..=1.0`.
        yaw: f64,
    },
    /// Relative accelerations for the left/right sides of a tank-style
    /// drive train. Despite the name, not necessarily produced by tank
    /// drive controls.
    TankDrive {
        /// Left-side acceleration, `-1.0..=1.0`.
        left: f64,
        /// Right-side acceleration, `-1.0..=1.0`.
        right: f64,
    },
    /// Pathfind to a field-space goal transform while avoiding obstacles.
    MoveToField {
        /// The goal field-space transform.
        goal_transform: Mat3,
    },
    /// A gamepad state snapshot.
    GamepadInput(GamepadInput),
    /// A keyboard state snapshot.
    KeyboardInput(KeyboardInput),
    /// A best-estimate robot pose from a localization source.
    Localization {
        /// The robot→field transform.
        transform: Mat3,
    },
    /// A single distance-sensor reading.
    DistanceSensor {
        /// Measured distance in meters.
        distance: f64,
        /// The sensor's pose in robot space at the moment of the reading.
        sensor_pose: Mat3,
    },
    /// Drive a belt-style manipulator at `power`, `-1.0..=1.0`.
    DriveBelt {
        /// Motor power, `-1.0..=1.0`.
        power: f64,
    },
    /// The top-level objective: win the match. Terminal — never escalated
    /// past the layer(s) that consume it.
    Win,
}

impl TaskPayload {
    /// The tag of this payload.
    pub fn kind(&self) -> TaskKind {
        match self {
            Self::AxialMovement { .. } => TaskKind::AxialMovement,
            Self::Turn { .. } => TaskKind::Turn,
            Self::LinearMovement { .. } => TaskKind::LinearMovement,
            Self::HolonomicDrive { .. } => TaskKind::HolonomicDrive,
            Self::TankDrive { .. } => TaskKind::TankDrive,
            Self::MoveToField { .. } => TaskKind::MoveToField,
            Self::GamepadInput(_) => TaskKind::GamepadInput,
            Self::KeyboardInput(_) => TaskKind::KeyboardInput,
            Self::Localization { .. } => TaskKind::Localization,
            Self::DistanceSensor { .. } => TaskKind::DistanceSensor,
            Self::DriveBelt { .. } => TaskKind::DriveBelt,
            Self::Win => TaskKind::Win,
        }
    }
}

/// A task flowing through the layer graph: an immutable [`TaskPayload`]
/// stamped with a [`TaskId`] at construction.
///
/// Cloning a `Task` preserves its id — this is how a fan-out layer hands
/// the *same* task to more than one child while keeping completion
/// tracking coherent: every clone completes together under one identity.
#[derive(Clone, Debug)]
pub struct Task {
    id: TaskId,
    payload: TaskPayload,
}

impl Task {
    /// Stamps a new task with a fresh identity.
    pub fn new(payload: TaskPayload) -> Self {
        Self {
            id: TaskId::next(),
            payload,
        }
    }

    /// This task's identity.
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// This task's kind.
    pub fn kind(&self) -> TaskKind {
        self.payload.kind()
    }

    /// The task's payload.
    pub fn payload(&self) -> &TaskPayload {
        &self.payload
    }

    /// Whether `other` is the same emitted instance (by identity, not
    /// payload equality).
    pub fn same_instance(&self, other: &Task) -> bool {
        self.id == other.id
    }
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Task {}
