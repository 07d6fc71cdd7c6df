//! The closed vocabulary of task kinds, and the widening relation layers
//! use to declare interest in more than one concrete kind.

use std::collections::HashSet;

/// The tag of a [`crate::Task`]. Fieldless, `Copy`, and cheap to put in a
/// `HashSet` — this is what a [`crate::Layer`]'s `input_tasks`/
/// `output_tasks` declare membership in, and what the scheduler checks
/// routing against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// [`crate::Task::AxialMovement`]
    AxialMovement,
    /// [`crate::Task::Turn`]
    Turn,
    /// [`crate::Task::LinearMovement`]
    LinearMovement,
    /// [`crate::Task::HolonomicDrive`]
    HolonomicDrive,
    /// [`crate::Task::TankDrive`]
    TankDrive,
    /// [`crate::Task::MoveToField`]
    MoveToField,
    /// [`crate::Task::GamepadInput`]
    GamepadInput,
    /// [`crate::Task::KeyboardInput`]
    KeyboardInput,
    /// [`crate::Task::Localization`]
    Localization,
    /// [`crate::Task::DistanceSensor`]
    DistanceSensor,
    /// [`crate::Task::DriveBelt`]
    DriveBelt,
    /// [`crate::Task::Win`]
    Win,
}

/// Explicit `(subtype, supertype)` widening pairs. A task of kind `subtype`
/// satisfies a layer's declared interest in `supertype`; there is no
/// implicit structural or nominal subtyping beyond what is listed here.
///
/// Empty in this instantiation — every layer in this workspace declares
/// the concrete kinds it wants rather than a shared supertype — but kept
/// as a real mechanism (see [`kind_satisfies`]) rather than hardcoded
/// equality, since a future layer family built around a shared abstract
/// kind only needs an entry added here.
pub const WIDENING: &[(TaskKind, TaskKind)] = &[];

/// Whether a task tagged `actual` satisfies a declared interest in `declared`,
/// either because they're the same kind or because `actual` widens to it
/// per [`WIDENING`].
pub fn kind_satisfies(actual: TaskKind, declared: TaskKind) -> bool {
    actual == declared
        || WIDENING
            .iter()
            .any(|&(sub, sup)| sub == actual && sup == declared)
}

/// Whether `actual` is a member of `declared_set`, accounting for widening.
pub fn set_accepts(declared_set: &HashSet<TaskKind>, actual: TaskKind) -> bool {
    declared_set
        .iter()
        .any(|&declared| kind_satisfies(actual, declared))
}
