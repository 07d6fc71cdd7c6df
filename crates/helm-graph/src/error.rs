//! Graph-construction errors.

use std::fmt;

use crate::handle::LayerHandle;

/// Errors raised while building a [`crate::LayerGraph`].
///
/// Every variant here is a construction-time programming error: the graph
/// the caller tried to wire up either had an incompatible edge or a cycle.
/// There is no recovery path other than fixing the call site — per the
/// propagation policy these are fatal to setup, not the tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeError {
    /// Neither `parent`'s output kinds nor `child`'s input kinds (after
    /// widening) have any kind in common.
    IncompatibleInterface {
        /// The would-be parent.
        parent: LayerHandle,
        /// The would-be child.
        child: LayerHandle,
    },
    /// Adding the edge would create a cycle reachable from `parent`.
    Cycle {
        /// The edge whose addition closed the cycle.
        parent: LayerHandle,
        /// The edge whose addition closed the cycle.
        child: LayerHandle,
    },
    /// `add_chain` was given fewer than two handles.
    ChainTooShort,
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IncompatibleInterface { parent, child } => write!(
                f,
                "{parent} and {child} share no compatible task interface"
            ),
            Self::Cycle { parent, child } => {
                write!(f, "connecting {parent} to {child} would create a cycle")
            }
            Self::ChainTooShort => write!(f, "a chain must have at least two layers"),
        }
    }
}

impl std::error::Error for ShapeError {}
