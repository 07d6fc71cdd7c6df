//! A reference to a layer stored in a [`crate::LayerGraph`].

use std::fmt;

/// An index into a [`crate::LayerGraph`]'s layer slab.
///
/// Unlike `murk-arena`'s `FieldHandle`, this carries no generation: the
/// graph is append-only for the lifetime of a `RobotController` (layers
/// are never removed mid-run), so a stale handle cannot exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerHandle(pub(crate) u32);

impl fmt::Display for LayerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer#{}", self.0)
    }
}
