//! The telemetry frame types and their wire tags.

use helm_geom::Mat3;

/// Frame tag for [`TelemetryFrame::Position`].
pub const TAG_POSITION: u8 = 0x01;
/// Frame tag for [`TelemetryFrame::Vector`].
pub const TAG_VECTOR: u8 = 0x02;
/// Frame tag for [`TelemetryFrame::Transform`].
pub const TAG_TRANSFORM: u8 = 0x03;
/// Frame tag for [`TelemetryFrame::UpdatableObject`].
pub const TAG_UPDATABLE_OBJECT: u8 = 0x04;
/// Frame tag for [`TelemetryFrame::Log`].
pub const TAG_LOG: u8 = 0x05;

/// A single unit of telemetry data, tagged by wire type.
///
/// Every variant but `Log` carries an optional `name` used by the
/// receiving dashboard to group repeated updates of the same series
/// or field overlay; `None` serializes to the wire's null-string byte.
#[derive(Clone, Debug, PartialEq)]
pub enum TelemetryFrame {
    /// A labeled point on the field.
    Position {
        /// Series name, or `None` for an anonymous point.
        name: Option<String>,
        /// Field x-coordinate.
        x: f64,
        /// Field y-coordinate.
        y: f64,
    },
    /// A labeled arrow from `(x, y)` to `(x + dx, y + dy)`.
    Vector {
        /// Series name, or `None` for an anonymous arrow.
        name: Option<String>,
        /// Origin x-coordinate.
        x: f64,
        /// Origin y-coordinate.
        y: f64,
        /// x-component of the arrow.
        dx: f64,
        /// y-component of the arrow.
        dy: f64,
    },
    /// A labeled 2D pose, drawn as a point with a heading.
    Transform {
        /// Series name, or `None` for an anonymous pose.
        name: Option<String>,
        /// Field x-coordinate.
        x: f64,
        /// Field y-coordinate.
        y: f64,
        /// Heading, radians.
        heading: f64,
    },
    /// A persistent, named field overlay object that moves between frames
    /// (as opposed to `Transform`, which is a one-shot draw).
    UpdatableObject {
        /// Object identifier; repeated frames with the same `id` update
        /// the same overlay object rather than drawing a new one.
        id: Option<String>,
        /// Field x-coordinate.
        x: f64,
        /// Field y-coordinate.
        y: f64,
        /// Heading, radians.
        heading: f64,
    },
    /// A free-text log line.
    Log {
        /// The log message, or `None` for a blank line.
        message: Option<String>,
    },
}

impl TelemetryFrame {
    /// The wire tag byte for this frame's variant.
    pub fn tag(&self) -> u8 {
        match self {
            Self::Position { .. } => TAG_POSITION,
            Self::Vector { .. } => TAG_VECTOR,
            Self::Transform { .. } => TAG_TRANSFORM,
            Self::UpdatableObject { .. } => TAG_UPDATABLE_OBJECT,
            Self::Log { .. } => TAG_LOG,
        }
    }

    /// Builds a named `Transform` frame from a robot pose.
    pub fn from_transform(name: impl Into<String>, transform: Mat3) -> Self {
        let translation = transform.get_translation();
        let heading = transform.get_direction().angle();
        Self::Transform {
            name: Some(name.into()),
            x: translation.x(),
            y: translation.y(),
            heading,
        }
    }
}
