//! Small fixed-dimension linear algebra for robot pose transforms.
//!
//! No general-purpose linear algebra crate is pulled in here — `Vec2`,
//! `Vec3`, `Mat2`, and `Mat3` are the only shapes the localizer and drive
//! kinematics need, and each is a plain stack-allocated struct over `f64`.

mod mat2;
mod mat3;
mod vec2;
mod vec3;

pub use mat2::Mat2;
pub use mat3::Mat3;
pub use vec2::Vec2;
pub use vec3::Vec3;
