//! 2D vector.

use std::ops::{Add, Mul, Sub};

/// A 2D vector over `f64`, used for positions, directions, and gradients.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vec2 {
    x: f64,
    y: f64,
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Constructs a vector from components.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The x component.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// The y component.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Componentwise addition.
    pub fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    /// Scalar multiplication.
    pub fn mul(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }

    /// Dot product.
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Euclidean length.
    pub fn len(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// The angle of this vector from the positive x-axis, in radians.
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    /// A unit vector in the same direction. Undefined (produces
    /// non-finite components) for the zero vector.
    pub fn unit(self) -> Self {
        self.mul(1.0 / self.len())
    }

    /// The angle between this vector and another, in `[0, pi]`.
    pub fn angle_with(self, other: Self) -> f64 {
        self.unit().dot(other.unit()).clamp(-1.0, 1.0).acos()
    }

    /// Whether both components are finite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Projection of `projectee` onto `self`.
    pub fn proj(self, projectee: Self) -> Self {
        self.mul(self.dot(projectee) / self.dot(self))
    }
}

impl Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Vec2::add(self, rhs)
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self.add(rhs.mul(-1.0))
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Vec2::mul(self, rhs)
    }
}
