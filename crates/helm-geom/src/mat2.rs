//! 2×2 matrix, used for the rotation block of a [`crate::Mat3`] transform.

use crate::vec2::Vec2;

/// A 2×2 matrix over `f64`, stored row-major: `[m00, m01, m10, m11]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat2 {
    mat: [f64; 4],
}

impl Mat2 {
    /// The 2×2 identity matrix.
    pub const IDENTITY: Self = Self {
        mat: [1.0, 0.0, 0.0, 1.0],
    };

    /// Constructs a matrix from row-major elements.
    pub fn new(m00: f64, m01: f64, m10: f64, m11: f64) -> Self {
        Self {
            mat: [m00, m01, m10, m11],
        }
    }

    /// Builds the rotation matrix for `theta` radians counterclockwise:
    /// `[[cos θ, -sin θ], [sin θ, cos θ]]`.
    pub fn from_angle(theta: f64) -> Self {
        let (s, c) = theta.sin_cos();
        Self::new(c, -s, s, c)
    }

    /// Matrix-matrix product.
    pub fn mul_mat(&self, other: &Self) -> Self {
        Self::new(
            self.elem(0, 0) * other.elem(0, 0) + self.elem(0, 1) * other.elem(1, 0),
            self.elem(0, 0) * other.elem(0, 1) + self.elem(0, 1) * other.elem(1, 1),
            self.elem(1, 0) * other.elem(0, 0) + self.elem(1, 1) * other.elem(1, 0),
            self.elem(1, 0) * other.elem(0, 1) + self.elem(1, 1) * other.elem(1, 1),
        )
    }

    /// Matrix-vector product.
    pub fn mul_vec(&self, v: Vec2) -> Vec2 {
        Vec2::new(
            self.elem(0, 0) * v.x() + self.elem(0, 1) * v.y(),
            self.elem(1, 0) * v.x() + self.elem(1, 1) * v.y(),
        )
    }

    /// Scalar multiplication.
    pub fn mul_scalar(&self, s: f64) -> Self {
        Self::new(self.mat[0] * s, self.mat[1] * s, self.mat[2] * s, self.mat[3] * s)
    }

    /// Determinant.
    pub fn det(&self) -> f64 {
        self.mat[0] * self.mat[3] - self.mat[1] * self.mat[2]
    }

    /// Inverse via the adjugate. Singular inputs produce a non-finite
    /// result; callers must check [`Self::is_finite`].
    pub fn inv(&self) -> Self {
        let d = self.det();
        Self::new(self.mat[3] / d, -self.mat[1] / d, -self.mat[2] / d, self.mat[0] / d)
    }

    /// Whether every element is finite.
    pub fn is_finite(&self) -> bool {
        self.mat.iter().all(|e| e.is_finite())
    }

    /// Returns column `index` (0 or 1) as a vector.
    pub fn col(&self, index: usize) -> Vec2 {
        match index {
            0 => Vec2::new(self.mat[0], self.mat[2]),
            1 => Vec2::new(self.mat[1], self.mat[3]),
            _ => panic!("bad Mat2 column {index}"),
        }
    }

    /// Element access by `(row, col)`.
    pub fn elem(&self, row: usize, col: usize) -> f64 {
        assert!(row <= 1 && col <= 1, "bad Mat2 index ({row}, {col})");
        self.mat[row * 2 + col]
    }
}
