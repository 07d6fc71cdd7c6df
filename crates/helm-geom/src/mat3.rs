//! 3×3 homogeneous matrix representing a 2D rigid-body transform.

use crate::mat2::Mat2;
use crate::vec2::Vec2;
use crate::vec3::Vec3;

/// A 3×3 matrix over `f64`, stored row-major. Used as the homogeneous
/// representation `[[R, t], [0, 0, 1]]` of a 2D pose: a rotation `R`
/// ([`Mat2`]) and a translation `t` ([`Vec2`]).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat3 {
    mat: [f64; 9],
}

impl Mat3 {
    /// The 3×3 identity matrix (the identity pose).
    pub const IDENTITY: Self = Self {
        mat: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
    };

    /// Constructs a matrix from row-major elements.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        m00: f64,
        m01: f64,
        m02: f64,
        m10: f64,
        m11: f64,
        m12: f64,
        m20: f64,
        m21: f64,
        m22: f64,
    ) -> Self {
        Self {
            mat: [m00, m01, m02, m10, m11, m12, m20, m21, m22],
        }
    }

    /// Builds the homogeneous transform `[[rot, pos], [0, 0, 1]]`.
    pub fn from_transform(rot: Mat2, pos: Vec2) -> Self {
        Self::new(
            rot.elem(0, 0),
            rot.elem(0, 1),
            pos.x(),
            rot.elem(1, 0),
            rot.elem(1, 1),
            pos.y(),
            0.0,
            0.0,
            1.0,
        )
    }

    /// Element access by `(row, col)`.
    pub fn elem(&self, row: usize, col: usize) -> f64 {
        assert!(row <= 2 && col <= 2, "bad Mat3 index ({row}, {col})");
        self.mat[row * 3 + col]
    }

    /// Row `index` (0, 1, or 2) as a vector.
    pub fn row(&self, index: usize) -> Vec3 {
        assert!(index <= 2, "bad Mat3 row {index}");
        Vec3::new(
            self.mat[index * 3],
            self.mat[index * 3 + 1],
            self.mat[index * 3 + 2],
        )
    }

    /// Column `index` (0, 1, or 2) as a vector.
    pub fn col(&self, index: usize) -> Vec3 {
        assert!(index <= 2, "bad Mat3 column {index}");
        Vec3::new(self.mat[index], self.mat[index + 3], self.mat[index + 6])
    }

    /// Matrix-matrix product.
    pub fn mul_mat(&self, other: &Self) -> Self {
        let mut out = [0.0; 9];
        for r in 0..3 {
            for c in 0..3 {
                out[r * 3 + c] = self.row(r).dot(&other.col(c));
            }
        }
        Self { mat: out }
    }

    /// Applies the full 3×3 transform to a homogeneous point, returning a
    /// 2D point (the translation row's contribution is included via the
    /// implicit `z = 1`, and the result's `z` is discarded).
    pub fn mul_point(&self, p: Vec2) -> Vec2 {
        let extended = Vec3::new(p.x(), p.y(), 1.0);
        Vec2::new(self.row(0).dot(&extended), self.row(1).dot(&extended))
    }

    /// Applies the rotation block only (no translation) to a vector.
    pub fn mul_direction(&self, v: Vec2) -> Vec2 {
        let extended = Vec3::new(v.x(), v.y(), 0.0);
        Vec2::new(self.row(0).dot(&extended), self.row(1).dot(&extended))
    }

    /// Matrix-vector product against a full 3-vector.
    pub fn mul_vec3(&self, v: &Vec3) -> Vec3 {
        Vec3::new(self.row(0).dot(v), self.row(1).dot(v), self.row(2).dot(v))
    }

    /// Scalar multiplication.
    pub fn mul_scalar(&self, s: f64) -> Self {
        let mut out = [0.0; 9];
        for (i, e) in self.mat.iter().enumerate() {
            out[i] = e * s;
        }
        Self { mat: out }
    }

    /// Determinant, via cofactor expansion along the first row.
    pub fn det(&self) -> f64 {
        self.elem(0, 0) * (self.elem(1, 1) * self.elem(2, 2) - self.elem(1, 2) * self.elem(2, 1))
            - self.elem(0, 1)
                * (self.elem(1, 0) * self.elem(2, 2) - self.elem(1, 2) * self.elem(2, 0))
            + self.elem(0, 2)
                * (self.elem(1, 0) * self.elem(2, 1) - self.elem(1, 1) * self.elem(2, 0))
    }

    /// The 2×2 minor obtained by deleting `row` and `col`.
    pub fn minor(&self, row: usize, col: usize) -> Mat2 {
        let rows: Vec<usize> = (0..3).filter(|r| *r != row).collect();
        let cols: Vec<usize> = (0..3).filter(|c| *c != col).collect();
        Mat2::new(
            self.elem(rows[0], cols[0]),
            self.elem(rows[0], cols[1]),
            self.elem(rows[1], cols[0]),
            self.elem(rows[1], cols[1]),
        )
    }

    /// The matrix of cofactors (signed minors).
    pub fn cofactor(&self) -> Self {
        let sign = |row: usize, col: usize| if (row + col) % 2 == 0 { 1.0 } else { -1.0 };
        let mut out = [0.0; 9];
        for row in 0..3 {
            for col in 0..3 {
                out[row * 3 + col] = sign(row, col) * self.minor(row, col).det();
            }
        }
        Self { mat: out }
    }

    /// Transpose.
    pub fn transpose(&self) -> Self {
        let mut out = [0.0; 9];
        for row in 0..3 {
            for col in 0..3 {
                out[col * 3 + row] = self.elem(row, col);
            }
        }
        Self { mat: out }
    }

    /// Inverse via cofactor/transpose/determinant (the adjugate method).
    /// Singular inputs produce a non-finite result; callers must check
    /// [`Self::is_finite`] and treat failure as solver failure.
    pub fn inv(&self) -> Self {
        self.cofactor().transpose().mul_scalar(1.0 / self.det())
    }

    /// Whether every element is finite.
    pub fn is_finite(&self) -> bool {
        self.mat.iter().all(|e| e.is_finite())
    }

    /// The translation component: the top-right 2-vector.
    pub fn get_translation(&self) -> Vec2 {
        Vec2::new(self.elem(0, 2), self.elem(1, 2))
    }

    /// The direction the rotation block maps `(1, 0)` to.
    pub fn get_direction(&self) -> Vec2 {
        self.mul_direction(Vec2::new(1.0, 0.0))
    }
}
