//! Probability fields over robot pose: the [`LocalizationData`] contract
//! and the square-falloff concrete model.

use helm_geom::Vec2;

/// A probability field over position (2D) and rotation (1D), plus the
/// derivatives the Newton solver needs to climb it.
///
/// Implementors need only provide [`Self::position_probability`],
/// [`Self::rotation_probability`], and [`Self::epsilon`]; every
/// derivative and gradient has a forward-difference default expressed in
/// terms of those three, mirroring how the reference implementation
/// layered a finite-difference base over a handful of closed-form models.
pub trait LocalizationData {
    /// `P(pos)`.
    fn position_probability(&self, pos: Vec2) -> f64;

    /// `P(θ)`.
    fn rotation_probability(&self, theta: f64) -> f64;

    /// The forward-difference step used by every derivative default.
    fn epsilon(&self) -> f64;

    /// `∂P/∂x` at `pos`, via forward difference at [`Self::epsilon`].
    fn position_probability_dx(&self, pos: Vec2) -> f64 {
        let eps = self.epsilon();
        (self.position_probability(pos + Vec2::new(eps, 0.0)) - self.position_probability(pos)) / eps
    }

    /// `∂P/∂y` at `pos`, via forward difference at [`Self::epsilon`].
    fn position_probability_dy(&self, pos: Vec2) -> f64 {
        let eps = self.epsilon();
        (self.position_probability(pos + Vec2::new(0.0, eps)) - self.position_probability(pos)) / eps
    }

    /// `(∂P/∂x, ∂P/∂y)` at `pos`.
    fn position_gradient(&self, pos: Vec2) -> Vec2 {
        Vec2::new(self.position_probability_dx(pos), self.position_probability_dy(pos))
    }

    /// Hessian row `(∂²P/∂x², ∂²P/∂x∂y)`, via forward difference of
    /// [`Self::position_probability_dx`].
    fn position_probability_dx_gradient(&self, pos: Vec2) -> Vec2 {
        let eps = self.epsilon();
        let base = self.position_probability_dx(pos);
        Vec2::new(
            (self.position_probability_dx(pos + Vec2::new(eps, 0.0)) - base) / eps,
            (self.position_probability_dx(pos + Vec2::new(0.0, eps)) - base) / eps,
        )
    }

    /// Hessian row `(∂²P/∂y∂x, ∂²P/∂y²)`, via forward difference of
    /// [`Self::position_probability_dy`].
    fn position_probability_dy_gradient(&self, pos: Vec2) -> Vec2 {
        let eps = self.epsilon();
        let base = self.position_probability_dy(pos);
        Vec2::new(
            (self.position_probability_dy(pos + Vec2::new(eps, 0.0)) - base) / eps,
            (self.position_probability_dy(pos + Vec2::new(0.0, eps)) - base) / eps,
        )
    }

    /// `dP/dθ` at `theta`, via forward difference at [`Self::epsilon`].
    fn rotation_probability_dtheta(&self, theta: f64) -> f64 {
        let eps = self.epsilon();
        (self.rotation_probability(theta + eps) - self.rotation_probability(theta)) / eps
    }

    /// `d²P/dθ²` at `theta`, via forward difference of
    /// [`Self::rotation_probability_dtheta`].
    fn rotation_probability_dtheta2(&self, theta: f64) -> f64 {
        let eps = self.epsilon();
        (self.rotation_probability_dtheta(theta + eps) - self.rotation_probability_dtheta(theta)) / eps
    }
}

/// The default [`LocalizationData`] model: a single bump centered at a
/// mean transform, falling off with the square of distance.
///
/// `P(pos) = A / (‖pos − μ‖² · k_p + 1)`, `P(θ) = A / ((θ − θ₀)² · k_r + 1)`,
/// where `μ` and `θ₀` come from the mean transform's translation and
/// facing direction.
pub struct SqFalloffLocalizationData {
    mean: helm_geom::Mat3,
    accuracy: f64,
    k_p: f64,
    k_r: f64,
    epsilon: f64,
}

impl SqFalloffLocalizationData {
    /// Builds a field centered at `mean`, peaking at `accuracy`, with
    /// position/rotation precision `k_p`/`k_r` and finite-difference step
    /// `epsilon`.
    pub fn new(mean: helm_geom::Mat3, accuracy: f64, k_p: f64, k_r: f64, epsilon: f64) -> Self {
        Self { mean, accuracy, k_p, k_r, epsilon }
    }

    fn mu(&self) -> Vec2 {
        self.mean.get_translation()
    }

    fn theta0(&self) -> f64 {
        self.mean.get_direction().angle()
    }
}

impl LocalizationData for SqFalloffLocalizationData {
    fn position_probability(&self, pos: Vec2) -> f64 {
        let diff = pos - self.mu();
        self.accuracy / (diff.dot(diff) * self.k_p + 1.0)
    }

    fn rotation_probability(&self, theta: f64) -> f64 {
        let diff = theta - self.theta0();
        self.accuracy / (diff * diff * self.k_r + 1.0)
    }

    fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helm_geom::{Mat2, Mat3};

    fn centered_at(pos: Vec2, angle: f64) -> SqFalloffLocalizationData {
        let mean = Mat3::from_transform(Mat2::from_angle(angle), pos);
        SqFalloffLocalizationData::new(mean, 1.0, 1.0, 1.0, 1e-4)
    }

    #[test]
    fn peaks_at_the_mean() {
        let data = centered_at(Vec2::new(2.0, -3.0), 0.4);
        let peak = data.position_probability(Vec2::new(2.0, -3.0));
        let nearby = data.position_probability(Vec2::new(2.5, -3.0));
        assert!(peak > nearby);
        assert!((peak - 1.0).abs() < 1e-12);
    }

    #[test]
    fn gradient_points_toward_the_mean() {
        let data = centered_at(Vec2::ZERO, 0.0);
        let grad = data.position_gradient(Vec2::new(1.0, 0.0));
        // approaching the peak from +x, probability increases toward -x
        assert!(grad.x() < 0.0);
    }

    #[test]
    fn rotation_probability_peaks_at_mean_angle() {
        let data = centered_at(Vec2::ZERO, 1.0);
        let peak = data.rotation_probability(1.0);
        let off = data.rotation_probability(1.5);
        assert!(peak > off);
    }

    #[test]
    fn hessian_rows_are_finite_near_the_peak() {
        let data = centered_at(Vec2::new(1.0, 1.0), 0.0);
        let row1 = data.position_probability_dx_gradient(Vec2::new(1.1, 1.1));
        let row2 = data.position_probability_dy_gradient(Vec2::new(1.1, 1.1));
        assert!(row1.is_finite());
        assert!(row2.is_finite());
    }
}
