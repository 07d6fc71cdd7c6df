//! The fused-maximum Newton solver: gradient ascent with random restarts
//! over the summed probability field of every registered source.

use std::fmt;

use helm_geom::{Mat2, Mat3, Vec2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::data::LocalizationData;

/// Tunable constants for [`NewtonLocalizer`]. Defaults are chosen to sit
/// in the middle of the ranges called out as typical, not to match any
/// particular reference run — the solver's only normative obligation is
/// the basin-convergence property, not these exact values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NewtonSolverConfig {
    /// Number of random restarts per axis.
    pub roots: u32,
    /// Maximum ascent iterations per restart.
    pub steps: u32,
    /// Gradient magnitude below which a point is treated as flat.
    pub flat_threshold: f64,
    /// Base step length multiplier applied to the gradient.
    pub step_size: f64,
    /// Minimum probability gain required to accept a proposed step.
    pub min_improvement: f64,
    /// Multiplier applied to `speed` after a rejected step.
    pub speed_damping: f64,
    /// `speed` below which a restart is abandoned.
    pub min_speed: f64,
    /// Distance below which a flat point is considered the same maximum
    /// as a previously recorded one.
    pub root_epsilon: f64,
    /// Base nudge size applied (scaled by hit count) on a repeat visit
    /// to a recorded maximum.
    pub disturbance_size: f64,
    /// Gradient magnitude below which a rotation point is flat.
    pub rot_flat_threshold: f64,
    /// Base step length multiplier for the rotation ascent.
    pub rot_step_size: f64,
    /// Minimum probability gain required to accept a rotation step.
    pub rot_min_improvement: f64,
    /// Speed damping for the rotation ascent.
    pub rot_speed_damping: f64,
    /// Minimum rotation ascent speed before abandoning a restart.
    pub rot_min_speed: f64,
    /// Angular distance below which a flat rotation point matches a
    /// recorded maximum.
    pub rot_root_epsilon: f64,
    /// Base nudge size for a repeat rotation maximum visit.
    pub rot_disturbance_size: f64,
}

impl Default for NewtonSolverConfig {
    fn default() -> Self {
        Self {
            roots: 4,
            steps: 160,
            flat_threshold: 1e-6,
            step_size: 5.0,
            min_improvement: 1e-9,
            speed_damping: 0.5,
            min_speed: 1e-6,
            root_epsilon: 0.05,
            disturbance_size: 0.3,
            rot_flat_threshold: 1e-6,
            rot_step_size: 5.0,
            rot_min_improvement: 1e-9,
            rot_speed_damping: 0.5,
            rot_min_speed: 1e-6,
            rot_root_epsilon: 0.1,
            rot_disturbance_size: 0.5,
        }
    }
}

/// A [`NewtonSolverConfig`] field was out of range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `roots` or `steps` was zero.
    ZeroIterationBudget,
    /// A step size, speed, or disturbance field was not finite and
    /// positive.
    NonPositiveTunable,
    /// `speed_damping` or `rot_speed_damping` was outside `(0, 1)`.
    DampingOutOfRange,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroIterationBudget => write!(f, "roots and steps must both be nonzero"),
            Self::NonPositiveTunable => write!(f, "step/speed/disturbance tunables must be finite and positive"),
            Self::DampingOutOfRange => write!(f, "speed damping must lie in (0, 1)"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl NewtonSolverConfig {
    /// Validates that every tunable is in a range the solver can
    /// actually converge with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.roots == 0 || self.steps == 0 {
            return Err(ConfigError::ZeroIterationBudget);
        }
        let positive = [
            self.flat_threshold,
            self.step_size,
            self.min_speed,
            self.root_epsilon,
            self.disturbance_size,
            self.rot_flat_threshold,
            self.rot_step_size,
            self.rot_min_speed,
            self.rot_root_epsilon,
            self.rot_disturbance_size,
        ];
        if positive.iter().any(|v| !v.is_finite() || *v <= 0.0) {
            return Err(ConfigError::NonPositiveTunable);
        }
        if !(0.0..1.0).contains(&self.speed_damping) || !(0.0..1.0).contains(&self.rot_speed_damping) {
            return Err(ConfigError::DampingOutOfRange);
        }
        Ok(())
    }
}

fn sum_position_probability(sources: &[Box<dyn LocalizationData>], pos: Vec2) -> f64 {
    sources.iter().map(|s| s.position_probability(pos)).sum()
}

fn sum_position_gradient(sources: &[Box<dyn LocalizationData>], pos: Vec2) -> Vec2 {
    sources
        .iter()
        .map(|s| s.position_gradient(pos))
        .fold(Vec2::ZERO, |acc, g| acc + g)
}

fn sum_rotation_probability(sources: &[Box<dyn LocalizationData>], theta: f64) -> f64 {
    sources.iter().map(|s| s.rotation_probability(theta)).sum()
}

fn sum_rotation_gradient(sources: &[Box<dyn LocalizationData>], theta: f64) -> f64 {
    sources.iter().map(|s| s.rotation_probability_dtheta(theta)).sum()
}

/// Gradient-ascent multi-maximum finder, combining independent position
/// and rotation searches into a fused transform.
///
/// Position and rotation are found by the same shape of search: random
/// restarts, Armijo-style step acceptance with speed damping, and a
/// nudge-on-revisit rule so repeated restarts don't collapse onto a
/// single basin when the field is multi-modal.
pub struct NewtonLocalizer {
    config: NewtonSolverConfig,
    rng: ChaCha8Rng,
}

impl NewtonLocalizer {
    /// Builds a solver with the given tunables, seeded deterministically
    /// from `seed`.
    pub fn new(config: NewtonSolverConfig, seed: u64) -> Self {
        Self { config, rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Finds the fused position/rotation maximum over `sources` and
    /// packs it into a transform.
    pub fn solve(&mut self, sources: &[Box<dyn LocalizationData>]) -> Mat3 {
        let position = self.solve_position(sources);
        let rotation = self.solve_rotation(sources);
        Mat3::from_transform(Mat2::from_angle(rotation), position)
    }

    fn solve_position(&mut self, sources: &[Box<dyn LocalizationData>]) -> Vec2 {
        let c = self.config;
        let mut maxima: Vec<Vec2> = Vec::new();
        let mut hits: Vec<u32> = Vec::new();

        for _ in 0..c.roots {
            let mut point = Vec2::ZERO;
            let mut speed = 1.0_f64;
            let mut p0 = sum_position_probability(sources, point);

            for _ in 0..c.steps {
                let g = sum_position_gradient(sources, point);
                if g.len() > c.flat_threshold {
                    let delta = g * (speed * c.step_size);
                    let p1 = sum_position_probability(sources, point + delta);
                    if p1 - p0 < c.min_improvement {
                        speed *= c.speed_damping;
                        if speed < c.min_speed {
                            break;
                        }
                    } else {
                        point = point + delta;
                        p0 = p1;
                    }
                } else if let Some(idx) = maxima.iter().position(|m| (*m - point).len() < c.root_epsilon) {
                    hits[idx] += 1;
                    let angle = self.rng.random_range(-std::f64::consts::PI..std::f64::consts::PI);
                    let nudge = Vec2::new(angle.cos(), angle.sin()).mul(hits[idx] as f64 * c.disturbance_size);
                    point = point + nudge;
                } else {
                    break;
                }
            }

            maxima.push(point);
            hits.push(0);
        }

        maxima
            .into_iter()
            .max_by(|a, b| {
                sum_position_probability(sources, *a).total_cmp(&sum_position_probability(sources, *b))
            })
            .unwrap_or(Vec2::ZERO)
    }

    fn solve_rotation(&mut self, sources: &[Box<dyn LocalizationData>]) -> f64 {
        let c = self.config;
        let mut maxima: Vec<f64> = Vec::new();
        let mut hits: Vec<u32> = Vec::new();

        for _ in 0..c.roots {
            let mut point = 0.0_f64;
            let mut speed = 1.0_f64;
            let mut p0 = sum_rotation_probability(sources, point);

            for _ in 0..c.steps {
                let g = sum_rotation_gradient(sources, point);
                if g.abs() > c.rot_flat_threshold {
                    let delta = g * speed * c.rot_step_size;
                    let p1 = sum_rotation_probability(sources, point + delta);
                    if p1 - p0 < c.rot_min_improvement {
                        speed *= c.rot_speed_damping;
                        if speed < c.rot_min_speed {
                            break;
                        }
                    } else {
                        point += delta;
                        p0 = p1;
                    }
                } else if let Some(idx) = maxima.iter().position(|m| (m - point).abs() < c.rot_root_epsilon) {
                    hits[idx] += 1;
                    let sign = if self.rng.random::<bool>() { 1.0 } else { -1.0 };
                    point += sign * hits[idx] as f64 * c.rot_disturbance_size;
                } else {
                    break;
                }
            }

            maxima.push(point);
            hits.push(0);
        }

        maxima
            .into_iter()
            .max_by(|a, b| {
                sum_rotation_probability(sources, *a).total_cmp(&sum_rotation_probability(sources, *b))
            })
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SqFalloffLocalizationData;

    fn single_source(pos: Vec2, angle: f64) -> Vec<Box<dyn LocalizationData>> {
        let mean = Mat3::from_transform(Mat2::from_angle(angle), pos);
        vec![Box::new(SqFalloffLocalizationData::new(mean, 1.0, 1.0, 1.0, 1e-4))]
    }

    #[test]
    fn config_rejects_zero_iteration_budget() {
        let mut config = NewtonSolverConfig::default();
        config.roots = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroIterationBudget));
    }

    #[test]
    fn config_rejects_damping_out_of_range() {
        let mut config = NewtonSolverConfig::default();
        config.speed_damping = 1.5;
        assert_eq!(config.validate(), Err(ConfigError::DampingOutOfRange));
    }

    #[test]
    fn converges_to_single_source_peak() {
        let sources = single_source(Vec2::new(2.0, -2.047), 2.0);
        let mut solver = NewtonLocalizer::new(NewtonSolverConfig::default(), 0);
        let transform = solver.solve(&sources);

        let translation = transform.get_translation();
        assert!((translation.x() - 2.0).abs() < 0.02);
        assert!((translation.y() - (-2.047)).abs() < 0.02);

        let angle = transform.get_direction().angle();
        assert!((angle - 2.0).abs() < 0.02);
    }

    #[test]
    fn degenerate_empty_sources_yields_identity() {
        let sources: Vec<Box<dyn LocalizationData>> = Vec::new();
        let mut solver = NewtonLocalizer::new(NewtonSolverConfig::default(), 7);
        let transform = solver.solve(&sources);
        assert!(transform.is_finite());
        assert_eq!(transform.get_translation(), Vec2::ZERO);
    }

    #[test]
    fn same_seed_is_deterministic() {
        let sources = single_source(Vec2::new(1.0, 1.0), 0.5);
        let mut a = NewtonLocalizer::new(NewtonSolverConfig::default(), 42);
        let mut b = NewtonLocalizer::new(NewtonSolverConfig::default(), 42);
        assert_eq!(a.solve(&sources), b.solve(&sources));
    }
}
