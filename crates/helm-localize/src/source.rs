//! Pose data producers registered with a [`crate::RobotLocalizer`].

use helm_geom::Mat3;

use crate::data::LocalizationData;

/// A producer of [`LocalizationData`], registered with a
/// `RobotLocalizer` and driven by the controller's tick lifecycle.
///
/// `on_start` runs once, before the first solve; `on_update` runs every
/// tick, before the cached transform is (re)computed. A source that has
/// nothing to contribute this tick reports `has_data() == false` and is
/// skipped by the solver.
pub trait LocalizationSource {
    /// Called once, the first time the owning localizer processes, with
    /// the localizer's initial transform.
    fn on_start(&mut self, initial_transform: Mat3);

    /// Called once per controller tick, before the localizer's cache is
    /// consulted.
    fn on_update(&mut self);

    /// Whether this source currently has a field to contribute.
    fn has_data(&self) -> bool;

    /// A fresh probability field reflecting this source's current pose
    /// estimate.
    fn collect_data(&self) -> Box<dyn LocalizationData>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SqFalloffLocalizationData;
    use helm_geom::{Mat2, Vec2};

    struct Stationary {
        transform: Mat3,
        started: bool,
        updates: u32,
    }

    impl LocalizationSource for Stationary {
        fn on_start(&mut self, initial_transform: Mat3) {
            self.transform = initial_transform;
            self.started = true;
        }

        fn on_update(&mut self) {
            self.updates += 1;
        }

        fn has_data(&self) -> bool {
            self.started
        }

        fn collect_data(&self) -> Box<dyn LocalizationData> {
            Box::new(SqFalloffLocalizationData::new(self.transform, 1.0, 1.0, 1.0, 1e-4))
        }
    }

    #[test]
    fn has_data_only_after_on_start() {
        let mut source = Stationary { transform: Mat3::IDENTITY, started: false, updates: 0 };
        assert!(!source.has_data());
        source.on_start(Mat3::from_transform(Mat2::from_angle(0.2), Vec2::new(1.0, 2.0)));
        assert!(source.has_data());
        source.on_update();
        assert_eq!(source.updates, 1);
    }
}
