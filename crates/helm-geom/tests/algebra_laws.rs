//! Algebraic laws from the matrix round-trip property table.

use helm_geom::{Mat2, Mat3, Vec2};
use proptest::prelude::*;

fn finite_angle() -> impl Strategy<Value = f64> {
    -10.0..10.0
}

fn finite_translation() -> impl Strategy<Value = (f64, f64)> {
    (-50.0..50.0, -50.0..50.0)
}

proptest! {
    #[test]
    fn inverse_composes_to_identity(a in finite_angle(), tx in -50.0..50.0, ty in -50.0..50.0) {
        let t = Mat3::from_transform(Mat2::from_angle(a), Vec2::new(tx, ty));
        let product = t.inv().mul_mat(&t);
        for row in 0..3 {
            for col in 0..3 {
                let expected = if row == col { 1.0 } else { 0.0 };
                prop_assert!((product.elem(row, col) - expected).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn from_transform_round_trips_translation_and_direction(
        a in finite_angle(),
        (tx, ty) in finite_translation(),
    ) {
        let rot = Mat2::from_angle(a);
        let pos = Vec2::new(tx, ty);
        let t = Mat3::from_transform(rot, pos);
        prop_assert_eq!(t.get_translation(), pos);
        let expected = rot.mul_vec(Vec2::new(1.0, 0.0));
        let got = t.get_direction();
        prop_assert!((got.x() - expected.x()).abs() < 1e-9);
        prop_assert!((got.y() - expected.y()).abs() < 1e-9);
    }

    #[test]
    fn composition_of_angles_adds(a in finite_angle(), b in finite_angle()) {
        let composed = Mat2::from_angle(a).mul_mat(&Mat2::from_angle(b));
        let direct = Mat2::from_angle(a + b);
        for row in 0..2 {
            for col in 0..2 {
                prop_assert!((composed.elem(row, col) - direct.elem(row, col)).abs() < 1e-6);
            }
        }
    }
}
