//! Property tests for the matrix and quaternion algebra.

use proptest::prelude::*;
use skel_math::{Float4x4, SimdFloat4};

fn unit_quaternion() -> impl Strategy<Value = SimdFloat4> {
    (-1.0f32..1.0, -1.0f32..1.0, -1.0f32..1.0, -1.0f32..1.0)
        .prop_filter("non degenerate", |(x, y, z, w)| {
            x * x + y * y + z * z + w * w > 1e-2
        })
        .prop_map(|(x, y, z, w)| SimdFloat4::load(x, y, z, w).normalize4())
}

fn affine_matrix() -> impl Strategy<Value = Float4x4> {
    (
        prop::array::uniform3(-100.0f32..100.0),
        unit_quaternion(),
        prop::array::uniform3(0.5f32..2.0),
    )
        .prop_map(|(t, q, s)| {
            Float4x4::from_affine(
                SimdFloat4::load(t[0], t[1], t[2], 1.0),
                q,
                SimdFloat4::load(s[0], s[1], s[2], 1.0),
            )
        })
}

fn max_abs_diff(a: &Float4x4, b: &Float4x4) -> f32 {
    a.cols
        .iter()
        .zip(b.cols.iter())
        .flat_map(|(ca, cb)| (0..4).map(move |i| (ca.0[i] - cb.0[i]).abs()))
        .fold(0.0, f32::max)
}

proptest! {
    #[test]
    fn prop_invert_twice_is_identity(m in affine_matrix()) {
        let back = m.invert().invert();
        prop_assert!(max_abs_diff(&back, &m) < 1e-2, "{:?} vs {:?}", back, m);
    }

    #[test]
    fn prop_matrix_times_inverse_is_identity(m in affine_matrix()) {
        let product = m * m.invert();
        prop_assert!(max_abs_diff(&product, &Float4x4::IDENTITY) < 1e-3);
    }

    #[test]
    fn prop_rotation_matrix_is_orthonormal(q in unit_quaternion()) {
        let m = Float4x4::from_quaternion(q);
        prop_assert!(m.is_orthogonal().are_all_true1());
        prop_assert!(m.is_normalized().are_all_true3());
    }

    #[test]
    fn prop_quaternion_round_trip(q in unit_quaternion()) {
        let back = Float4x4::from_quaternion(q).to_quaternion();
        // q and -q encode the same rotation.
        let dot = q.dot4(back).get_x().abs();
        prop_assert!((dot - 1.0).abs() < 1e-4, "{:?} vs {:?}", q, back);
    }

    #[test]
    fn prop_affine_round_trip(
        t in prop::array::uniform3(-100.0f32..100.0),
        q in unit_quaternion(),
        s in prop::array::uniform3(0.5f32..2.0),
    ) {
        let translation = SimdFloat4::load(t[0], t[1], t[2], 1.0);
        let scale = SimdFloat4::load(s[0], s[1], s[2], 1.0);
        let m = Float4x4::from_affine(translation, q, scale);
        let parts = m.to_affine();
        prop_assert!(parts.is_some());
        if let Some(parts) = parts {
            for i in 0..3 {
                prop_assert!((parts.translation.0[i] - translation.0[i]).abs() < 1e-4);
                prop_assert!((parts.scale.0[i] - scale.0[i]).abs() < 1e-3);
            }
            prop_assert!((q.dot4(parts.rotation).get_x().abs() - 1.0).abs() < 1e-3);
        }
    }
}
