//! The transform block: translation, rotation and scale of four joints.

use crate::{Float4x4, SimdFloat4, SoaFloat3, SoaFloat4, SoaQuaternion};

/// Local transforms of four joints, one joint per lane.
///
/// This is the unit of storage for bind poses, sampled poses and blended
/// poses. A buffer of `n` joints holds `n.div_ceil(4)` blocks; lanes past the
/// last joint carry identity transforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoaTransform {
    pub translation: SoaFloat3,
    pub rotation: SoaQuaternion,
    pub scale: SoaFloat3,
}

impl Default for SoaTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Translation, rotation and scale of a single joint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointTransform {
    pub translation: [f32; 3],
    pub rotation: [f32; 4],
    pub scale: [f32; 3],
}

impl JointTransform {
    pub const IDENTITY: Self = Self {
        translation: [0.0; 3],
        rotation: [0.0, 0.0, 0.0, 1.0],
        scale: [1.0; 3],
    };
}

impl Default for JointTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl SoaTransform {
    pub const IDENTITY: Self = Self {
        translation: SoaFloat3::ZERO,
        rotation: SoaQuaternion::IDENTITY,
        scale: SoaFloat3::ONE,
    };

    /// Transform of the joint stored in `lane`.
    pub fn lane(&self, lane: usize) -> JointTransform {
        JointTransform {
            translation: self.translation.lane(lane),
            rotation: self.rotation.lane(lane),
            scale: self.scale.lane(lane),
        }
    }

    pub fn set_lane(&mut self, lane: usize, transform: &JointTransform) {
        self.translation.set_lane(lane, transform.translation);
        self.rotation.set_lane(lane, transform.rotation);
        self.scale.set_lane(lane, transform.scale);
    }
}

/// Four column-major matrices in structure-of-arrays layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoaFloat4x4 {
    pub cols: [SoaFloat4; 4],
}

impl SoaFloat4x4 {
    /// Composes four affine matrices at once. Rotations must be normalized.
    pub fn from_affine(translation: &SoaFloat3, rotation: &SoaQuaternion, scale: &SoaFloat3) -> Self {
        debug_assert!(
            rotation.is_normalized_est().are_all_true(),
            "quaternion is not normalized"
        );
        let zero = SimdFloat4::ZERO;
        let one = SimdFloat4::ONE;
        let two = one + one;

        let q = rotation;
        let (xx, yy, zz) = (q.x * q.x, q.y * q.y, q.z * q.z);
        let (xy, xz, yz) = (q.x * q.y, q.x * q.z, q.y * q.z);
        let (xw, yw, zw) = (q.x * q.w, q.y * q.w, q.z * q.w);

        let col0 = SoaFloat4::new(
            scale.x * (one - two * (yy + zz)),
            scale.x * (two * (xy + zw)),
            scale.x * (two * (xz - yw)),
            zero,
        );
        let col1 = SoaFloat4::new(
            scale.y * (two * (xy - zw)),
            scale.y * (one - two * (xx + zz)),
            scale.y * (two * (yz + xw)),
            zero,
        );
        let col2 = SoaFloat4::new(
            scale.z * (two * (xz + yw)),
            scale.z * (two * (yz - xw)),
            scale.z * (one - two * (xx + yy)),
            zero,
        );
        let col3 = SoaFloat4::new(translation.x, translation.y, translation.z, one);

        Self {
            cols: [col0, col1, col2, col3],
        }
    }

    /// Transposes to four regular matrices, one per lane.
    pub fn to_aos(&self) -> [Float4x4; 4] {
        let per_col: [[SimdFloat4; 4]; 4] = self
            .cols
            .map(|c| SimdFloat4::transpose4x4([c.x, c.y, c.z, c.w]));
        std::array::from_fn(|lane| {
            Float4x4::from_cols(
                per_col[0][lane],
                per_col[1][lane],
                per_col[2][lane],
                per_col[3][lane],
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::assert_float4x4_near;
    use pretty_assertions::assert_eq;
    use std::f32::consts::FRAC_1_SQRT_2;

    #[test]
    fn test_identity_lanes() {
        let t = SoaTransform::default();
        for lane in 0..4 {
            assert_eq!(t.lane(lane), JointTransform::IDENTITY);
        }
    }

    #[test]
    fn test_set_lane() {
        let mut t = SoaTransform::IDENTITY;
        let joint = JointTransform {
            translation: [1.0, 2.0, 3.0],
            rotation: [0.0, FRAC_1_SQRT_2, 0.0, FRAC_1_SQRT_2],
            scale: [2.0, 2.0, 2.0],
        };
        t.set_lane(2, &joint);
        assert_eq!(t.lane(2), joint);
        assert_eq!(t.lane(1), JointTransform::IDENTITY);
    }

    #[test]
    fn test_from_affine_matches_aos() {
        let mut t = SoaTransform::IDENTITY;
        t.set_lane(
            1,
            &JointTransform {
                translation: [-12.0, 46.0, 12.0],
                rotation: [0.0, FRAC_1_SQRT_2, 0.0, FRAC_1_SQRT_2],
                scale: [2.0, 46.0, 3.0],
            },
        );
        t.set_lane(
            3,
            &JointTransform {
                translation: [1.0, 2.0, 3.0],
                rotation: [0.0, 0.0, 0.0, 1.0],
                scale: [1.0, 1.0, 1.0],
            },
        );

        let matrices = SoaFloat4x4::from_affine(&t.translation, &t.rotation, &t.scale).to_aos();
        assert_eq!(matrices[0], Float4x4::IDENTITY);
        assert_float4x4_near(
            &matrices[1],
            [
                [0.0, 0.0, -2.0, 0.0],
                [0.0, 46.0, 0.0, 0.0],
                [3.0, 0.0, 0.0, 0.0],
                [-12.0, 46.0, 12.0, 1.0],
            ],
            1e-5,
        );
        assert_eq!(matrices[2], Float4x4::IDENTITY);
        assert_eq!(matrices[3].cols[3].0, [1.0, 2.0, 3.0, 1.0]);

        for lane in 0..4 {
            let joint = t.lane(lane);
            let expected = Float4x4::from_affine(
                SimdFloat4::load3_ptr_u(&joint.translation),
                SimdFloat4(joint.rotation),
                SimdFloat4::load3_ptr_u(&joint.scale),
            );
            let expected_cols = expected.cols.map(|c| c.0);
            assert_float4x4_near(&matrices[lane], expected_cols, 1e-6);
        }
    }
}
