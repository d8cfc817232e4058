//! Four quaternions in structure-of-arrays layout.

use std::ops::{Add, Mul, Neg};

use crate::{SimdFloat4, SimdInt4};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SoaQuaternion {
    pub x: SimdFloat4,
    pub y: SimdFloat4,
    pub z: SimdFloat4,
    pub w: SimdFloat4,
}

impl SoaQuaternion {
    pub const IDENTITY: Self = Self {
        x: SimdFloat4::ZERO,
        y: SimdFloat4::ZERO,
        z: SimdFloat4::ZERO,
        w: SimdFloat4::ONE,
    };

    #[inline]
    pub const fn new(x: SimdFloat4, y: SimdFloat4, z: SimdFloat4, w: SimdFloat4) -> Self {
        Self { x, y, z, w }
    }

    /// Replicates one quaternion in all four lanes.
    #[inline]
    pub const fn splat(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self {
            x: SimdFloat4::load1(x),
            y: SimdFloat4::load1(y),
            z: SimdFloat4::load1(z),
            w: SimdFloat4::load1(w),
        }
    }

    #[inline]
    pub fn lane(&self, lane: usize) -> [f32; 4] {
        [self.x.0[lane], self.y.0[lane], self.z.0[lane], self.w.0[lane]]
    }

    #[inline]
    pub fn set_lane(&mut self, lane: usize, q: [f32; 4]) {
        self.x.0[lane] = q[0];
        self.y.0[lane] = q[1];
        self.z.0[lane] = q[2];
        self.w.0[lane] = q[3];
    }

    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    #[inline]
    pub fn dot(&self, b: &Self) -> SimdFloat4 {
        self.x * b.x + self.y * b.y + self.z * b.z + self.w * b.w
    }

    /// Normalizes every lane. Lanes must not be of zero length.
    #[inline]
    pub fn normalize(&self) -> Self {
        let len_sq = self.dot(self);
        debug_assert!(
            len_sq.cmp_ne(SimdFloat4::ZERO).are_all_true(),
            "quaternion is not normalizable"
        );
        let inv_len = len_sq.sqrt().rcp_est_nr();
        *self * inv_len
    }

    /// Estimated normalization, accurate to [`crate::NORMALIZATION_TOLERANCE_EST_SQ`].
    #[inline]
    pub fn normalize_est(&self) -> Self {
        let len_sq = self.dot(self);
        debug_assert!(
            len_sq.cmp_ne(SimdFloat4::ZERO).are_all_true(),
            "quaternion is not normalizable"
        );
        *self * len_sq.rsqrt_est()
    }

    #[inline]
    pub fn is_normalized(&self) -> SimdInt4 {
        let len_sq = self.dot(self);
        (len_sq - SimdFloat4::ONE)
            .abs()
            .cmp_lt(SimdFloat4::load1(crate::NORMALIZATION_TOLERANCE_SQ))
    }

    #[inline]
    pub fn is_normalized_est(&self) -> SimdInt4 {
        let len_sq = self.dot(self);
        (len_sq - SimdFloat4::ONE)
            .abs()
            .cmp_lt(SimdFloat4::load1(crate::NORMALIZATION_TOLERANCE_EST_SQ))
    }

    /// Flips the lanes whose dot product with `reference` is negative.
    #[inline]
    pub fn align_to(&self, reference: &Self) -> Self {
        let sign = self.dot(reference).sign();
        Self::new(
            self.x.xor(sign),
            self.y.xor(sign),
            self.z.xor(sign),
            self.w.xor(sign),
        )
    }

    /// Normalized lerp per lane. Inputs are expected on the same hemisphere.
    #[inline]
    pub fn nlerp(&self, b: &Self, alpha: SimdFloat4) -> Self {
        Self::new(
            self.x.lerp(b.x, alpha),
            self.y.lerp(b.y, alpha),
            self.z.lerp(b.z, alpha),
            self.w.lerp(b.w, alpha),
        )
        .normalize()
    }

    /// Same as [`Self::nlerp`] with an estimated normalization.
    #[inline]
    pub fn nlerp_est(&self, b: &Self, alpha: SimdFloat4) -> Self {
        Self::new(
            self.x.lerp(b.x, alpha),
            self.y.lerp(b.y, alpha),
            self.z.lerp(b.z, alpha),
            self.w.lerp(b.w, alpha),
        )
        .normalize_est()
    }
}

impl Mul for SoaQuaternion {
    type Output = Self;

    /// Lane-wise Hamilton product.
    #[inline]
    fn mul(self, b: Self) -> Self {
        let a = self;
        Self::new(
            a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
            a.w * b.y + a.y * b.w + a.z * b.x - a.x * b.z,
            a.w * b.z + a.z * b.w + a.x * b.y - a.y * b.x,
            a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
        )
    }
}

impl Mul<SimdFloat4> for SoaQuaternion {
    type Output = Self;

    #[inline]
    fn mul(self, s: SimdFloat4) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s, self.w * s)
    }
}

impl Add for SoaQuaternion {
    type Output = Self;

    #[inline]
    fn add(self, b: Self) -> Self {
        Self::new(self.x + b.x, self.y + b.y, self.z + b.z, self.w + b.w)
    }
}

impl Neg for SoaQuaternion {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}
