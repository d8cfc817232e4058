//! Four-wide floating point vector.
//!
//! `SimdFloat4` is the storage and computation unit of the whole animation
//! pipeline. Lanes are named `x`, `y`, `z` and `w`. Operations suffixed with
//! `_x` only compute the first lane and leave the others unchanged. Reductions
//! (`dot`, `length`, ...) splat their result into every lane.
//!
//! Loads and stores come in two flavours: the plain `*_ptr` functions require
//! a 16-byte aligned source, the `*_ptr_u` functions accept any `f32` slice.

use std::ops::{Add, AddAssign, Div, DivAssign, Index, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::simd_int4::SimdInt4;
use crate::{NORMALIZATION_TOLERANCE_EST_SQ, NORMALIZATION_TOLERANCE_SQ};

/// A 16-byte aligned vector of four `f32` lanes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[repr(C, align(16))]
pub struct SimdFloat4(pub [f32; 4]);

#[inline]
fn is_aligned16(src: *const f32) -> bool {
    src.addr() % 16 == 0
}

#[inline]
fn mask_of(b: bool) -> i32 {
    if b { -1 } else { 0 }
}

macro_rules! lanewise {
    ($a:expr, $b:expr, |$x:ident, $y:ident| $body:expr) => {{
        let a = $a.0;
        let b = $b.0;
        SimdFloat4([
            {
                let ($x, $y) = (a[0], b[0]);
                $body
            },
            {
                let ($x, $y) = (a[1], b[1]);
                $body
            },
            {
                let ($x, $y) = (a[2], b[2]);
                $body
            },
            {
                let ($x, $y) = (a[3], b[3]);
                $body
            },
        ])
    }};
}

impl SimdFloat4 {
    /// All lanes set to 0.
    pub const ZERO: Self = Self([0.0; 4]);
    /// All lanes set to 1.
    pub const ONE: Self = Self([1.0; 4]);
    /// Unit x axis `(1, 0, 0, 0)`.
    pub const X_AXIS: Self = Self([1.0, 0.0, 0.0, 0.0]);
    /// Unit y axis `(0, 1, 0, 0)`.
    pub const Y_AXIS: Self = Self([0.0, 1.0, 0.0, 0.0]);
    /// Unit z axis `(0, 0, 1, 0)`.
    pub const Z_AXIS: Self = Self([0.0, 0.0, 1.0, 0.0]);
    /// Unit w axis `(0, 0, 0, 1)`, also the identity quaternion.
    pub const W_AXIS: Self = Self([0.0, 0.0, 0.0, 1.0]);

    /// Builds a vector from four lanes.
    #[inline]
    pub const fn load(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self([x, y, z, w])
    }

    /// Builds `(x, 0, 0, 0)`.
    #[inline]
    pub const fn load_x(x: f32) -> Self {
        Self([x, 0.0, 0.0, 0.0])
    }

    /// Splats `x` into every lane.
    #[inline]
    pub const fn load1(x: f32) -> Self {
        Self([x; 4])
    }

    /// Loads four lanes from a 16-byte aligned slice.
    #[inline]
    pub fn load_ptr(src: &[f32]) -> Self {
        debug_assert!(is_aligned16(src.as_ptr()), "Invalid alignment");
        Self([src[0], src[1], src[2], src[3]])
    }

    /// Loads `(src[0], 0, 0, 0)` from a 16-byte aligned slice.
    #[inline]
    pub fn load_x_ptr(src: &[f32]) -> Self {
        debug_assert!(is_aligned16(src.as_ptr()), "Invalid alignment");
        Self::load_x(src[0])
    }

    /// Splats `src[0]` from a 16-byte aligned slice.
    #[inline]
    pub fn load1_ptr(src: &[f32]) -> Self {
        debug_assert!(is_aligned16(src.as_ptr()), "Invalid alignment");
        Self::load1(src[0])
    }

    /// Loads `(src[0], src[1], 0, 0)` from a 16-byte aligned slice.
    #[inline]
    pub fn load2_ptr(src: &[f32]) -> Self {
        debug_assert!(is_aligned16(src.as_ptr()), "Invalid alignment");
        Self([src[0], src[1], 0.0, 0.0])
    }

    /// Loads `(src[0], src[1], src[2], 0)` from a 16-byte aligned slice.
    #[inline]
    pub fn load3_ptr(src: &[f32]) -> Self {
        debug_assert!(is_aligned16(src.as_ptr()), "Invalid alignment");
        Self([src[0], src[1], src[2], 0.0])
    }

    /// Loads four lanes from any slice.
    #[inline]
    pub fn load_ptr_u(src: &[f32]) -> Self {
        Self([src[0], src[1], src[2], src[3]])
    }

    /// Loads `(src[0], 0, 0, 0)` from any slice.
    #[inline]
    pub fn load_x_ptr_u(src: &[f32]) -> Self {
        Self::load_x(src[0])
    }

    /// Splats `src[0]` from any slice.
    #[inline]
    pub fn load1_ptr_u(src: &[f32]) -> Self {
        Self::load1(src[0])
    }

    /// Loads `(src[0], src[1], 0, 0)` from any slice.
    #[inline]
    pub fn load2_ptr_u(src: &[f32]) -> Self {
        Self([src[0], src[1], 0.0, 0.0])
    }

    /// Loads `(src[0], src[1], src[2], 0)` from any slice.
    #[inline]
    pub fn load3_ptr_u(src: &[f32]) -> Self {
        Self([src[0], src[1], src[2], 0.0])
    }

    /// Stores four lanes to a 16-byte aligned slice.
    #[inline]
    pub fn store_ptr(self, dst: &mut [f32]) {
        debug_assert!(is_aligned16(dst.as_ptr()), "Invalid alignment");
        dst[..4].copy_from_slice(&self.0);
    }

    /// Stores the x lane to a 16-byte aligned slice.
    #[inline]
    pub fn store1_ptr(self, dst: &mut [f32]) {
        debug_assert!(is_aligned16(dst.as_ptr()), "Invalid alignment");
        dst[0] = self.0[0];
    }

    /// Stores x and y to a 16-byte aligned slice.
    #[inline]
    pub fn store2_ptr(self, dst: &mut [f32]) {
        debug_assert!(is_aligned16(dst.as_ptr()), "Invalid alignment");
        dst[..2].copy_from_slice(&self.0[..2]);
    }

    /// Stores x, y and z to a 16-byte aligned slice.
    #[inline]
    pub fn store3_ptr(self, dst: &mut [f32]) {
        debug_assert!(is_aligned16(dst.as_ptr()), "Invalid alignment");
        dst[..3].copy_from_slice(&self.0[..3]);
    }

    /// Stores four lanes to any slice.
    #[inline]
    pub fn store_ptr_u(self, dst: &mut [f32]) {
        dst[..4].copy_from_slice(&self.0);
    }

    /// Stores the x lane to any slice.
    #[inline]
    pub fn store1_ptr_u(self, dst: &mut [f32]) {
        dst[0] = self.0[0];
    }

    /// Stores x and y to any slice.
    #[inline]
    pub fn store2_ptr_u(self, dst: &mut [f32]) {
        dst[..2].copy_from_slice(&self.0[..2]);
    }

    /// Stores x, y and z to any slice.
    #[inline]
    pub fn store3_ptr_u(self, dst: &mut [f32]) {
        dst[..3].copy_from_slice(&self.0[..3]);
    }

    /// Converts integer lanes to floats.
    #[inline]
    pub fn from_int(v: SimdInt4) -> Self {
        Self(v.0.map(|i| i as f32))
    }

    /// Reinterprets the bits of an integer vector.
    #[inline]
    pub fn from_bits(v: SimdInt4) -> Self {
        Self(v.0.map(|i| f32::from_bits(i as u32)))
    }

    /// Reinterprets the bits of this vector as integers.
    #[inline]
    pub fn to_bits(self) -> SimdInt4 {
        SimdInt4(self.0.map(|f| f.to_bits() as i32))
    }

    #[inline]
    pub fn get_x(self) -> f32 {
        self.0[0]
    }

    #[inline]
    pub fn get_y(self) -> f32 {
        self.0[1]
    }

    #[inline]
    pub fn get_z(self) -> f32 {
        self.0[2]
    }

    #[inline]
    pub fn get_w(self) -> f32 {
        self.0[3]
    }

    #[inline]
    pub fn set_x(mut self, f: f32) -> Self {
        self.0[0] = f;
        self
    }

    #[inline]
    pub fn set_y(mut self, f: f32) -> Self {
        self.0[1] = f;
        self
    }

    #[inline]
    pub fn set_z(mut self, f: f32) -> Self {
        self.0[2] = f;
        self
    }

    #[inline]
    pub fn set_w(mut self, f: f32) -> Self {
        self.0[3] = f;
        self
    }

    /// Replaces lane `i`. Panics if `i > 3`.
    #[inline]
    pub fn set_i(mut self, i: usize, f: f32) -> Self {
        self.0[i] = f;
        self
    }

    #[inline]
    pub fn splat_x(self) -> Self {
        Self::load1(self.0[0])
    }

    #[inline]
    pub fn splat_y(self) -> Self {
        Self::load1(self.0[1])
    }

    #[inline]
    pub fn splat_z(self) -> Self {
        Self::load1(self.0[2])
    }

    #[inline]
    pub fn splat_w(self) -> Self {
        Self::load1(self.0[3])
    }

    /// Reorders lanes, `X..W` being source lane indices.
    #[inline]
    pub fn swizzle<const X: usize, const Y: usize, const Z: usize, const W: usize>(self) -> Self {
        Self([self.0[X], self.0[Y], self.0[Z], self.0[W]])
    }

    /// `self * b + c`.
    #[inline]
    pub fn madd(self, b: Self, c: Self) -> Self {
        lanewise!(self * b, c, |m, a| m + a)
    }

    /// `self * b - c`.
    #[inline]
    pub fn msub(self, b: Self, c: Self) -> Self {
        lanewise!(self * b, c, |m, a| m - a)
    }

    /// `c - self * b`.
    #[inline]
    pub fn nmadd(self, b: Self, c: Self) -> Self {
        lanewise!(self * b, c, |m, a| a - m)
    }

    /// Divides the x lane only.
    #[inline]
    pub fn div_x(self, b: Self) -> Self {
        self.set_x(self.0[0] / b.0[0])
    }

    /// Stores `x + y` in x.
    #[inline]
    pub fn hadd2(self) -> Self {
        self.set_x(self.0[0] + self.0[1])
    }

    /// Stores `x + y + z` in x.
    #[inline]
    pub fn hadd3(self) -> Self {
        self.set_x(self.0[0] + self.0[1] + self.0[2])
    }

    /// Stores `x + y + z + w` in x.
    #[inline]
    pub fn hadd4(self) -> Self {
        self.set_x(self.0[0] + self.0[1] + self.0[2] + self.0[3])
    }

    #[inline]
    pub fn dot2(self, b: Self) -> Self {
        Self::load1(self.0[0] * b.0[0] + self.0[1] * b.0[1])
    }

    #[inline]
    pub fn dot3(self, b: Self) -> Self {
        Self::load1(self.0[0] * b.0[0] + self.0[1] * b.0[1] + self.0[2] * b.0[2])
    }

    #[inline]
    pub fn dot4(self, b: Self) -> Self {
        Self::load1(
            self.0[0] * b.0[0] + self.0[1] * b.0[1] + self.0[2] * b.0[2] + self.0[3] * b.0[3],
        )
    }

    /// Cross product of the xyz lanes, w is set to 0.
    #[inline]
    pub fn cross3(self, b: Self) -> Self {
        let [ax, ay, az, _] = self.0;
        let [bx, by, bz, _] = b.0;
        Self([ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx, 0.0])
    }

    #[inline]
    pub fn length2(self) -> Self {
        self.length2_sqr().sqrt()
    }

    #[inline]
    pub fn length3(self) -> Self {
        self.length3_sqr().sqrt()
    }

    #[inline]
    pub fn length4(self) -> Self {
        self.length4_sqr().sqrt()
    }

    #[inline]
    pub fn length2_sqr(self) -> Self {
        self.dot2(self)
    }

    #[inline]
    pub fn length3_sqr(self) -> Self {
        self.dot3(self)
    }

    #[inline]
    pub fn length4_sqr(self) -> Self {
        self.dot4(self)
    }

    #[inline]
    pub fn rcp_est(self) -> Self {
        Self(self.0.map(f32::recip))
    }

    /// Reciprocal estimate refined by one Newton-Raphson step.
    #[inline]
    pub fn rcp_est_nr(self) -> Self {
        let est = self.rcp_est();
        est * (Self::load1(2.0) - self * est)
    }

    #[inline]
    pub fn rcp_est_x(self) -> Self {
        self.set_x(self.0[0].recip())
    }

    #[inline]
    pub fn sqrt(self) -> Self {
        Self(self.0.map(f32::sqrt))
    }

    #[inline]
    pub fn sqrt_x(self) -> Self {
        self.set_x(self.0[0].sqrt())
    }

    #[inline]
    pub fn rsqrt_est(self) -> Self {
        Self(self.0.map(|f| f.sqrt().recip()))
    }

    #[inline]
    pub fn rsqrt_est_x(self) -> Self {
        self.set_x(self.0[0].sqrt().recip())
    }

    #[inline]
    pub fn abs(self) -> Self {
        Self(self.0.map(f32::abs))
    }

    /// Sign bit of every lane as a mask (`0x80000000` when negative).
    #[inline]
    pub fn sign(self) -> SimdInt4 {
        self.to_bits() & SimdInt4::MASK_SIGN
    }

    #[inline]
    pub fn min(self, b: Self) -> Self {
        lanewise!(self, b, |x, y| if x < y { x } else { y })
    }

    #[inline]
    pub fn max(self, b: Self) -> Self {
        lanewise!(self, b, |x, y| if x > y { x } else { y })
    }

    #[inline]
    pub fn min0(self) -> Self {
        self.min(Self::ZERO)
    }

    #[inline]
    pub fn max0(self) -> Self {
        self.max(Self::ZERO)
    }

    /// Clamps `v` between `self` and `b`.
    #[inline]
    pub fn clamp(self, v: Self, b: Self) -> Self {
        v.max(self).min(b)
    }

    /// Linear interpolation `self + (b - self) * alpha`.
    #[inline]
    pub fn lerp(self, b: Self, alpha: Self) -> Self {
        (b - self).madd(alpha, self)
    }

    #[inline]
    pub fn cos(self) -> Self {
        Self(self.0.map(f32::cos))
    }

    #[inline]
    pub fn cos_x(self) -> Self {
        self.set_x(self.0[0].cos())
    }

    #[inline]
    pub fn sin(self) -> Self {
        Self(self.0.map(f32::sin))
    }

    #[inline]
    pub fn sin_x(self) -> Self {
        self.set_x(self.0[0].sin())
    }

    #[inline]
    pub fn tan(self) -> Self {
        Self(self.0.map(f32::tan))
    }

    #[inline]
    pub fn tan_x(self) -> Self {
        self.set_x(self.0[0].tan())
    }

    #[inline]
    pub fn acos(self) -> Self {
        Self(self.0.map(f32::acos))
    }

    #[inline]
    pub fn acos_x(self) -> Self {
        self.set_x(self.0[0].acos())
    }

    #[inline]
    pub fn asin(self) -> Self {
        Self(self.0.map(f32::asin))
    }

    #[inline]
    pub fn asin_x(self) -> Self {
        self.set_x(self.0[0].asin())
    }

    #[inline]
    pub fn atan(self) -> Self {
        Self(self.0.map(f32::atan))
    }

    #[inline]
    pub fn atan_x(self) -> Self {
        self.set_x(self.0[0].atan())
    }

    /// Normalizes the xy lanes, z and w are kept.
    ///
    /// The vector must not be of zero length.
    #[inline]
    pub fn normalize2(self) -> Self {
        let sq = self.length2_sqr().get_x();
        debug_assert!(sq != 0.0, "vector is not normalizable");
        let inv = sq.sqrt().recip();
        Self([self.0[0] * inv, self.0[1] * inv, self.0[2], self.0[3]])
    }

    /// Normalizes the xyz lanes, w is kept.
    ///
    /// The vector must not be of zero length.
    #[inline]
    pub fn normalize3(self) -> Self {
        let sq = self.length3_sqr().get_x();
        debug_assert!(sq != 0.0, "vector is not normalizable");
        let inv = sq.sqrt().recip();
        Self([self.0[0] * inv, self.0[1] * inv, self.0[2] * inv, self.0[3]])
    }

    /// Normalizes all four lanes.
    ///
    /// The vector must not be of zero length.
    #[inline]
    pub fn normalize4(self) -> Self {
        let sq = self.length4_sqr().get_x();
        debug_assert!(sq != 0.0, "vector is not normalizable");
        self * sq.sqrt().recip()
    }

    #[inline]
    pub fn normalize_est2(self) -> Self {
        self.normalize2()
    }

    #[inline]
    pub fn normalize_est3(self) -> Self {
        self.normalize3()
    }

    #[inline]
    pub fn normalize_est4(self) -> Self {
        self.normalize4()
    }

    /// Normalizes xy, or returns `safe` when the length is 0.
    #[inline]
    pub fn normalize_safe2(self, safe: Self) -> Self {
        debug_assert!(safe.is_normalized2().are_all_true1(), "safe is not normalized");
        if self.length2_sqr().get_x() == 0.0 {
            safe
        } else {
            self.normalize2()
        }
    }

    /// Normalizes xyz, or returns `safe` when the length is 0.
    #[inline]
    pub fn normalize_safe3(self, safe: Self) -> Self {
        debug_assert!(safe.is_normalized3().are_all_true1(), "safe is not normalized");
        if self.length3_sqr().get_x() == 0.0 {
            safe
        } else {
            self.normalize3()
        }
    }

    /// Normalizes all lanes, or returns `safe` when the length is 0.
    #[inline]
    pub fn normalize_safe4(self, safe: Self) -> Self {
        debug_assert!(safe.is_normalized4().are_all_true1(), "safe is not normalized");
        if self.length4_sqr().get_x() == 0.0 {
            safe
        } else {
            self.normalize4()
        }
    }

    #[inline]
    pub fn normalize_safe_est2(self, safe: Self) -> Self {
        debug_assert!(safe.is_normalized_est2().are_all_true1(), "safe is not normalized");
        self.normalize_safe2(safe)
    }

    #[inline]
    pub fn normalize_safe_est3(self, safe: Self) -> Self {
        debug_assert!(safe.is_normalized_est3().are_all_true1(), "safe is not normalized");
        self.normalize_safe3(safe)
    }

    #[inline]
    pub fn normalize_safe_est4(self, safe: Self) -> Self {
        debug_assert!(safe.is_normalized_est4().are_all_true1(), "safe is not normalized");
        self.normalize_safe4(safe)
    }

    #[inline]
    pub fn is_normalized2(self) -> SimdInt4 {
        within_tolerance(self.length2_sqr().get_x(), NORMALIZATION_TOLERANCE_SQ)
    }

    #[inline]
    pub fn is_normalized3(self) -> SimdInt4 {
        within_tolerance(self.length3_sqr().get_x(), NORMALIZATION_TOLERANCE_SQ)
    }

    #[inline]
    pub fn is_normalized4(self) -> SimdInt4 {
        within_tolerance(self.length4_sqr().get_x(), NORMALIZATION_TOLERANCE_SQ)
    }

    #[inline]
    pub fn is_normalized_est2(self) -> SimdInt4 {
        within_tolerance(self.length2_sqr().get_x(), NORMALIZATION_TOLERANCE_EST_SQ)
    }

    #[inline]
    pub fn is_normalized_est3(self) -> SimdInt4 {
        within_tolerance(self.length3_sqr().get_x(), NORMALIZATION_TOLERANCE_EST_SQ)
    }

    #[inline]
    pub fn is_normalized_est4(self) -> SimdInt4 {
        within_tolerance(self.length4_sqr().get_x(), NORMALIZATION_TOLERANCE_EST_SQ)
    }

    #[inline]
    pub fn cmp_eq(self, b: Self) -> SimdInt4 {
        self.compare(b, |x, y| x == y)
    }

    #[inline]
    pub fn cmp_ne(self, b: Self) -> SimdInt4 {
        self.compare(b, |x, y| x != y)
    }

    #[inline]
    pub fn cmp_lt(self, b: Self) -> SimdInt4 {
        self.compare(b, |x, y| x < y)
    }

    #[inline]
    pub fn cmp_le(self, b: Self) -> SimdInt4 {
        self.compare(b, |x, y| x <= y)
    }

    #[inline]
    pub fn cmp_gt(self, b: Self) -> SimdInt4 {
        self.compare(b, |x, y| x > y)
    }

    #[inline]
    pub fn cmp_ge(self, b: Self) -> SimdInt4 {
        self.compare(b, |x, y| x >= y)
    }

    #[inline]
    fn compare(self, b: Self, f: impl Fn(f32, f32) -> bool) -> SimdInt4 {
        SimdInt4([
            mask_of(f(self.0[0], b.0[0])),
            mask_of(f(self.0[1], b.0[1])),
            mask_of(f(self.0[2], b.0[2])),
            mask_of(f(self.0[3], b.0[3])),
        ])
    }

    /// Bitwise select: takes bits of `a` where `mask` is set, `b` elsewhere.
    #[inline]
    pub fn select(mask: SimdInt4, a: Self, b: Self) -> Self {
        Self::from_bits((a.to_bits() & mask) | (b.to_bits() & !mask))
    }

    #[inline]
    pub fn and(self, mask: SimdInt4) -> Self {
        Self::from_bits(self.to_bits() & mask)
    }

    #[inline]
    pub fn and_not(self, mask: SimdInt4) -> Self {
        Self::from_bits(self.to_bits() & !mask)
    }

    #[inline]
    pub fn or(self, mask: SimdInt4) -> Self {
        Self::from_bits(self.to_bits() | mask)
    }

    #[inline]
    pub fn xor(self, mask: SimdInt4) -> Self {
        Self::from_bits(self.to_bits() ^ mask)
    }

    /// Transposes four row vectors into four column vectors.
    #[inline]
    pub fn transpose4x4(v: [Self; 4]) -> [Self; 4] {
        let m = v.map(|r| r.0);
        [
            Self([m[0][0], m[1][0], m[2][0], m[3][0]]),
            Self([m[0][1], m[1][1], m[2][1], m[3][1]]),
            Self([m[0][2], m[1][2], m[2][2], m[3][2]]),
            Self([m[0][3], m[1][3], m[2][3], m[3][3]]),
        ]
    }
}

#[inline]
fn within_tolerance(len_sq: f32, tolerance: f32) -> SimdInt4 {
    SimdInt4::load1(mask_of((len_sq - 1.0).abs() < tolerance))
}

impl Index<usize> for SimdFloat4 {
    type Output = f32;

    #[inline]
    fn index(&self, index: usize) -> &f32 {
        &self.0[index]
    }
}

macro_rules! impl_binary_op {
    ($trait:ident, $fn:ident, $assign_trait:ident, $assign_fn:ident, $op:tt) => {
        impl $trait for SimdFloat4 {
            type Output = Self;

            #[inline]
            fn $fn(self, rhs: Self) -> Self {
                lanewise!(self, rhs, |a, b| a $op b)
            }
        }

        impl $trait<f32> for SimdFloat4 {
            type Output = Self;

            #[inline]
            fn $fn(self, rhs: f32) -> Self {
                Self(self.0.map(|a| a $op rhs))
            }
        }

        impl $assign_trait for SimdFloat4 {
            #[inline]
            fn $assign_fn(&mut self, rhs: Self) {
                *self = *self $op rhs;
            }
        }
    };
}

impl_binary_op!(Add, add, AddAssign, add_assign, +);
impl_binary_op!(Sub, sub, SubAssign, sub_assign, -);
impl_binary_op!(Mul, mul, MulAssign, mul_assign, *);
impl_binary_op!(Div, div, DivAssign, div_assign, /);

impl Neg for SimdFloat4 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self(self.0.map(|a| -a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::assert_simd_near;
    use test_case::test_case;

    #[repr(C, align(16))]
    struct Aligned([f32; 8]);

    const ALIGNED: Aligned = Aligned([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);

    #[test]
    fn test_constants() {
        assert_eq!(SimdFloat4::ZERO.0, [0.0; 4]);
        assert_eq!(SimdFloat4::ONE.0, [1.0; 4]);
        assert_eq!(SimdFloat4::X_AXIS.0, [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(SimdFloat4::W_AXIS.0, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_aligned_loads() {
        let buf = ALIGNED;
        assert_eq!(SimdFloat4::load_ptr(&buf.0).0, [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(SimdFloat4::load_x_ptr(&buf.0).0, [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(SimdFloat4::load1_ptr(&buf.0).0, [1.0; 4]);
        assert_eq!(SimdFloat4::load2_ptr(&buf.0).0, [1.0, 2.0, 0.0, 0.0]);
        assert_eq!(SimdFloat4::load3_ptr(&buf.0).0, [1.0, 2.0, 3.0, 0.0]);
        assert_eq!(SimdFloat4::load_ptr(&buf.0[4..]).0, [5.0, 6.0, 7.0, 8.0]);
    }

    #[test]
    fn test_unaligned_loads() {
        let buf = ALIGNED;
        assert_eq!(SimdFloat4::load_ptr_u(&buf.0[1..]).0, [2.0, 3.0, 4.0, 5.0]);
        assert_eq!(SimdFloat4::load_x_ptr_u(&buf.0[1..]).0, [2.0, 0.0, 0.0, 0.0]);
        assert_eq!(SimdFloat4::load1_ptr_u(&buf.0[1..]).0, [2.0; 4]);
        assert_eq!(SimdFloat4::load2_ptr_u(&buf.0[1..]).0, [2.0, 3.0, 0.0, 0.0]);
        assert_eq!(SimdFloat4::load3_ptr_u(&buf.0[1..]).0, [2.0, 3.0, 4.0, 0.0]);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "alignment")]
    fn test_misaligned_load_asserts() {
        let buf = ALIGNED;
        let _ = SimdFloat4::load_ptr(&buf.0[1..]);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "alignment")]
    fn test_misaligned_store_asserts() {
        let mut buf = ALIGNED;
        SimdFloat4::ONE.store3_ptr(&mut buf.0[2..]);
    }

    #[test]
    fn test_stores() {
        let v = SimdFloat4::load(-1.0, 1.0, 2.0, 3.0);
        let mut buf = Aligned([0.0; 8]);
        v.store_ptr(&mut buf.0);
        assert_eq!(&buf.0[..4], &[-1.0, 1.0, 2.0, 3.0]);

        let mut buf = Aligned([0.0; 8]);
        v.store1_ptr(&mut buf.0);
        assert_eq!(&buf.0[..4], &[-1.0, 0.0, 0.0, 0.0]);

        let mut buf = Aligned([0.0; 8]);
        v.store2_ptr(&mut buf.0[4..]);
        assert_eq!(&buf.0[4..], &[-1.0, 1.0, 0.0, 0.0]);

        let mut buf = Aligned([0.0; 8]);
        v.store3_ptr_u(&mut buf.0[1..]);
        assert_eq!(&buf.0[..5], &[0.0, -1.0, 1.0, 2.0, 0.0]);

        let mut buf = Aligned([0.0; 8]);
        v.store_ptr_u(&mut buf.0[3..]);
        assert_eq!(&buf.0[3..7], &[-1.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_lane_access() {
        let v = SimdFloat4::load(1.0, 2.0, 3.0, 4.0);
        assert_eq!(v.get_x(), 1.0);
        assert_eq!(v.get_y(), 2.0);
        assert_eq!(v.get_z(), 3.0);
        assert_eq!(v.get_w(), 4.0);
        assert_eq!(v.set_y(-2.0).0, [1.0, -2.0, 3.0, 4.0]);
        assert_eq!(v.set_i(3, 9.0).0, [1.0, 2.0, 3.0, 9.0]);
        assert_eq!(v.splat_z().0, [3.0; 4]);
        assert_eq!(v.swizzle::<3, 2, 1, 0>().0, [4.0, 3.0, 2.0, 1.0]);
        assert_eq!(v[1], 2.0);
    }

    #[test]
    fn test_arithmetic() {
        let a = SimdFloat4::load(0.5, 1.0, 2.0, 3.0);
        let b = SimdFloat4::load(4.0, 5.0, -6.0, 7.0);
        let c = SimdFloat4::load(-8.0, 9.0, 10.0, 11.0);

        assert_eq!((a + b).0, [4.5, 6.0, -4.0, 10.0]);
        assert_eq!((a - b).0, [-3.5, -4.0, 8.0, -4.0]);
        assert_eq!((a * b).0, [2.0, 5.0, -12.0, 21.0]);
        assert_eq!((a * 2.0).0, [1.0, 2.0, 4.0, 6.0]);
        assert_eq!((-a).0, [-0.5, -1.0, -2.0, -3.0]);
        assert_eq!(a.madd(b, c).0, [-6.0, 14.0, -2.0, 32.0]);
        assert_eq!(a.msub(b, c).0, [10.0, -4.0, -22.0, 10.0]);
        assert_eq!(a.nmadd(b, c).0, [-10.0, 4.0, 22.0, -10.0]);
        assert_simd_near(a / b, [0.125, 0.2, -0.333_333_34, 0.428_571_43], 1e-6);
        assert_simd_near(a.div_x(b), [0.125, 1.0, 2.0, 3.0], 1e-6);
    }

    #[test]
    fn test_horizontal_and_dot() {
        let a = SimdFloat4::load(0.5, 1.0, 2.0, 3.0);
        let b = SimdFloat4::load(4.0, 5.0, -6.0, 7.0);
        assert_eq!(a.hadd2().get_x(), 1.5);
        assert_eq!(a.hadd3().get_x(), 3.5);
        assert_eq!(a.hadd4().get_x(), 6.5);
        assert_eq!(a.dot2(b).get_x(), 7.0);
        assert_eq!(a.dot3(b).get_x(), -5.0);
        assert_eq!(a.dot4(b).get_x(), 16.0);
        assert_eq!(a.dot3(b).get_w(), -5.0);
    }

    #[test]
    fn test_cross3() {
        let a = SimdFloat4::load(1.0, -2.0, 3.0, 46.0);
        let b = SimdFloat4::load(4.0, 5.0, 6.0, 27.0);
        assert_eq!(a.cross3(b).0, [-27.0, 6.0, 13.0, 0.0]);
    }

    #[test]
    fn test_length() {
        let v = SimdFloat4::load(1.0, 2.0, 4.0, 8.0);
        assert!((v.length2().get_x() - 2.236_068).abs() < 1e-6);
        assert!((v.length3().get_x() - 4.582_576).abs() < 1e-6);
        assert!((v.length4().get_x() - 9.219_544).abs() < 1e-5);
        assert_eq!(v.length2_sqr().get_x(), 5.0);
        assert_eq!(v.length3_sqr().get_x(), 21.0);
        assert_eq!(v.length4_sqr().get_x(), 85.0);
    }

    #[test]
    fn test_normalize() {
        let v = SimdFloat4::load(1.0, 2.0, 4.0, 8.0);
        assert_simd_near(v.normalize2(), [0.447_213_6, 0.894_427_2, 4.0, 8.0], 1e-6);
        assert_simd_near(v.normalize3(), [0.218_217_9, 0.436_435_8, 0.872_871_6, 8.0], 1e-6);
        assert_simd_near(
            v.normalize4(),
            [0.108_465_2, 0.216_930_4, 0.433_860_9, 0.867_721_86],
            1e-6,
        );
        assert_simd_near(v.normalize_est3(), [0.218_217_9, 0.436_435_8, 0.872_871_6, 8.0], 2e-3);

        assert!(!v.is_normalized4().are_all_true1());
        assert!(v.normalize4().is_normalized4().are_all_true1());
        assert!(v.normalize3().is_normalized3().are_all_true1());
        assert!(v.normalize2().is_normalized2().are_all_true1());
        assert!(v.normalize_est4().is_normalized_est4().are_all_true1());
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "not normalizable")]
    fn test_normalize_zero_asserts() {
        let _ = SimdFloat4::ZERO.normalize3();
    }

    #[test]
    fn test_normalize_safe() {
        let safe = SimdFloat4::X_AXIS;
        assert_eq!(SimdFloat4::ZERO.normalize_safe4(safe), safe);
        assert_eq!(SimdFloat4::ZERO.normalize_safe3(safe), safe);
        assert_eq!(SimdFloat4::ZERO.normalize_safe2(safe), safe);
        assert_eq!(SimdFloat4::ZERO.normalize_safe_est3(safe), safe);
        let v = SimdFloat4::load(1.0, 2.0, 4.0, 8.0);
        assert_simd_near(
            v.normalize_safe4(safe),
            [0.108_465_2, 0.216_930_4, 0.433_860_9, 0.867_721_86],
            1e-6,
        );
    }

    #[test]
    fn test_estimates() {
        let v = SimdFloat4::load(1.0, 2.0, 4.0, 8.0);
        assert_simd_near(v.rcp_est(), [1.0, 0.5, 0.25, 0.125], 1e-3);
        assert_simd_near(v.rcp_est_nr(), [1.0, 0.5, 0.25, 0.125], 1e-6);
        assert_simd_near(v.rcp_est_x(), [1.0, 2.0, 4.0, 8.0], 1e-3);
        assert_simd_near(v.sqrt(), [1.0, 1.414_213_5, 2.0, 2.828_427], 1e-6);
        assert_simd_near(v.sqrt_x(), [1.0, 2.0, 4.0, 8.0], 1e-6);
        assert_simd_near(v.rsqrt_est(), [1.0, 0.707_106_8, 0.5, 0.353_553_4], 1e-3);
    }

    #[test]
    fn test_min_max_clamp_lerp() {
        let a = SimdFloat4::load(0.5, 1.0, 2.0, 3.0);
        let b = SimdFloat4::load(4.0, -5.0, -6.0, 7.0);
        assert_eq!(a.min(b).0, [0.5, -5.0, -6.0, 3.0]);
        assert_eq!(a.max(b).0, [4.0, 1.0, 2.0, 7.0]);
        assert_eq!(b.min0().0, [0.0, -5.0, -6.0, 0.0]);
        assert_eq!(b.max0().0, [4.0, 0.0, 0.0, 7.0]);
        let lo = SimdFloat4::load(-12.0, 2.0, 9.0, 3.0);
        let hi = SimdFloat4::load(12.0, 46.0, 12.0, 9.0);
        assert_eq!(lo.clamp(b, hi).0, [4.0, 2.0, 9.0, 7.0]);
        assert_eq!(b.abs().0, [4.0, 5.0, 6.0, 7.0]);

        let alpha = SimdFloat4::load(0.0, 1.0, 0.5, 2.0);
        assert_eq!(a.lerp(b, alpha).0, [0.5, -5.0, -2.0, 11.0]);
    }

    #[test_case(SimdFloat4::cmp_eq, [-1, 0, 0, -1] ; "equal")]
    #[test_case(SimdFloat4::cmp_ne, [0, -1, -1, 0] ; "not equal")]
    #[test_case(SimdFloat4::cmp_lt, [0, -1, 0, 0] ; "less than")]
    #[test_case(SimdFloat4::cmp_le, [-1, -1, 0, -1] ; "less or equal")]
    #[test_case(SimdFloat4::cmp_gt, [0, 0, -1, 0] ; "greater than")]
    #[test_case(SimdFloat4::cmp_ge, [-1, 0, -1, -1] ; "greater or equal")]
    fn test_comparisons(cmp: fn(SimdFloat4, SimdFloat4) -> SimdInt4, expected: [i32; 4]) {
        let a = SimdFloat4::load(0.5, 1.0, 2.0, 3.0);
        let b = SimdFloat4::load(0.5, 5.0, -6.0, 3.0);
        assert_eq!(cmp(a, b).0, expected);
    }

    #[test]
    fn test_logical() {
        let a = SimdFloat4::load(0.0, 1.0, 2.0, 3.0);
        let b = SimdFloat4::load(1.0, -1.0, -3.0, -4.0);
        let mask = SimdInt4::load(-1, 0, i32::MIN, 0x7fff_ffff);

        assert_eq!(SimdFloat4::select(mask, a, b).0, [0.0, -1.0, 3.0, -3.0]);
        assert_eq!(b.and(mask).0, [1.0, 0.0, -0.0, 4.0]);
        assert_eq!(b.and_not(SimdInt4::MASK_SIGN).0, [1.0, 1.0, 3.0, 4.0]);
        assert_eq!(a.or(SimdInt4::MASK_SIGN).0, [-0.0, -1.0, -2.0, -3.0]);
        assert_eq!(b.xor(SimdInt4::MASK_SIGN).0, [-1.0, 1.0, 3.0, 4.0]);
        assert_eq!(b.sign().0, [0, i32::MIN, i32::MIN, i32::MIN]);
    }

    #[test]
    fn test_trigonometry() {
        use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};
        let v = SimdFloat4::load(0.0, FRAC_PI_2, PI, FRAC_PI_4);
        assert_simd_near(v.cos(), [1.0, 0.0, -1.0, 0.707_106_8], 1e-6);
        assert_simd_near(v.sin(), [0.0, 1.0, 0.0, 0.707_106_8], 1e-6);
        assert_simd_near(v.cos_x(), [1.0, FRAC_PI_2, PI, FRAC_PI_4], 1e-6);
        assert!((v.tan().get_w() - 1.0).abs() < 1e-6);
        assert_simd_near(v.cos().acos(), [0.0, FRAC_PI_2, PI, FRAC_PI_4], 1e-3);
        assert_simd_near(v.sin().asin_x(), [0.0, 1.0, 0.0, 0.707_106_8], 1e-6);
        assert!((v.tan().atan().get_w() - FRAC_PI_4).abs() < 1e-6);
    }

    #[test]
    fn test_int_conversions() {
        let i = SimdInt4::load(0, 46, -93, 9);
        assert_eq!(SimdFloat4::from_int(i).0, [0.0, 46.0, -93.0, 9.0]);
        let bits = SimdFloat4::ONE.to_bits();
        assert_eq!(bits.0, [0x3f80_0000; 4]);
        assert_eq!(SimdFloat4::from_bits(bits), SimdFloat4::ONE);
    }

    #[test]
    fn test_transpose4x4() {
        let rows = [
            SimdFloat4::load(0.0, 1.0, 2.0, 3.0),
            SimdFloat4::load(4.0, 5.0, 6.0, 7.0),
            SimdFloat4::load(8.0, 9.0, 10.0, 11.0),
            SimdFloat4::load(12.0, 13.0, 14.0, 15.0),
        ];
        let cols = SimdFloat4::transpose4x4(rows);
        assert_eq!(cols[0].0, [0.0, 4.0, 8.0, 12.0]);
        assert_eq!(cols[3].0, [3.0, 7.0, 11.0, 15.0]);
        assert_eq!(SimdFloat4::transpose4x4(cols), rows);
    }
}
