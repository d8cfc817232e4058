//! Four-wide integer vector, mostly used as a lane mask.
//!
//! A lane is "true" when any of its bits is set. Comparison functions of
//! [`SimdFloat4`](crate::SimdFloat4) produce all-ones (`-1`) or all-zeros
//! lanes.

use std::ops::{Add, BitAnd, BitOr, BitXor, Not, Sub};

use crate::SimdFloat4;

/// A 16-byte aligned vector of four `i32` lanes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(C, align(16))]
pub struct SimdInt4(pub [i32; 4]);

impl SimdInt4 {
    pub const ZERO: Self = Self([0; 4]);
    pub const ONE: Self = Self([1; 4]);
    pub const ALL_TRUE: Self = Self([-1; 4]);
    pub const ALL_FALSE: Self = Self([0; 4]);
    /// Only the float sign bit set in every lane.
    pub const MASK_SIGN: Self = Self([i32::MIN; 4]);
    /// Every bit but the float sign bit set in every lane.
    pub const MASK_NOT_SIGN: Self = Self([i32::MAX; 4]);
    pub const MASK_FFF0: Self = Self([-1, -1, -1, 0]);
    pub const MASK_F000: Self = Self([-1, 0, 0, 0]);
    pub const MASK_0F00: Self = Self([0, -1, 0, 0]);
    pub const MASK_00F0: Self = Self([0, 0, -1, 0]);
    pub const MASK_000F: Self = Self([0, 0, 0, -1]);

    #[inline]
    pub const fn load(x: i32, y: i32, z: i32, w: i32) -> Self {
        Self([x, y, z, w])
    }

    #[inline]
    pub const fn load1(x: i32) -> Self {
        Self([x; 4])
    }

    /// Builds a mask from four booleans.
    #[inline]
    pub const fn from_bool(x: bool, y: bool, z: bool, w: bool) -> Self {
        Self([-(x as i32), -(y as i32), -(z as i32), -(w as i32)])
    }

    /// Converts float lanes to integers, rounding to nearest.
    #[inline]
    pub fn from_float_round(v: SimdFloat4) -> Self {
        Self(v.0.map(|f| f.round() as i32))
    }

    /// Converts float lanes to integers, truncating toward zero.
    #[inline]
    pub fn from_float_trunc(v: SimdFloat4) -> Self {
        Self(v.0.map(|f| f as i32))
    }

    #[inline]
    pub fn get_x(self) -> i32 {
        self.0[0]
    }

    #[inline]
    pub fn get_y(self) -> i32 {
        self.0[1]
    }

    #[inline]
    pub fn get_z(self) -> i32 {
        self.0[2]
    }

    #[inline]
    pub fn get_w(self) -> i32 {
        self.0[3]
    }

    #[inline]
    pub fn set_x(mut self, i: i32) -> Self {
        self.0[0] = i;
        self
    }

    #[inline]
    pub fn set_w(mut self, i: i32) -> Self {
        self.0[3] = i;
        self
    }

    #[inline]
    pub fn are_all_true(self) -> bool {
        self.0.iter().all(|&i| i != 0)
    }

    #[inline]
    pub fn are_all_true1(self) -> bool {
        self.0[0] != 0
    }

    #[inline]
    pub fn are_all_true2(self) -> bool {
        self.0[..2].iter().all(|&i| i != 0)
    }

    #[inline]
    pub fn are_all_true3(self) -> bool {
        self.0[..3].iter().all(|&i| i != 0)
    }

    #[inline]
    pub fn are_all_false(self) -> bool {
        self.0.iter().all(|&i| i == 0)
    }

    #[inline]
    pub fn are_all_false1(self) -> bool {
        self.0[0] == 0
    }

    #[inline]
    pub fn are_all_false2(self) -> bool {
        self.0[..2].iter().all(|&i| i == 0)
    }

    #[inline]
    pub fn are_all_false3(self) -> bool {
        self.0[..3].iter().all(|&i| i == 0)
    }

    /// Packs the sign bit of every lane into the four low bits.
    #[inline]
    pub fn move_mask(self) -> u32 {
        self.0
            .iter()
            .enumerate()
            .fold(0, |acc, (i, &v)| acc | (((v as u32) >> 31) << i))
    }

    #[inline]
    pub fn min(self, b: Self) -> Self {
        Self([
            self.0[0].min(b.0[0]),
            self.0[1].min(b.0[1]),
            self.0[2].min(b.0[2]),
            self.0[3].min(b.0[3]),
        ])
    }

    #[inline]
    pub fn max(self, b: Self) -> Self {
        Self([
            self.0[0].max(b.0[0]),
            self.0[1].max(b.0[1]),
            self.0[2].max(b.0[2]),
            self.0[3].max(b.0[3]),
        ])
    }

    #[inline]
    pub fn abs(self) -> Self {
        Self(self.0.map(i32::wrapping_abs))
    }

    #[inline]
    pub fn shift_l(self, bits: u32) -> Self {
        Self(self.0.map(|i| i.wrapping_shl(bits)))
    }

    /// Arithmetic right shift.
    #[inline]
    pub fn shift_r(self, bits: u32) -> Self {
        Self(self.0.map(|i| i.wrapping_shr(bits)))
    }

    /// Logical right shift.
    #[inline]
    pub fn shift_ru(self, bits: u32) -> Self {
        Self(self.0.map(|i| (i as u32).wrapping_shr(bits) as i32))
    }

    #[inline]
    pub fn cmp_eq(self, b: Self) -> Self {
        Self::from_bool(
            self.0[0] == b.0[0],
            self.0[1] == b.0[1],
            self.0[2] == b.0[2],
            self.0[3] == b.0[3],
        )
    }

    #[inline]
    pub fn cmp_lt(self, b: Self) -> Self {
        Self::from_bool(
            self.0[0] < b.0[0],
            self.0[1] < b.0[1],
            self.0[2] < b.0[2],
            self.0[3] < b.0[3],
        )
    }
}

macro_rules! impl_int_op {
    ($trait:ident, $fn:ident, |$a:ident, $b:ident| $body:expr) => {
        impl $trait for SimdInt4 {
            type Output = Self;

            #[inline]
            fn $fn(self, rhs: Self) -> Self {
                let mut out = [0; 4];
                for (o, ($a, $b)) in out.iter_mut().zip(self.0.into_iter().zip(rhs.0)) {
                    *o = $body;
                }
                Self(out)
            }
        }
    };
}

impl_int_op!(Add, add, |a, b| a.wrapping_add(b));
impl_int_op!(Sub, sub, |a, b| a.wrapping_sub(b));
impl_int_op!(BitAnd, bitand, |a, b| a & b);
impl_int_op!(BitOr, bitor, |a, b| a | b);
impl_int_op!(BitXor, bitxor, |a, b| a ^ b);

impl Not for SimdInt4 {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        Self(self.0.map(|i| !i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bool_and_predicates() {
        let m = SimdInt4::from_bool(true, true, false, true);
        assert_eq!(m.0, [-1, -1, 0, -1]);
        assert!(!m.are_all_true());
        assert!(m.are_all_true1());
        assert!(m.are_all_true2());
        assert!(!m.are_all_true3());
        assert!(!m.are_all_false());
        assert!(SimdInt4::ZERO.are_all_false());
        assert!(SimdInt4::ALL_TRUE.are_all_true());
        assert!(SimdInt4::load(0, 0, 0, 1).are_all_false3());
        assert!(!SimdInt4::load(0, 0, 0, 1).are_all_false());
    }

    #[test]
    fn test_move_mask() {
        assert_eq!(SimdInt4::ZERO.move_mask(), 0);
        assert_eq!(SimdInt4::ALL_TRUE.move_mask(), 0xf);
        assert_eq!(SimdInt4::load(-1, 0, i32::MIN, 1).move_mask(), 0b0101);
        assert_eq!(SimdInt4::MASK_FFF0.move_mask(), 0b0111);
    }

    #[test]
    fn test_float_conversions() {
        let v = SimdFloat4::load(0.5, -1.4, 2.6, -3.5);
        assert_eq!(SimdInt4::from_float_round(v).0, [1, -1, 3, -4]);
        assert_eq!(SimdInt4::from_float_trunc(v).0, [0, -1, 2, -3]);
    }

    #[test]
    fn test_bitwise_and_arithmetic() {
        let a = SimdInt4::load(0x0f, 0xf0, -1, 0);
        let b = SimdInt4::load(0xff, 0x0f, 0, -1);
        assert_eq!((a & b).0, [0x0f, 0, 0, 0]);
        assert_eq!((a | b).0, [0xff, 0xff, -1, -1]);
        assert_eq!((a ^ b).0, [0xf0, 0xff, -1, -1]);
        assert_eq!((!SimdInt4::ZERO).0, [-1; 4]);
        assert_eq!((a + b).0, [0x10e, 0xff, -1, -1]);
        assert_eq!((a - b).0, [-0xf0, 0xe1, -1, 1]);
        assert_eq!(a.min(b).0, [0x0f, 0x0f, -1, -1]);
        assert_eq!(a.max(b).0, [0xff, 0xf0, 0, 0]);
    }

    #[test]
    fn test_shifts() {
        let v = SimdInt4::load(1, -8, 0x40, i32::MIN);
        assert_eq!(v.shift_l(2).0, [4, -32, 0x100, 0]);
        assert_eq!(v.shift_r(2).0, [0, -2, 0x10, i32::MIN >> 2]);
        assert_eq!(v.shift_ru(31).0, [0, 1, 0, 1]);
    }

    #[test]
    fn test_comparisons() {
        let a = SimdInt4::load(1, 2, 3, 4);
        let b = SimdInt4::load(1, 3, 2, 4);
        assert_eq!(a.cmp_eq(b).0, [-1, 0, 0, -1]);
        assert_eq!(a.cmp_lt(b).0, [0, -1, 0, 0]);
        assert_eq!(SimdInt4::load(-3, 3, 0, i32::MIN + 1).abs().0, [3, 3, 0, i32::MAX]);
    }
}
