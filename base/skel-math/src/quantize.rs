//! Compact key encodings: IEEE half floats and smallest-three style quaternions.
//!
//! Quaternions are stored as three signed 16-bit components scaled by
//! [`QUATERNION_SCALE`] plus the sign of `w`. The magnitude of `w` is
//! recovered from the unit-length constraint.

use half::f16;

use crate::{SimdFloat4, SimdInt4};

/// Scale applied to quaternion components before rounding to `i16`.
pub const QUATERNION_SCALE: f32 = 32767.0;

/// Converts a float to its half precision bit pattern.
#[inline]
pub fn float_to_half(f: f32) -> u16 {
    f16::from_f32(f).to_bits()
}

/// Converts a half precision bit pattern to a float.
#[inline]
pub fn half_to_float(h: u16) -> f32 {
    f16::from_bits(h).to_f32()
}

/// Converts four floats to half precision, one per integer lane.
#[inline]
pub fn float_to_half_simd(v: SimdFloat4) -> SimdInt4 {
    SimdInt4(v.0.map(|f| i32::from(float_to_half(f))))
}

/// Converts the low 16 bits of every lane from half precision.
#[inline]
pub fn half_to_float_simd(h: SimdInt4) -> SimdFloat4 {
    SimdFloat4(h.0.map(|i| half_to_float(i as u16)))
}

/// A quaternion reduced to its quantized xyz components and the sign of w.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct QuantizedQuaternion {
    pub value: [i16; 3],
    /// `true` when w is negative.
    pub w_sign: bool,
}

impl QuantizedQuaternion {
    /// Quantizes a normalized quaternion.
    pub fn quantize(q: SimdFloat4) -> Self {
        debug_assert!(q.is_normalized_est4().are_all_true1(), "quaternion is not normalized");
        let quantize = |c: f32| {
            (c * QUATERNION_SCALE + 0.5)
                .floor()
                .clamp(-QUATERNION_SCALE, QUATERNION_SCALE) as i16
        };
        Self {
            value: [quantize(q.get_x()), quantize(q.get_y()), quantize(q.get_z())],
            w_sign: q.get_w() < 0.0,
        }
    }

    /// Rebuilds the quaternion, recovering w from the unit-length constraint.
    pub fn dequantize(self) -> SimdFloat4 {
        let [x, y, z] = self.value.map(|c| f32::from(c) / QUATERNION_SCALE);
        let w_sq = 1.0 - (x * x + y * y + z * z);
        let w = w_sq.max(0.0).sqrt();
        SimdFloat4::load(x, y, z, if self.w_sign { -w } else { w })
    }
}
