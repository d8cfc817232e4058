//! Quaternion helpers operating on [`SimdFloat4`] values stored as `(x, y, z, w)`.

use crate::SimdFloat4;

/// The identity rotation.
pub const IDENTITY: SimdFloat4 = SimdFloat4::W_AXIS;

/// Hamilton product `a * b`, applying `b` first.
#[inline]
pub fn mul(a: SimdFloat4, b: SimdFloat4) -> SimdFloat4 {
    let [ax, ay, az, aw] = a.0;
    let [bx, by, bz, bw] = b.0;
    SimdFloat4::load(
        aw * bx + ax * bw + ay * bz - az * by,
        aw * by + ay * bw + az * bx - ax * bz,
        aw * bz + az * bw + ax * by - ay * bx,
        aw * bw - ax * bx - ay * by - az * bz,
    )
}

#[inline]
pub fn conjugate(q: SimdFloat4) -> SimdFloat4 {
    SimdFloat4::load(-q.get_x(), -q.get_y(), -q.get_z(), q.get_w())
}

/// Rotation of `angle` radians around a normalized `axis` (xyz lanes).
pub fn from_axis_angle(axis: SimdFloat4, angle: f32) -> SimdFloat4 {
    debug_assert!(axis.is_normalized_est3().are_all_true1(), "axis is not normalized");
    let (s, c) = (angle * 0.5).sin_cos();
    (axis * s).set_w(c)
}

/// Rotates the xyz vector of `v`.
pub fn transform_vector(q: SimdFloat4, v: SimdFloat4) -> SimdFloat4 {
    let a = q.cross3(v) + v * q.splat_w();
    let b = q.cross3(a);
    (b + b).set_w(0.0) + v.set_w(0.0)
}

/// Normalized lerp taking the shortest path.
pub fn nlerp(a: SimdFloat4, b: SimdFloat4, alpha: f32) -> SimdFloat4 {
    let b = if a.dot4(b).get_x() < 0.0 { -b } else { b };
    a.lerp(b, SimdFloat4::load1(alpha)).normalize4()
}

/// Flips `q` to the hemisphere with a non-negative w.
#[inline]
pub fn positive_w(q: SimdFloat4) -> SimdFloat4 {
    if q.get_w() < 0.0 { -q } else { q }
}
