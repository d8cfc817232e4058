//! Conversions between the SIMD algebra types and `glam`.

use glam::{Mat4, Quat, Vec3, Vec3A, Vec4};

use crate::{Float4x4, SimdFloat4};

impl From<Vec4> for SimdFloat4 {
    fn from(v: Vec4) -> Self {
        Self(v.to_array())
    }
}

impl From<SimdFloat4> for Vec4 {
    fn from(v: SimdFloat4) -> Self {
        Self::from_array(v.0)
    }
}

/// w is set to 0.
impl From<Vec3> for SimdFloat4 {
    fn from(v: Vec3) -> Self {
        Self::load(v.x, v.y, v.z, 0.0)
    }
}

/// w is set to 0.
impl From<Vec3A> for SimdFloat4 {
    fn from(v: Vec3A) -> Self {
        Self::load(v.x, v.y, v.z, 0.0)
    }
}

impl From<SimdFloat4> for Vec3 {
    fn from(v: SimdFloat4) -> Self {
        Self::new(v.get_x(), v.get_y(), v.get_z())
    }
}

impl From<SimdFloat4> for Vec3A {
    fn from(v: SimdFloat4) -> Self {
        Self::new(v.get_x(), v.get_y(), v.get_z())
    }
}

impl From<Quat> for SimdFloat4 {
    fn from(q: Quat) -> Self {
        Self(q.to_array())
    }
}

impl From<SimdFloat4> for Quat {
    fn from(q: SimdFloat4) -> Self {
        Self::from_array(q.0)
    }
}

impl From<Mat4> for Float4x4 {
    fn from(m: Mat4) -> Self {
        Self::from_cols(
            m.x_axis.into(),
            m.y_axis.into(),
            m.z_axis.into(),
            m.w_axis.into(),
        )
    }
}

impl From<Float4x4> for Mat4 {
    fn from(m: Float4x4) -> Self {
        Self::from_cols(
            m.cols[0].into(),
            m.cols[1].into(),
            m.cols[2].into(),
            m.cols[3].into(),
        )
    }
}
