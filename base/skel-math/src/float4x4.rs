//! Column-major 4x4 matrix built from four [`SimdFloat4`] columns.
//!
//! Rotation inputs (quaternions, axes) must be normalized: this is checked by
//! debug assertions only. [`Float4x4::invert`] has no failure channel, a
//! singular matrix yields unspecified values.

use std::ops::{Add, Mul, Sub};

use crate::simd_int4::SimdInt4;
use crate::{ORTHOGONALISATION_TOLERANCE_SQ, SimdFloat4};

/// 4x4 matrix stored as four column vectors.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C, align(16))]
pub struct Float4x4 {
    pub cols: [SimdFloat4; 4],
}

impl Default for Float4x4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Translation, rotation and scale components of an affine matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineParts {
    /// Translation in xyz, w is 1.
    pub translation: SimdFloat4,
    /// Unit quaternion.
    pub rotation: SimdFloat4,
    /// Scale in xyz, w is 1.
    pub scale: SimdFloat4,
}

impl Float4x4 {
    pub const IDENTITY: Self = Self {
        cols: [
            SimdFloat4::X_AXIS,
            SimdFloat4::Y_AXIS,
            SimdFloat4::Z_AXIS,
            SimdFloat4::W_AXIS,
        ],
    };

    /// Builds a matrix from columns.
    #[inline]
    pub const fn from_cols(c0: SimdFloat4, c1: SimdFloat4, c2: SimdFloat4, c3: SimdFloat4) -> Self {
        Self {
            cols: [c0, c1, c2, c3],
        }
    }

    /// Translation matrix from the xyz lanes of `v`.
    #[inline]
    pub fn translation(v: SimdFloat4) -> Self {
        let mut m = Self::IDENTITY;
        m.cols[3] = v.set_w(1.0);
        m
    }

    /// Scaling matrix from the xyz lanes of `v`.
    #[inline]
    pub fn scaling(v: SimdFloat4) -> Self {
        Self::from_cols(
            SimdFloat4::load_x(v.get_x()),
            SimdFloat4::load(0.0, v.get_y(), 0.0, 0.0),
            SimdFloat4::load(0.0, 0.0, v.get_z(), 0.0),
            SimdFloat4::W_AXIS,
        )
    }

    /// Rotation matrix from yaw (x), pitch (y) and roll (z) angles in radians.
    pub fn from_euler(v: SimdFloat4) -> Self {
        let cos = v.cos();
        let sin = v.sin();
        let (ch, sh) = (cos.get_x(), sin.get_x());
        let (ca, sa) = (cos.get_y(), sin.get_y());
        let (cb, sb) = (cos.get_z(), sin.get_z());
        let sa_cb = sa * cb;
        let sa_sb = sa * sb;

        Self::from_cols(
            SimdFloat4::load(ch * ca, sh * sb - ch * sa_cb, ch * sa_sb + sh * cb, 0.0),
            SimdFloat4::load(sa, ca * cb, -ca * sb, 0.0),
            SimdFloat4::load(-sh * ca, sh * sa_cb + ch * sb, -sh * sa_sb + ch * cb, 0.0),
            SimdFloat4::W_AXIS,
        )
    }

    /// Rotation matrix of angle `v.w` around the normalized xyz axis.
    pub fn from_axis_angle(v: SimdFloat4) -> Self {
        debug_assert!(v.is_normalized_est3().are_all_true1(), "axis is not normalized");
        let [x, y, z, angle] = v.0;
        let (s, c) = angle.sin_cos();
        let t = 1.0 - c;

        Self::from_cols(
            SimdFloat4::load(t * x * x + c, t * x * y + s * z, t * x * z - s * y, 0.0),
            SimdFloat4::load(t * x * y - s * z, t * y * y + c, t * y * z + s * x, 0.0),
            SimdFloat4::load(t * x * z + s * y, t * y * z - s * x, t * z * z + c, 0.0),
            SimdFloat4::W_AXIS,
        )
    }

    /// Rotation matrix from a normalized quaternion.
    pub fn from_quaternion(q: SimdFloat4) -> Self {
        debug_assert!(q.is_normalized_est4().are_all_true1(), "quaternion is not normalized");
        let mut m = Self::IDENTITY;
        m.set_rotation(q);
        m
    }

    /// Composes translation, rotation and scale into one matrix.
    pub fn from_affine(translation: SimdFloat4, rotation: SimdFloat4, scale: SimdFloat4) -> Self {
        debug_assert!(
            rotation.is_normalized_est4().are_all_true1(),
            "quaternion is not normalized"
        );
        let mut m = Self::IDENTITY;
        m.set_rotation(rotation);
        m.cols[0] = m.cols[0] * scale.splat_x();
        m.cols[1] = m.cols[1] * scale.splat_y();
        m.cols[2] = m.cols[2] * scale.splat_z();
        m.cols[3] = translation.set_w(1.0);
        m
    }

    fn set_rotation(&mut self, q: SimdFloat4) {
        let [x, y, z, w] = q.0;
        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (wx, wy, wz) = (w * x, w * y, w * z);

        self.cols[0] = SimdFloat4::load(1.0 - 2.0 * (yy + zz), 2.0 * (xy + wz), 2.0 * (xz - wy), 0.0);
        self.cols[1] = SimdFloat4::load(2.0 * (xy - wz), 1.0 - 2.0 * (xx + zz), 2.0 * (yz + wx), 0.0);
        self.cols[2] = SimdFloat4::load(2.0 * (xz + wy), 2.0 * (yz - wx), 1.0 - 2.0 * (xx + yy), 0.0);
    }

    /// Element at `row`, `col`.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> f32 {
        self.cols[col].0[row]
    }

    #[inline]
    pub fn transpose(&self) -> Self {
        let cols = SimdFloat4::transpose4x4(self.cols);
        Self { cols }
    }

    /// General inverse computed from cofactors.
    ///
    /// The result is unspecified if the matrix is singular.
    pub fn invert(&self) -> Self {
        let m: [f32; 16] = std::array::from_fn(|i| self.cols[i / 4].0[i % 4]);
        let mut inv = [0.0f32; 16];

        inv[0] = m[5] * m[10] * m[15] - m[5] * m[11] * m[14] - m[9] * m[6] * m[15]
            + m[9] * m[7] * m[14]
            + m[13] * m[6] * m[11]
            - m[13] * m[7] * m[10];
        inv[4] = -m[4] * m[10] * m[15] + m[4] * m[11] * m[14] + m[8] * m[6] * m[15]
            - m[8] * m[7] * m[14]
            - m[12] * m[6] * m[11]
            + m[12] * m[7] * m[10];
        inv[8] = m[4] * m[9] * m[15] - m[4] * m[11] * m[13] - m[8] * m[5] * m[15]
            + m[8] * m[7] * m[13]
            + m[12] * m[5] * m[11]
            - m[12] * m[7] * m[9];
        inv[12] = -m[4] * m[9] * m[14] + m[4] * m[10] * m[13] + m[8] * m[5] * m[14]
            - m[8] * m[6] * m[13]
            - m[12] * m[5] * m[10]
            + m[12] * m[6] * m[9];
        inv[1] = -m[1] * m[10] * m[15] + m[1] * m[11] * m[14] + m[9] * m[2] * m[15]
            - m[9] * m[3] * m[14]
            - m[13] * m[2] * m[11]
            + m[13] * m[3] * m[10];
        inv[5] = m[0] * m[10] * m[15] - m[0] * m[11] * m[14] - m[8] * m[2] * m[15]
            + m[8] * m[3] * m[14]
            + m[12] * m[2] * m[11]
            - m[12] * m[3] * m[10];
        inv[9] = -m[0] * m[9] * m[15] + m[0] * m[11] * m[13] + m[8] * m[1] * m[15]
            - m[8] * m[3] * m[13]
            - m[12] * m[1] * m[11]
            + m[12] * m[3] * m[9];
        inv[13] = m[0] * m[9] * m[14] - m[0] * m[10] * m[13] - m[8] * m[1] * m[14]
            + m[8] * m[2] * m[13]
            + m[12] * m[1] * m[10]
            - m[12] * m[2] * m[9];
        inv[2] = m[1] * m[6] * m[15] - m[1] * m[7] * m[14] - m[5] * m[2] * m[15]
            + m[5] * m[3] * m[14]
            + m[13] * m[2] * m[7]
            - m[13] * m[3] * m[6];
        inv[6] = -m[0] * m[6] * m[15] + m[0] * m[7] * m[14] + m[4] * m[2] * m[15]
            - m[4] * m[3] * m[14]
            - m[12] * m[2] * m[7]
            + m[12] * m[3] * m[6];
        inv[10] = m[0] * m[5] * m[15] - m[0] * m[7] * m[13] - m[4] * m[1] * m[15]
            + m[4] * m[3] * m[13]
            + m[12] * m[1] * m[7]
            - m[12] * m[3] * m[5];
        inv[14] = -m[0] * m[5] * m[14] + m[0] * m[6] * m[13] + m[4] * m[1] * m[14]
            - m[4] * m[2] * m[13]
            - m[12] * m[1] * m[6]
            + m[12] * m[2] * m[5];
        inv[3] = -m[1] * m[6] * m[11] + m[1] * m[7] * m[10] + m[5] * m[2] * m[11]
            - m[5] * m[3] * m[10]
            - m[9] * m[2] * m[7]
            + m[9] * m[3] * m[6];
        inv[7] = m[0] * m[6] * m[11] - m[0] * m[7] * m[10] - m[4] * m[2] * m[11]
            + m[4] * m[3] * m[10]
            + m[8] * m[2] * m[7]
            - m[8] * m[3] * m[6];
        inv[11] = -m[0] * m[5] * m[11] + m[0] * m[7] * m[9] + m[4] * m[1] * m[11]
            - m[4] * m[3] * m[9]
            - m[8] * m[1] * m[7]
            + m[8] * m[3] * m[5];
        inv[15] = m[0] * m[5] * m[10] - m[0] * m[6] * m[9] - m[4] * m[1] * m[10]
            + m[4] * m[2] * m[9]
            + m[8] * m[1] * m[6]
            - m[8] * m[2] * m[5];

        let det = m[0] * inv[0] + m[1] * inv[4] + m[2] * inv[8] + m[3] * inv[12];
        let inv_det = det.recip();
        let col = |c: usize| {
            SimdFloat4::load(inv[c * 4], inv[c * 4 + 1], inv[c * 4 + 2], inv[c * 4 + 3]) * inv_det
        };
        Self::from_cols(col(0), col(1), col(2), col(3))
    }

    /// `self * Float4x4::translation(v)`.
    #[inline]
    pub fn translate(&self, v: SimdFloat4) -> Self {
        let mut m = *self;
        m.cols[3] = self.transform_point(v);
        m
    }

    /// `self * Float4x4::scaling(v)`.
    #[inline]
    pub fn scale(&self, v: SimdFloat4) -> Self {
        Self::from_cols(
            self.cols[0] * v.splat_x(),
            self.cols[1] * v.splat_y(),
            self.cols[2] * v.splat_z(),
            self.cols[3],
        )
    }

    /// Multiplies every column by `v`, lane-wise.
    #[inline]
    pub fn column_multiply(&self, v: SimdFloat4) -> Self {
        Self {
            cols: self.cols.map(|c| c * v),
        }
    }

    /// Transforms the xyz point of `v`, w is treated as 1.
    #[inline]
    pub fn transform_point(&self, v: SimdFloat4) -> SimdFloat4 {
        let xxxx = v.splat_x() * self.cols[0];
        let a23 = v.splat_z().madd(self.cols[2], self.cols[3]);
        let a01 = v.splat_y().madd(self.cols[1], xxxx);
        a01 + a23
    }

    /// Transforms the xyz vector of `v`, w is treated as 0.
    #[inline]
    pub fn transform_vector(&self, v: SimdFloat4) -> SimdFloat4 {
        let xxxx = v.splat_x() * self.cols[0];
        let zzzz = v.splat_z() * self.cols[2];
        let a01 = v.splat_y().madd(self.cols[1], xxxx);
        a01 + zzzz
    }

    /// Tests whether the three upper-left axes are of unit length.
    pub fn is_normalized(&self) -> SimdInt4 {
        SimdInt4::from_bool(
            self.cols[0].is_normalized3().are_all_true1(),
            self.cols[1].is_normalized3().are_all_true1(),
            self.cols[2].is_normalized3().are_all_true1(),
            false,
        )
    }

    /// Same as [`Self::is_normalized`] with the estimated tolerance.
    pub fn is_normalized_est(&self) -> SimdInt4 {
        SimdInt4::from_bool(
            self.cols[0].is_normalized_est3().are_all_true1(),
            self.cols[1].is_normalized_est3().are_all_true1(),
            self.cols[2].is_normalized_est3().are_all_true1(),
            false,
        )
    }

    /// Tests whether the three upper-left axes are mutually orthogonal and
    /// form a right-handed basis. Reflections and degenerate axes fail.
    ///
    /// The result is stored in the x lane.
    pub fn is_orthogonal(&self) -> SimdInt4 {
        let x = self.cols[0].normalize_safe3(SimdFloat4::X_AXIS).set_w(0.0);
        let y = self.cols[1].normalize_safe3(SimdFloat4::Y_AXIS).set_w(0.0);
        let z = self.cols[2].normalize_safe3(SimdFloat4::Z_AXIS).set_w(0.0);
        let degenerate = [self.cols[0], self.cols[1], self.cols[2]]
            .iter()
            .any(|c| c.length3_sqr().get_x() == 0.0);

        let xy = x.dot3(y).get_x();
        let yz = y.dot3(z).get_x();
        let zx = z.dot3(x).get_x();
        let orthogonal = xy * xy < ORTHOGONALISATION_TOLERANCE_SQ
            && yz * yz < ORTHOGONALISATION_TOLERANCE_SQ
            && zx * zx < ORTHOGONALISATION_TOLERANCE_SQ;
        let right_handed = x.cross3(y).dot3(z).get_x() > 0.0;

        SimdInt4::from_bool(!degenerate && orthogonal && right_handed, false, false, false)
    }

    /// Extracts the quaternion of a normalized orthogonal matrix.
    pub fn to_quaternion(&self) -> SimdFloat4 {
        debug_assert!(self.is_normalized_est().are_all_true3(), "matrix is not normalized");
        debug_assert!(self.is_orthogonal().are_all_true1(), "matrix is not orthogonal");

        let (m00, m11, m22) = (self.at(0, 0), self.at(1, 1), self.at(2, 2));
        let trace = m00 + m11 + m22;

        let q = if trace > 0.0 {
            let s = (trace + 1.0).sqrt() * 2.0;
            SimdFloat4::load(
                (self.at(2, 1) - self.at(1, 2)) / s,
                (self.at(0, 2) - self.at(2, 0)) / s,
                (self.at(1, 0) - self.at(0, 1)) / s,
                0.25 * s,
            )
        } else if m00 > m11 && m00 > m22 {
            let s = (1.0 + m00 - m11 - m22).sqrt() * 2.0;
            SimdFloat4::load(
                0.25 * s,
                (self.at(0, 1) + self.at(1, 0)) / s,
                (self.at(0, 2) + self.at(2, 0)) / s,
                (self.at(2, 1) - self.at(1, 2)) / s,
            )
        } else if m11 > m22 {
            let s = (1.0 + m11 - m00 - m22).sqrt() * 2.0;
            SimdFloat4::load(
                (self.at(0, 1) + self.at(1, 0)) / s,
                0.25 * s,
                (self.at(1, 2) + self.at(2, 1)) / s,
                (self.at(0, 2) - self.at(2, 0)) / s,
            )
        } else {
            let s = (1.0 + m22 - m00 - m11).sqrt() * 2.0;
            SimdFloat4::load(
                (self.at(0, 2) + self.at(2, 0)) / s,
                (self.at(1, 2) + self.at(2, 1)) / s,
                0.25 * s,
                (self.at(1, 0) - self.at(0, 1)) / s,
            )
        };
        q.normalize4()
    }

    /// Decomposes an affine matrix into translation, rotation and scale.
    ///
    /// Returns `None` when at least two axes are degenerate or when the axes
    /// are skewed. A single degenerate axis is rebuilt from the two others.
    /// Reflections are folded into a negative y scale.
    pub fn to_affine(&self) -> Option<AffineParts> {
        const DEGENERATE_SQ: f32 = 1e-12;

        let [c0, c1, c2, c3] = self.cols;
        let len = [
            c0.length3().get_x(),
            c1.length3().get_x(),
            c2.length3().get_x(),
        ];
        let zero = len.map(|l| l * l < DEGENERATE_SQ);

        let ortho: [SimdFloat4; 3] = match zero {
            [true, false, false] => {
                let y = c1 / len[1];
                let z = c2 / len[2];
                if !axes_orthogonal(y, z) {
                    return None;
                }
                [y.cross3(z).normalize3(), y, z]
            }
            [false, true, false] => {
                let x = c0 / len[0];
                let z = c2 / len[2];
                if !axes_orthogonal(x, z) {
                    return None;
                }
                [x, z.cross3(x).normalize3(), z]
            }
            [false, false, true] => {
                let x = c0 / len[0];
                let y = c1 / len[1];
                if !axes_orthogonal(x, y) {
                    return None;
                }
                [x, y, x.cross3(y).normalize3()]
            }
            [false, false, false] => {
                let x = c0 / len[0];
                let y_in = c1 / len[1];
                let z = c2 / len[2];
                if !axes_orthogonal(x, y_in) || !axes_orthogonal(y_in, z) || !axes_orthogonal(z, x)
                {
                    return None;
                }
                let y = z.cross3(x).normalize3();
                [x, y, x.cross3(y).normalize3()]
            }
            _ => return None,
        };
        let ortho = ortho.map(|c| c.set_w(0.0));

        let signed = |c: SimdFloat4, o: SimdFloat4, l: f32| {
            if c.dot3(o).get_x() < 0.0 { -l } else { l }
        };
        let scale = SimdFloat4::load(
            signed(c0, ortho[0], len[0]),
            signed(c1, ortho[1], len[1]),
            signed(c2, ortho[2], len[2]),
            1.0,
        );

        let rotation_matrix = Self::from_cols(ortho[0], ortho[1], ortho[2], SimdFloat4::W_AXIS);
        Some(AffineParts {
            translation: c3.set_w(1.0),
            rotation: rotation_matrix.to_quaternion(),
            scale,
        })
    }
}

fn axes_orthogonal(a: SimdFloat4, b: SimdFloat4) -> bool {
    let d = a.dot3(b).get_x();
    d * d < 1e-6
}

impl Mul for Float4x4 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self {
            cols: rhs.cols.map(|c| self * c),
        }
    }
}

impl Mul<SimdFloat4> for Float4x4 {
    type Output = SimdFloat4;

    #[inline]
    fn mul(self, v: SimdFloat4) -> SimdFloat4 {
        let xxxx = v.splat_x() * self.cols[0];
        let zzzz = v.splat_z() * self.cols[2];
        let a01 = v.splat_y().madd(self.cols[1], xxxx);
        let a23 = v.splat_w().madd(self.cols[3], zzzz);
        a01 + a23
    }
}

impl Add for Float4x4 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::from_cols(
            self.cols[0] + rhs.cols[0],
            self.cols[1] + rhs.cols[1],
            self.cols[2] + rhs.cols[2],
            self.cols[3] + rhs.cols[3],
        )
    }
}

impl Sub for Float4x4 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::from_cols(
            self.cols[0] - rhs.cols[0],
            self.cols[1] - rhs.cols[1],
            self.cols[2] - rhs.cols[2],
            self.cols[3] - rhs.cols[3],
        )
    }
}
