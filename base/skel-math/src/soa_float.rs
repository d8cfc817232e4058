//! Structure-of-arrays vectors: lane `i` of every component belongs to the
//! same logical vector.

use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::SimdFloat4;

/// Four 3D vectors.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SoaFloat3 {
    pub x: SimdFloat4,
    pub y: SimdFloat4,
    pub z: SimdFloat4,
}

/// Four 4D vectors.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SoaFloat4 {
    pub x: SimdFloat4,
    pub y: SimdFloat4,
    pub z: SimdFloat4,
    pub w: SimdFloat4,
}

impl SoaFloat3 {
    pub const ZERO: Self = Self::splat(0.0, 0.0, 0.0);
    pub const ONE: Self = Self::splat(1.0, 1.0, 1.0);

    #[inline]
    pub const fn new(x: SimdFloat4, y: SimdFloat4, z: SimdFloat4) -> Self {
        Self { x, y, z }
    }

    /// Replicates one vector in all four lanes.
    #[inline]
    pub const fn splat(x: f32, y: f32, z: f32) -> Self {
        Self {
            x: SimdFloat4::load1(x),
            y: SimdFloat4::load1(y),
            z: SimdFloat4::load1(z),
        }
    }

    /// Reads the vector stored in `lane`.
    #[inline]
    pub fn lane(&self, lane: usize) -> [f32; 3] {
        [self.x.0[lane], self.y.0[lane], self.z.0[lane]]
    }

    /// Writes the vector stored in `lane`.
    #[inline]
    pub fn set_lane(&mut self, lane: usize, v: [f32; 3]) {
        self.x.0[lane] = v[0];
        self.y.0[lane] = v[1];
        self.z.0[lane] = v[2];
    }

    #[inline]
    pub fn dot(&self, b: &Self) -> SimdFloat4 {
        self.x * b.x + self.y * b.y + self.z * b.z
    }

    #[inline]
    pub fn cross(&self, b: &Self) -> Self {
        Self {
            x: self.y * b.z - self.z * b.y,
            y: self.z * b.x - self.x * b.z,
            z: self.x * b.y - self.y * b.x,
        }
    }

    #[inline]
    pub fn length_sqr(&self) -> SimdFloat4 {
        self.dot(self)
    }

    /// Per-lane linear interpolation.
    #[inline]
    pub fn lerp(&self, b: &Self, alpha: SimdFloat4) -> Self {
        Self {
            x: self.x.lerp(b.x, alpha),
            y: self.y.lerp(b.y, alpha),
            z: self.z.lerp(b.z, alpha),
        }
    }

    /// `self * scale + add`, `scale` applied per lane.
    #[inline]
    pub fn madd(&self, scale: SimdFloat4, add: &Self) -> Self {
        Self {
            x: self.x.madd(scale, add.x),
            y: self.y.madd(scale, add.y),
            z: self.z.madd(scale, add.z),
        }
    }
}

impl Add for SoaFloat3 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for SoaFloat3 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<SimdFloat4> for SoaFloat3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: SimdFloat4) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<SimdFloat4> for SoaFloat3 {
    type Output = Self;

    #[inline]
    fn div(self, rhs: SimdFloat4) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Mul for SoaFloat3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }
}

impl Neg for SoaFloat3 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl SoaFloat4 {
    #[inline]
    pub const fn new(x: SimdFloat4, y: SimdFloat4, z: SimdFloat4, w: SimdFloat4) -> Self {
        Self { x, y, z, w }
    }

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
    pub fn lerp(&self, b: &Self, alpha: SimdFloat4) -> Self {
        Self {
            x: self.x.lerp(b.x, alpha),
            y: self.y.lerp(b.y, alpha),
            z: self.z.lerp(b.z, alpha),
            w: self.w.lerp(b.w, alpha),
        }
    }
}

impl Add for SoaFloat4 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z, self.w + rhs.w)
    }
}

impl Mul<SimdFloat4> for SoaFloat4 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: SimdFloat4) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs, self.w * rhs)
    }
}
