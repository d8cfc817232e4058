//! SIMD algebra for skeletal animation.
//!
//! This crate provides the numeric foundation shared by the runtime and
//! offline animation crates:
//!
//! - [`SimdFloat4`] and [`SimdInt4`], four-wide vectors with aligned and
//!   unaligned loads and stores
//! - [`Float4x4`], a column-major matrix with affine composition,
//!   decomposition and inversion
//! - structure-of-arrays types ([`SoaFloat3`], [`SoaQuaternion`],
//!   [`SoaTransform`]) packing four joints in one record
//! - half float and quaternion quantization used by compacted animation keys
//!
//! Normalization and alignment requirements are enforced with debug
//! assertions. They document programming errors and compile out of release
//! builds.
//!
//! # Examples
//!
//! ```
//! use skel_math::{Float4x4, SimdFloat4};
//!
//! let translation = SimdFloat4::load(1.0, 2.0, 3.0, 0.0);
//! let rotation = SimdFloat4::W_AXIS;
//! let scale = SimdFloat4::ONE;
//!
//! let matrix = Float4x4::from_affine(translation, rotation, scale);
//! let parts = matrix.to_affine().expect("affine matrix");
//! assert_eq!(parts.translation.get_z(), 3.0);
//! ```

pub mod float4x4;
pub mod glam_interop;
pub mod quantize;
pub mod quaternion;
pub mod simd_float4;
pub mod simd_int4;
pub mod soa_float;
pub mod soa_quaternion;
pub mod soa_transform;

pub use float4x4::{AffineParts, Float4x4};
pub use quantize::{QuantizedQuaternion, float_to_half, half_to_float};
pub use simd_float4::SimdFloat4;
pub use simd_int4::SimdInt4;
pub use soa_float::{SoaFloat3, SoaFloat4};
pub use soa_quaternion::SoaQuaternion;
pub use soa_transform::{JointTransform, SoaFloat4x4, SoaTransform};

/// Tolerance on the squared length of a normalized vector.
pub const NORMALIZATION_TOLERANCE_SQ: f32 = 1e-6;

/// Tolerance on the squared length of a vector normalized with an estimate.
pub const NORMALIZATION_TOLERANCE_EST_SQ: f32 = 2e-3;

/// Tolerance on the squared dot product of two orthogonal unit axes.
pub const ORTHOGONALISATION_TOLERANCE_SQ: f32 = 1e-8;

/// Number of joints in a structure-of-arrays block.
pub const SOA_WIDTH: usize = 4;

/// Number of SoA blocks needed to store `count` elements.
#[inline]
pub const fn soa_count(count: usize) -> usize {
    count.div_ceil(SOA_WIDTH)
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
