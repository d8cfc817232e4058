//! Runtime skeletal animation.
//!
//! A frame of animation runs three jobs over caller-owned buffers:
//!
//! 1. [`SamplingJob`] evaluates an [`Animation`] at a time into local
//!    transforms, using a [`SamplingCache`] to move key cursors incrementally.
//! 2. [`BlendingJob`] mixes several sampled poses by weight, falling back to
//!    the skeleton bind pose when no layer is significant.
//! 3. [`LocalToModelJob`] walks the [`Skeleton`] hierarchy to produce one
//!    model-space matrix per joint.
//!
//! Jobs validate their inputs before writing anything and return a
//! [`RuntimeError`] when a buffer is missing or too small.
//!
//! # Examples
//!
//! ```
//! use skel_math::{Float4x4, SoaTransform};
//! use skel_runtime::{LocalToModelJob, Skeleton};
//!
//! let skeleton = Skeleton::new(
//!     vec!["root".into(), "child".into()],
//!     vec![-1, 0],
//!     vec![SoaTransform::IDENTITY],
//! )?;
//! let mut models = vec![Float4x4::default(); skeleton.num_joints()];
//! LocalToModelJob::new(&skeleton, skeleton.bind_pose(), &mut models).run()?;
//! assert_eq!(models[1], Float4x4::IDENTITY);
//! # Ok::<(), skel_runtime::RuntimeError>(())
//! ```

pub mod animation;
pub mod archive;
pub mod blending_job;
pub mod error;
pub mod local_to_model_job;
pub mod playback;
pub mod sampling_job;
pub mod skeleton;

pub use animation::{Animation, Float3Key, Keyframe, MAX_TRACKS, QuaternionKey};
pub use archive::Archive;
pub use blending_job::{BlendingJob, BlendingLayer, DEFAULT_THRESHOLD};
pub use error::{Result, RuntimeError};
pub use local_to_model_job::LocalToModelJob;
pub use playback::{BlendRatio, PlaybackController};
pub use sampling_job::{SamplingCache, SamplingJob};
pub use skeleton::{MAX_JOINTS, NO_PARENT, Skeleton};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
