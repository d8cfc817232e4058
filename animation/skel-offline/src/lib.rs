//! Offline skeletal animation tools.
//!
//! Raw animations and skeletons are the authoring representation: joint
//! trees, and keyframes at arbitrary times with full precision values. The
//! builders validate them and produce the runtime [`skel_runtime::Animation`]
//! and [`skel_runtime::Skeleton`].
//!
//! # Examples
//!
//! ```
//! use glam::Vec3;
//! use skel_offline::{AnimationBuilder, RawAnimation, TranslationKey};
//!
//! let mut raw = RawAnimation::new("slide", 1.0, 1);
//! raw.tracks[0].translations.push(TranslationKey { time: 0.0, value: Vec3::ZERO });
//! raw.tracks[0].translations.push(TranslationKey { time: 1.0, value: Vec3::X });
//!
//! let animation = AnimationBuilder::new().build(&raw)?;
//! assert_eq!(animation.duration(), 1.0);
//! # Ok::<(), skel_offline::OfflineError>(())
//! ```

pub mod animation_builder;
pub mod error;
pub mod raw_animation;
pub mod raw_skeleton;
pub mod skeleton_builder;

pub use animation_builder::AnimationBuilder;
pub use error::{Channel, OfflineError, Result};
pub use raw_animation::{JointTrack, MAX_TRACKS, RawAnimation, RawKey, RotationKey, ScaleKey, TranslationKey};
pub use raw_skeleton::{MAX_JOINTS, RawJoint, RawSkeleton, RawTransform};
pub use skeleton_builder::SkeletonBuilder;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
