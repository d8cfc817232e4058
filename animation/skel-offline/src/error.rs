use skel_runtime::RuntimeError;
use thiserror::Error;

/// Channel of a joint track, used to locate validation failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Translation,
    Rotation,
    Scale,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Translation => "translation",
            Self::Rotation => "rotation",
            Self::Scale => "scale",
        })
    }
}

/// Error types for raw data validation and building
#[derive(Error, Debug)]
pub enum OfflineError {
    /// Animation duration is not strictly positive
    #[error("Invalid animation duration: {0}")]
    InvalidDuration(f32),

    /// More tracks than the runtime format can index
    #[error("Too many tracks: {count} (maximum {max})")]
    TooManyTracks { count: usize, max: usize },

    /// More joints than a skeleton can hold
    #[error("Too many joints: {count} (maximum {max})")]
    TooManyJoints { count: usize, max: usize },

    /// A key time lies outside `[0, duration]`
    #[error("Track {track} {channel} key {key}: time {time} outside [0, {duration}]")]
    KeyTimeOutOfRange {
        track: usize,
        channel: Channel,
        key: usize,
        time: f32,
        duration: f32,
    },

    /// Key times of a track are not strictly increasing
    #[error("Track {track} {channel} key {key}: time {time} does not follow {previous}")]
    UnsortedKeys {
        track: usize,
        channel: Channel,
        key: usize,
        time: f32,
        previous: f32,
    },

    /// A key value is NaN or infinite
    #[error("Track {track} {channel} key {key}: value is not finite")]
    InvalidKeyValue {
        track: usize,
        channel: Channel,
        key: usize,
    },

    /// A skeleton bind pose transform is NaN or infinite
    #[error("Joint '{0}' has a non finite transform")]
    InvalidJointTransform(String),

    /// Raw description could not be parsed
    #[cfg(feature = "serde")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Runtime object construction failed
    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}

/// Result type using OfflineError
pub type Result<T> = std::result::Result<T, OfflineError>;
