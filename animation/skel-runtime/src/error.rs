use std::io;
use thiserror::Error;

/// Error types for runtime animation data and jobs
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// I/O Error during reading or writing an archive
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid magic number in an archive header
    #[error("Invalid magic number: expected '{expected}', got '{actual}'")]
    InvalidMagic { expected: String, actual: String },

    /// Unsupported archive version
    #[error("Unsupported version: {0}")]
    UnsupportedVersion(u32),

    /// Archive content that cannot describe a valid object
    #[error("Corrupted archive: {0}")]
    CorruptedArchive(String),

    /// Key sequences violating the compacted animation layout
    #[error("Invalid animation: {0}")]
    InvalidAnimation(String),

    /// Joint hierarchy or bind pose violating the skeleton layout
    #[error("Invalid skeleton: {0}")]
    InvalidSkeleton(String),

    /// A job was run without one of its inputs or outputs
    #[error("Missing job input: {0}")]
    MissingInput(&'static str),

    /// A job buffer is smaller than required
    #[error("Buffer '{name}' too small: {actual} elements, {required} required")]
    BufferTooSmall {
        name: &'static str,
        required: usize,
        actual: usize,
    },

    /// The sampling cache cannot hold all tracks of the animation
    #[error("Sampling cache too small: capacity for {capacity} tracks, animation has {required}")]
    CacheTooSmall { required: usize, capacity: usize },

    /// Blending threshold must be strictly positive
    #[error("Invalid blending threshold: {0}")]
    InvalidThreshold(f32),

    /// A blending layer buffer is smaller than the bind pose
    #[error("Blending layer {layer} too small: {actual} blocks, {required} required")]
    LayerTooSmall {
        layer: usize,
        required: usize,
        actual: usize,
    },
}

/// Result type using RuntimeError
pub type Result<T> = std::result::Result<T, RuntimeError>;
