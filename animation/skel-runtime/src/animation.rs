//! Compacted runtime animation.
//!
//! An [`Animation`] stores three flat key sequences, one per channel
//! (translation, rotation, scale). Each sequence interleaves the keys of every
//! track and is sorted by `(time, track)`, so that playing the animation
//! forward reads keys in memory order.
//!
//! Every track of every channel, including the padding tracks up to the next
//! multiple of four, owns at least two keys: one at time 0 and one at the
//! animation duration. On construction the animation derives, for every key,
//! the index of the previous and next key of the same track. Sampling cursors
//! follow these links instead of searching.

use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;
use skel_math::{QuantizedQuaternion, SimdFloat4, half_to_float, soa_count};

use crate::error::{Result, RuntimeError};

/// Maximum number of tracks, bounded by the `u16` track index and the
/// skeleton joint limit.
pub const MAX_TRACKS: usize = 1024;

/// Link value for "no key".
pub(crate) const NO_KEY: u32 = u32::MAX;

static NEXT_ANIMATION_ID: AtomicU64 = AtomicU64::new(1);

/// Common accessors of compacted keys.
pub trait Keyframe {
    fn time(&self) -> f32;
    fn track(&self) -> u16;
}

/// Translation or scale key, with half precision components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Float3Key {
    /// Time in seconds. Stored as bits to keep `Eq` on the key.
    time_bits: u32,
    pub track: u16,
    pub value: [u16; 3],
}

impl Float3Key {
    pub fn new(time: f32, track: u16, value: [u16; 3]) -> Self {
        Self {
            time_bits: time.to_bits(),
            track,
            value,
        }
    }

    /// Decodes the half precision value.
    #[inline]
    pub fn decode(&self) -> [f32; 3] {
        self.value.map(half_to_float)
    }
}

/// Rotation key, quantized to three components and the sign of w.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct QuaternionKey {
    time_bits: u32,
    pub track: u16,
    pub rotation: QuantizedQuaternion,
}

impl QuaternionKey {
    pub fn new(time: f32, track: u16, rotation: QuantizedQuaternion) -> Self {
        Self {
            time_bits: time.to_bits(),
            track,
            rotation,
        }
    }

    /// Decodes the rotation as an `(x, y, z, w)` quaternion.
    #[inline]
    pub fn decode(&self) -> SimdFloat4 {
        self.rotation.dequantize()
    }
}

impl Keyframe for Float3Key {
    #[inline]
    fn time(&self) -> f32 {
        f32::from_bits(self.time_bits)
    }

    #[inline]
    fn track(&self) -> u16 {
        self.track
    }
}

impl Keyframe for QuaternionKey {
    #[inline]
    fn time(&self) -> f32 {
        f32::from_bits(self.time_bits)
    }

    #[inline]
    fn track(&self) -> u16 {
        self.track
    }
}

/// Same-track neighbours of every key of one channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct KeyLinks {
    pub prev: Vec<u32>,
    pub next: Vec<u32>,
    /// Index of the first key (time 0) of every track.
    pub first: Vec<u32>,
}

impl KeyLinks {
    /// Validates the layout of `keys` and derives the links.
    fn build<K: Keyframe>(
        channel: &str,
        keys: &[K],
        num_padded_tracks: usize,
        duration: f32,
    ) -> Result<Self> {
        let invalid = |reason: String| RuntimeError::InvalidAnimation(format!("{channel}: {reason}"));

        if keys.len() >= NO_KEY as usize {
            return Err(invalid(format!("too many keys ({})", keys.len())));
        }

        let mut prev = vec![NO_KEY; keys.len()];
        let mut next = vec![NO_KEY; keys.len()];
        let mut first = vec![NO_KEY; num_padded_tracks];
        let mut last = vec![NO_KEY; num_padded_tracks];

        for (i, key) in keys.iter().enumerate() {
            let track = usize::from(key.track());
            let time = key.time();
            if track >= num_padded_tracks {
                return Err(invalid(format!("key {i} targets track {track} out of {num_padded_tracks}")));
            }
            if !(0.0..=duration).contains(&time) {
                return Err(invalid(format!("key {i} time {time} outside [0, {duration}]")));
            }
            if i > 0 {
                let before = &keys[i - 1];
                let ordered = before.time() < time
                    || (before.time() == time && before.track() < key.track());
                if !ordered {
                    return Err(invalid(format!("key {i} is not sorted by (time, track)")));
                }
            }

            let index = i as u32;
            match last[track] {
                NO_KEY => {
                    if time != 0.0 {
                        return Err(invalid(format!("track {track} does not start at time 0")));
                    }
                    first[track] = index;
                }
                previous => {
                    prev[i] = previous;
                    next[previous as usize] = index;
                }
            }
            last[track] = index;
        }

        for (track, (&first, &last)) in first.iter().zip(last.iter()).enumerate() {
            if first == NO_KEY || first == last {
                return Err(invalid(format!("track {track} has less than two keys")));
            }
            if keys[last as usize].time() != duration {
                return Err(invalid(format!("track {track} does not end at the duration")));
            }
        }

        Ok(Self { prev, next, first })
    }
}

/// Immutable compacted animation, shared read-only by any number of samplers.
#[derive(Debug, Clone)]
pub struct Animation {
    id: u64,
    name: String,
    duration: f32,
    num_tracks: usize,
    translations: Vec<Float3Key>,
    rotations: Vec<QuaternionKey>,
    scales: Vec<Float3Key>,
    pub(crate) translation_links: KeyLinks,
    pub(crate) rotation_links: KeyLinks,
    pub(crate) scale_links: KeyLinks,
}

impl Animation {
    /// Builds an animation from already compacted key sequences.
    ///
    /// Every track up to `num_tracks` rounded to a multiple of four must own a
    /// key at time 0 and a key at `duration` in every channel, and keys must
    /// be sorted by `(time, track)`.
    pub fn new(
        name: impl Into<String>,
        duration: f32,
        num_tracks: usize,
        translations: Vec<Float3Key>,
        rotations: Vec<QuaternionKey>,
        scales: Vec<Float3Key>,
    ) -> Result<Self> {
        if !(duration > 0.0 && duration.is_finite()) {
            return Err(RuntimeError::InvalidAnimation(format!(
                "duration must be positive, got {duration}"
            )));
        }
        if num_tracks > MAX_TRACKS {
            return Err(RuntimeError::InvalidAnimation(format!(
                "{num_tracks} tracks exceed the maximum of {MAX_TRACKS}"
            )));
        }

        let padded = soa_count(num_tracks) * 4;
        let translation_links = KeyLinks::build("translations", &translations, padded, duration)?;
        let rotation_links = KeyLinks::build("rotations", &rotations, padded, duration)?;
        let scale_links = KeyLinks::build("scales", &scales, padded, duration)?;

        let animation = Self {
            id: NEXT_ANIMATION_ID.fetch_add(1, Ordering::Relaxed),
            name: name.into(),
            duration,
            num_tracks,
            translations,
            rotations,
            scales,
            translation_links,
            rotation_links,
            scale_links,
        };
        debug!(
            "Animation '{}': {:.3}s, {} tracks, {} translation / {} rotation / {} scale keys",
            animation.name,
            animation.duration,
            animation.num_tracks,
            animation.translations.len(),
            animation.rotations.len(),
            animation.scales.len()
        );
        Ok(animation)
    }

    /// Process-unique identifier, used by sampling caches to detect rebinding.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Number of animated joint tracks.
    pub fn num_tracks(&self) -> usize {
        self.num_tracks
    }

    /// Number of SoA blocks needed to sample all tracks.
    pub fn num_soa_tracks(&self) -> usize {
        soa_count(self.num_tracks)
    }

    pub fn translations(&self) -> &[Float3Key] {
        &self.translations
    }

    pub fn rotations(&self) -> &[QuaternionKey] {
        &self.rotations
    }

    pub fn scales(&self) -> &[Float3Key] {
        &self.scales
    }

    /// Approximate memory footprint in bytes.
    pub fn size(&self) -> usize {
        let links = |l: &KeyLinks| (l.prev.len() + l.next.len() + l.first.len()) * 4;
        std::mem::size_of::<Self>()
            + self.name.len()
            + std::mem::size_of_val(self.translations.as_slice())
            + std::mem::size_of_val(self.rotations.as_slice())
            + std::mem::size_of_val(self.scales.as_slice())
            + links(&self.translation_links)
            + links(&self.rotation_links)
            + links(&self.scale_links)
    }
}
