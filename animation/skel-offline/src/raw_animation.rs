//! Authored animation: per-joint keyframe tracks at arbitrary times.

use glam::{Quat, Vec3};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Channel, OfflineError, Result};

/// Maximum number of joint tracks.
pub const MAX_TRACKS: usize = skel_runtime::MAX_TRACKS;

/// Common shape of raw keys, used by validation and building.
pub trait RawKey: Copy {
    type Value: Copy;

    const CHANNEL: Channel;

    fn time(&self) -> f32;
    fn value(&self) -> Self::Value;
    fn is_finite(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TranslationKey {
    pub time: f32,
    pub value: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RotationKey {
    pub time: f32,
    /// Need not be normalized; the builder normalizes it.
    pub value: Quat,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScaleKey {
    pub time: f32,
    pub value: Vec3,
}

impl RawKey for TranslationKey {
    type Value = Vec3;
    const CHANNEL: Channel = Channel::Translation;

    fn time(&self) -> f32 {
        self.time
    }

    fn value(&self) -> Vec3 {
        self.value
    }

    fn is_finite(&self) -> bool {
        self.value.is_finite()
    }
}

impl RawKey for RotationKey {
    type Value = Quat;
    const CHANNEL: Channel = Channel::Rotation;

    fn time(&self) -> f32 {
        self.time
    }

    fn value(&self) -> Quat {
        self.value
    }

    fn is_finite(&self) -> bool {
        self.value.is_finite()
    }
}

impl RawKey for ScaleKey {
    type Value = Vec3;
    const CHANNEL: Channel = Channel::Scale;

    fn time(&self) -> f32 {
        self.time
    }

    fn value(&self) -> Vec3 {
        self.value
    }

    fn is_finite(&self) -> bool {
        self.value.is_finite()
    }
}

/// Keyframes of one joint, one independent list per channel.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct JointTrack {
    pub translations: Vec<TranslationKey>,
    pub rotations: Vec<RotationKey>,
    pub scales: Vec<ScaleKey>,
}

/// An authored animation, the input of [`crate::AnimationBuilder`].
///
/// Track `i` animates joint `i` of the skeleton the animation is played on.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawAnimation {
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    pub duration: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tracks: Vec<JointTrack>,
}

fn validate_keys<K: RawKey>(track: usize, keys: &[K], duration: f32) -> Result<()> {
    let mut previous = None;
    for (index, key) in keys.iter().enumerate() {
        let time = key.time();
        if !(0.0..=duration).contains(&time) {
            return Err(OfflineError::KeyTimeOutOfRange {
                track,
                channel: K::CHANNEL,
                key: index,
                time,
                duration,
            });
        }
        if let Some(previous) = previous.filter(|&p| time <= p) {
            return Err(OfflineError::UnsortedKeys {
                track,
                channel: K::CHANNEL,
                key: index,
                time,
                previous,
            });
        }
        if !key.is_finite() {
            return Err(OfflineError::InvalidKeyValue {
                track,
                channel: K::CHANNEL,
                key: index,
            });
        }
        previous = Some(time);
    }
    Ok(())
}

impl RawAnimation {
    pub fn new(name: impl Into<String>, duration: f32, num_tracks: usize) -> Self {
        Self {
            name: name.into(),
            duration,
            tracks: vec![JointTrack::default(); num_tracks],
        }
    }

    pub fn num_tracks(&self) -> usize {
        self.tracks.len()
    }

    /// Checks that the animation can be compacted.
    ///
    /// The duration must be positive, the track count at most [`MAX_TRACKS`],
    /// and every key time within `[0, duration]` and strictly greater than
    /// the previous key time of the same channel.
    pub fn validate(&self) -> Result<()> {
        if !(self.duration > 0.0 && self.duration.is_finite()) {
            return Err(OfflineError::InvalidDuration(self.duration));
        }
        if self.tracks.len() > MAX_TRACKS {
            return Err(OfflineError::TooManyTracks {
                count: self.tracks.len(),
                max: MAX_TRACKS,
            });
        }
        for (index, track) in self.tracks.iter().enumerate() {
            validate_keys(index, &track.translations, self.duration)?;
            validate_keys(index, &track.rotations, self.duration)?;
            validate_keys(index, &track.scales, self.duration)?;
        }
        Ok(())
    }

    /// Whether [`Self::validate`] succeeds.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Parses a JSON description.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
