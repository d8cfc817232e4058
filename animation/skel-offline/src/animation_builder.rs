//! Compaction of a [`RawAnimation`] into a runtime [`Animation`].
//!
//! Every channel goes through the same steps:
//!
//! 1. collect the keys of every track, synthesizing keys so that each track
//!    starts at time 0 and ends at the duration,
//! 2. add identity tracks up to the next multiple of four,
//! 3. fix up values (rotations only),
//! 4. sort all keys by `(time, track)`,
//! 5. quantize.

use glam::{Quat, Vec3, Vec4};
use log::{debug, trace};
use skel_math::{QuantizedQuaternion, SimdFloat4, float_to_half, soa_count};
use skel_runtime::{Animation, Float3Key, QuaternionKey};

use crate::error::Result;
use crate::raw_animation::{JointTrack, RawAnimation, RawKey, RotationKey, ScaleKey, TranslationKey};

/// A key being compacted.
#[derive(Debug, Clone, Copy)]
struct SortingKey<V> {
    track: u16,
    time: f32,
    value: V,
}

/// Per-channel behavior of the builder.
trait ChannelBuilder: RawKey {
    type Compact;

    fn identity() -> Self::Value;

    fn keys(track: &JointTrack) -> &[Self];

    /// Adjusts values while keys are still grouped by track.
    fn fix_up(_keys: &mut [SortingKey<Self::Value>]) {}

    fn compact(key: &SortingKey<Self::Value>) -> Self::Compact;
}

fn half3(v: Vec3) -> [u16; 3] {
    [float_to_half(v.x), float_to_half(v.y), float_to_half(v.z)]
}

impl ChannelBuilder for TranslationKey {
    type Compact = Float3Key;

    fn identity() -> Vec3 {
        Vec3::ZERO
    }

    fn keys(track: &JointTrack) -> &[Self] {
        &track.translations
    }

    fn compact(key: &SortingKey<Vec3>) -> Float3Key {
        Float3Key::new(key.time, key.track, half3(key.value))
    }
}

impl ChannelBuilder for ScaleKey {
    type Compact = Float3Key;

    fn identity() -> Vec3 {
        Vec3::ONE
    }

    fn keys(track: &JointTrack) -> &[Self] {
        &track.scales
    }

    fn compact(key: &SortingKey<Vec3>) -> Float3Key {
        Float3Key::new(key.time, key.track, half3(key.value))
    }
}

impl ChannelBuilder for RotationKey {
    type Compact = QuaternionKey;

    fn identity() -> Quat {
        Quat::IDENTITY
    }

    fn keys(track: &JointTrack) -> &[Self] {
        &track.rotations
    }

    /// Normalizes rotations and flips signs so that consecutive keys of a
    /// track are on the same hemisphere, and the first one has a positive w.
    fn fix_up(keys: &mut [SortingKey<Quat>]) {
        let mut previous: Option<(u16, SimdFloat4)> = None;
        for key in keys.iter_mut() {
            let mut q = normalize_rotation(key.value);
            let flip = match previous {
                Some((track, prev)) if track == key.track => prev.dot4(q).get_x() < 0.0,
                // w is the dot product with identity.
                _ => q.get_w() < 0.0,
            };
            if flip {
                q = -q;
            }
            key.value = q.into();
            previous = Some((key.track, q));
        }
    }

    fn compact(key: &SortingKey<Quat>) -> QuaternionKey {
        QuaternionKey::new(
            key.time,
            key.track,
            QuantizedQuaternion::quantize(key.value.into()),
        )
    }
}

/// Unit quaternion of `q`, identity when `q` is zero. Already normalized
/// values are returned unchanged.
///
/// Components are rescaled by the largest one first, so that the squared
/// length neither overflows nor underflows.
pub(crate) fn normalize_rotation(q: Quat) -> SimdFloat4 {
    let simd = SimdFloat4::from(q);
    if simd.is_normalized4().are_all_true1() {
        return simd;
    }
    let v = Vec4::from(q);
    let largest = v.abs().max_element();
    if !(largest > 0.0 && largest.is_finite()) {
        return SimdFloat4::W_AXIS;
    }
    SimdFloat4::from(v / largest).normalize_safe4(SimdFloat4::W_AXIS)
}

/// Appends the keys of one track, with keys at 0 and `duration`.
fn push_track<K: ChannelBuilder>(
    out: &mut Vec<SortingKey<K::Value>>,
    track: u16,
    src: &[K],
    duration: f32,
) {
    let key = |time: f32, value| SortingKey { track, time, value };
    match src {
        [] => {
            out.push(key(0.0, K::identity()));
            out.push(key(duration, K::identity()));
        }
        [single] => {
            out.push(key(0.0, single.value()));
            out.push(key(duration, single.value()));
        }
        [first, .., last] => {
            if first.time() != 0.0 {
                out.push(key(0.0, first.value()));
            }
            // Folds -0 into +0 so that sorting matches float equality.
            out.extend(src.iter().map(|k| key(k.time() + 0.0, k.value())));
            if last.time() != duration {
                out.push(key(duration, last.value()));
            }
        }
    }
}

fn build_channel<K: ChannelBuilder>(raw: &RawAnimation, num_padded_tracks: usize) -> Vec<K::Compact> {
    let capacity = raw
        .tracks
        .iter()
        .map(|t| K::keys(t).len() + 2)
        .sum::<usize>()
        + (num_padded_tracks - raw.tracks.len()) * 2;
    let mut keys = Vec::with_capacity(capacity);

    for track in 0..num_padded_tracks {
        let src = raw.tracks.get(track).map_or(&[][..], K::keys);
        let start = keys.len();
        push_track(&mut keys, track as u16, src, raw.duration);
        trace!(
            "Track {track} {}: {} raw keys, {} compacted",
            K::CHANNEL,
            src.len(),
            keys.len() - start
        );
    }

    K::fix_up(&mut keys);
    keys.sort_by(|a, b| a.time.total_cmp(&b.time).then(a.track.cmp(&b.track)));
    keys.iter().map(K::compact).collect()
}

/// Builds runtime animations from raw animations.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnimationBuilder;

impl AnimationBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Validates `raw` and compacts it.
    ///
    /// Fails only when validation fails, before anything is allocated.
    pub fn build(&self, raw: &RawAnimation) -> Result<Animation> {
        raw.validate()?;

        let num_tracks = raw.num_tracks();
        let num_padded_tracks = soa_count(num_tracks) * 4;
        let translations = build_channel::<TranslationKey>(raw, num_padded_tracks);
        let rotations = build_channel::<RotationKey>(raw, num_padded_tracks);
        let scales = build_channel::<ScaleKey>(raw, num_padded_tracks);

        debug!(
            "Built animation '{}': {num_tracks} tracks, {} translation / {} rotation / {} scale keys",
            raw.name,
            translations.len(),
            rotations.len(),
            scales.len()
        );
        Ok(Animation::new(
            raw.name.clone(),
            raw.duration,
            num_tracks,
            translations,
            rotations,
            scales,
        )?)
    }
}
