//! Sampling of a runtime animation at a given time.
//!
//! A [`SamplingCache`] keeps, per track and per channel, a cursor on the key
//! that starts the interval containing the last sampled time. Playback moves
//! time forward by small steps, so cursors usually advance by zero or one key
//! per frame and sampling never searches the key sequences.

use log::{trace, warn};
use skel_math::{SimdFloat4, SoaFloat3, SoaQuaternion, SoaTransform, soa_count};

use crate::animation::{Animation, Float3Key, KeyLinks, Keyframe, NO_KEY, QuaternionKey};
use crate::error::{Result, RuntimeError};

/// Cursors of one channel.
#[derive(Debug, Clone, Default)]
struct ChannelCursors {
    /// Per track, index of the key starting the current interval.
    cursors: Vec<u32>,
    /// Per SoA block, bit mask of lanes whose interpolation keys must be
    /// reloaded.
    outdated: Vec<u8>,
}

impl ChannelCursors {
    fn with_capacity(num_soa_tracks: usize) -> Self {
        Self {
            cursors: vec![NO_KEY; num_soa_tracks * 4],
            outdated: vec![0; num_soa_tracks],
        }
    }

    fn rewind(&mut self, links: &KeyLinks) {
        self.cursors.fill(NO_KEY);
        self.cursors[..links.first.len()].copy_from_slice(&links.first);
        let blocks = links.first.len() / 4;
        self.outdated.fill(0);
        self.outdated[..blocks].fill(0xf);
    }

    /// Moves the cursors of the first `num_tracks` tracks so that each one
    /// brackets `time`.
    fn seek<K: Keyframe>(&mut self, keys: &[K], links: &KeyLinks, time: f32) {
        let num_tracks = links.first.len();
        for (track, cursor) in self.cursors[..num_tracks].iter_mut().enumerate() {
            let mut key = *cursor as usize;
            loop {
                let next = links.next[key];
                if next == NO_KEY || keys[next as usize].time() > time {
                    break;
                }
                key = next as usize;
            }
            // Keys at time 0 bound the backward walk.
            while keys[key].time() > time {
                key = links.prev[key] as usize;
            }
            // The last key of a track only closes the final interval.
            if links.next[key] == NO_KEY {
                key = links.prev[key] as usize;
            }

            let key = key as u32;
            if key != *cursor {
                *cursor = key;
                self.outdated[track / 4] |= 1 << (track % 4);
            }
        }
    }
}

/// Keys bracketing the current time for four tracks, decoded.
#[derive(Debug, Clone, Copy, Default)]
struct InterpSoaFloat3 {
    time: [SimdFloat4; 2],
    value: [SoaFloat3; 2],
}

#[derive(Debug, Clone, Copy, Default)]
struct InterpSoaQuaternion {
    time: [SimdFloat4; 2],
    value: [SoaQuaternion; 2],
}

/// Per-consumer sampling state.
///
/// A cache is sized for the largest animation it will sample, usually the
/// skeleton joint count. It remembers which animation it was last used with
/// and rewinds itself when bound to another one.
#[derive(Debug, Clone, Default)]
pub struct SamplingCache {
    animation_id: Option<u64>,
    num_soa_tracks: usize,
    translations: ChannelCursors,
    rotations: ChannelCursors,
    scales: ChannelCursors,
    translation_interp: Vec<InterpSoaFloat3>,
    rotation_interp: Vec<InterpSoaQuaternion>,
    scale_interp: Vec<InterpSoaFloat3>,
}

impl SamplingCache {
    /// Creates a cache able to sample animations of up to `max_tracks` tracks.
    pub fn new(max_tracks: usize) -> Self {
        let num_soa_tracks = soa_count(max_tracks);
        Self {
            animation_id: None,
            num_soa_tracks,
            translations: ChannelCursors::with_capacity(num_soa_tracks),
            rotations: ChannelCursors::with_capacity(num_soa_tracks),
            scales: ChannelCursors::with_capacity(num_soa_tracks),
            translation_interp: vec![InterpSoaFloat3::default(); num_soa_tracks],
            rotation_interp: vec![InterpSoaQuaternion::default(); num_soa_tracks],
            scale_interp: vec![InterpSoaFloat3::default(); num_soa_tracks],
        }
    }

    /// Resizes the cache. Any binding is dropped.
    pub fn resize(&mut self, max_tracks: usize) {
        *self = Self::new(max_tracks);
    }

    /// Number of tracks the cache can hold, a multiple of four.
    pub fn max_tracks(&self) -> usize {
        self.num_soa_tracks * 4
    }

    /// Id of the animation the cursors refer to, if any.
    pub fn bound_animation(&self) -> Option<u64> {
        self.animation_id
    }

    /// Forgets the bound animation. The next sampling rewinds all cursors.
    pub fn invalidate(&mut self) {
        self.animation_id = None;
    }

    fn bind(&mut self, animation: &Animation) {
        if self.animation_id == Some(animation.id()) {
            return;
        }
        trace!("Binding sampling cache to animation '{}'", animation.name());
        self.animation_id = Some(animation.id());
        self.translations.rewind(&animation.translation_links);
        self.rotations.rewind(&animation.rotation_links);
        self.scales.rewind(&animation.scale_links);
    }
}

fn reload_float3(
    keys: &[Float3Key],
    links: &KeyLinks,
    cursors: &mut ChannelCursors,
    interp: &mut [InterpSoaFloat3],
) {
    for (block, (mask, interp)) in cursors.outdated.iter_mut().zip(interp).enumerate() {
        for lane in (0..4usize).filter(|&lane| *mask & (1 << lane) != 0) {
            let left = cursors.cursors[block * 4 + lane] as usize;
            let right = links.next[left] as usize;
            for (side, key) in [&keys[left], &keys[right]].into_iter().enumerate() {
                interp.time[side].0[lane] = key.time();
                interp.value[side].set_lane(lane, key.decode());
            }
        }
        *mask = 0;
    }
}

fn reload_quaternion(
    keys: &[QuaternionKey],
    links: &KeyLinks,
    cursors: &mut ChannelCursors,
    interp: &mut [InterpSoaQuaternion],
) {
    for (block, (mask, interp)) in cursors.outdated.iter_mut().zip(interp).enumerate() {
        for lane in (0..4usize).filter(|&lane| *mask & (1 << lane) != 0) {
            let left = cursors.cursors[block * 4 + lane] as usize;
            let right = links.next[left] as usize;
            for (side, key) in [&keys[left], &keys[right]].into_iter().enumerate() {
                interp.time[side].0[lane] = key.time();
                interp.value[side].set_lane(lane, key.decode().0);
            }
        }
        *mask = 0;
    }
}

#[inline]
fn interval_alpha(time: SimdFloat4, bounds: &[SimdFloat4; 2]) -> SimdFloat4 {
    (time - bounds[0]) / (bounds[1] - bounds[0])
}

/// Samples an animation into a buffer of local transforms.
///
/// Configure the fields, then call [`SamplingJob::run`]. The output must hold
/// at least one block per four animation tracks; extra blocks are untouched.
#[derive(Debug, Default)]
pub struct SamplingJob<'a> {
    pub animation: Option<&'a Animation>,
    pub cache: Option<&'a mut SamplingCache>,
    /// Time in seconds, clamped to the animation duration.
    pub time: f32,
    pub output: Option<&'a mut [SoaTransform]>,
}

impl<'a> SamplingJob<'a> {
    pub fn new(
        animation: &'a Animation,
        cache: &'a mut SamplingCache,
        time: f32,
        output: &'a mut [SoaTransform],
    ) -> Self {
        Self {
            animation: Some(animation),
            cache: Some(cache),
            time,
            output: Some(output),
        }
    }

    /// Checks that every input is set and every buffer is large enough.
    pub fn validate(&self) -> Result<()> {
        let animation = self.animation.ok_or(RuntimeError::MissingInput("animation"))?;
        let cache = self
            .cache
            .as_deref()
            .ok_or(RuntimeError::MissingInput("cache"))?;
        let output = self
            .output
            .as_deref()
            .ok_or(RuntimeError::MissingInput("output"))?;

        let required = animation.num_soa_tracks();
        if cache.num_soa_tracks < required {
            return Err(RuntimeError::CacheTooSmall {
                required: required * 4,
                capacity: cache.max_tracks(),
            });
        }
        if output.len() < required {
            return Err(RuntimeError::BufferTooSmall {
                name: "output",
                required,
                actual: output.len(),
            });
        }
        Ok(())
    }

    /// Runs the job. On error the output is left untouched.
    pub fn run(&mut self) -> Result<()> {
        if let Err(e) = self.validate() {
            warn!("Invalid sampling job: {e}");
            return Err(e);
        }
        let (Some(animation), Some(cache), Some(output)) = (
            self.animation,
            self.cache.as_deref_mut(),
            self.output.as_deref_mut(),
        ) else {
            return Err(RuntimeError::MissingInput("sampling job input"));
        };

        let time = if self.time.is_nan() {
            0.0
        } else {
            self.time.clamp(0.0, animation.duration())
        };
        let num_soa_tracks = animation.num_soa_tracks();

        cache.bind(animation);
        cache
            .translations
            .seek(animation.translations(), &animation.translation_links, time);
        cache
            .rotations
            .seek(animation.rotations(), &animation.rotation_links, time);
        cache
            .scales
            .seek(animation.scales(), &animation.scale_links, time);

        reload_float3(
            animation.translations(),
            &animation.translation_links,
            &mut cache.translations,
            &mut cache.translation_interp[..num_soa_tracks],
        );
        reload_quaternion(
            animation.rotations(),
            &animation.rotation_links,
            &mut cache.rotations,
            &mut cache.rotation_interp[..num_soa_tracks],
        );
        reload_float3(
            animation.scales(),
            &animation.scale_links,
            &mut cache.scales,
            &mut cache.scale_interp[..num_soa_tracks],
        );

        let time = SimdFloat4::load1(time);
        for (i, out) in output[..num_soa_tracks].iter_mut().enumerate() {
            let t = &cache.translation_interp[i];
            let r = &cache.rotation_interp[i];
            let s = &cache.scale_interp[i];
            *out = SoaTransform {
                translation: t.value[0].lerp(&t.value[1], interval_alpha(time, &t.time)),
                rotation: r.value[0].nlerp(&r.value[1], interval_alpha(time, &r.time)),
                scale: s.value[0].lerp(&s.value[1], interval_alpha(time, &s.time)),
            };
        }
        Ok(())
    }
}
