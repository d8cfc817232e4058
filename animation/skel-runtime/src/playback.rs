//! Playback time control and blend-ratio synchronisation.

use crate::animation::Animation;

/// Advances an animation time with wall-clock deltas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackController {
    time: f32,
    playback_speed: f32,
    playing: bool,
    looping: bool,
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self {
            time: 0.0,
            playback_speed: 1.0,
            playing: true,
            looping: true,
        }
    }
}

impl PlaybackController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current time in seconds.
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn set_time(&mut self, time: f32) {
        self.time = time;
    }

    pub fn playback_speed(&self) -> f32 {
        self.playback_speed
    }

    /// Negative speeds play backward.
    pub fn set_playback_speed(&mut self, speed: f32) {
        self.playback_speed = speed;
    }

    pub fn playing(&self) -> bool {
        self.playing
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    pub fn looping(&self) -> bool {
        self.looping
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    /// Advances time by `dt * speed`. Looping wraps into `[0, duration)`,
    /// otherwise time is clamped to `[0, duration]`.
    pub fn update(&mut self, animation: &Animation, dt: f32) {
        if !self.playing {
            return;
        }
        let duration = animation.duration();
        let new_time = self.time + dt * self.playback_speed;
        self.time = if self.looping {
            let wrapped = new_time - (new_time / duration).floor() * duration;
            // Rounding can land exactly on duration for tiny negative times
            if wrapped >= duration { 0.0 } else { wrapped }
        } else {
            new_time.clamp(0.0, duration)
        };
    }

    /// Rewinds to time 0 with default speed, playing and looping.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Layer weights and playback speeds derived from a single blend ratio.
///
/// Layers are spread evenly over `[0, 1]`; each one gets a triangular weight
/// peaking at its position. The two layers around the ratio define a common
/// loop duration, and every layer's speed is scaled so that all of them
/// complete a cycle in that duration.
#[derive(Debug, Clone, PartialEq)]
pub struct BlendRatio {
    pub weights: Vec<f32>,
    pub speeds: Vec<f32>,
}

impl BlendRatio {
    /// Computes weights and speeds for layers of the given durations.
    pub fn compute(ratio: f32, durations: &[f32]) -> Self {
        let num_layers = durations.len();
        if num_layers < 2 {
            return Self {
                weights: vec![1.0; num_layers],
                speeds: vec![1.0; num_layers],
            };
        }

        let ratio = ratio.clamp(0.0, 1.0);
        let num_intervals = (num_layers - 1) as f32;
        let interval = 1.0 / num_intervals;
        let weights: Vec<f32> = (0..num_layers)
            .map(|i| {
                let x = ratio - i as f32 * interval;
                let y = ((if x < 0.0 { x } else { -x }) + interval) * num_intervals;
                y.max(0.0)
            })
            .collect();

        // Stays below 1 so that `left + 1` is a valid layer.
        let left = (((ratio - 1e-3) * num_intervals).max(0.0) as usize).min(num_layers - 2);
        let right = left + 1;
        let loop_duration = durations[left] * weights[left] + durations[right] * weights[right];

        let speeds = durations
            .iter()
            .map(|&d| if loop_duration > 0.0 { d / loop_duration } else { 1.0 })
            .collect();
        Self { weights, speeds }
    }
}
