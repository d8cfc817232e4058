//! Weighted blending of local-transform poses.

use log::warn;
use skel_math::{SimdFloat4, SoaTransform};

use crate::error::{Result, RuntimeError};

/// Default weight below which a layer does not contribute.
pub const DEFAULT_THRESHOLD: f32 = 0.1;

/// One input pose and its weight.
#[derive(Debug, Clone, Copy)]
pub struct BlendingLayer<'a> {
    pub transform: &'a [SoaTransform],
    pub weight: f32,
}

impl<'a> BlendingLayer<'a> {
    pub fn new(transform: &'a [SoaTransform], weight: f32) -> Self {
        Self { transform, weight }
    }
}

/// Blends layers of local transforms into one pose.
///
/// Layers whose weight is below `threshold` are skipped. Translations and
/// scales are averaged by weight; rotations are accumulated in layer order by
/// successive normalized lerps. When the contributing weight sums to less than
/// `threshold`, the output is the bind pose.
#[derive(Debug)]
pub struct BlendingJob<'a> {
    pub threshold: f32,
    pub layers: &'a [BlendingLayer<'a>],
    pub bind_pose: Option<&'a [SoaTransform]>,
    pub output: Option<&'a mut [SoaTransform]>,
}

impl Default for BlendingJob<'_> {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            layers: &[],
            bind_pose: None,
            output: None,
        }
    }
}

impl<'a> BlendingJob<'a> {
    pub fn new(
        layers: &'a [BlendingLayer<'a>],
        bind_pose: &'a [SoaTransform],
        output: &'a mut [SoaTransform],
    ) -> Self {
        Self {
            layers,
            bind_pose: Some(bind_pose),
            output: Some(output),
            ..Self::default()
        }
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Checks the threshold and that every buffer covers the bind pose.
    pub fn validate(&self) -> Result<()> {
        if !(self.threshold > 0.0) {
            return Err(RuntimeError::InvalidThreshold(self.threshold));
        }
        let bind_pose = self.bind_pose.ok_or(RuntimeError::MissingInput("bind_pose"))?;
        let output = self
            .output
            .as_deref()
            .ok_or(RuntimeError::MissingInput("output"))?;

        let required = bind_pose.len();
        if output.len() < required {
            return Err(RuntimeError::BufferTooSmall {
                name: "output",
                required,
                actual: output.len(),
            });
        }
        if let Some((layer, l)) = self
            .layers
            .iter()
            .enumerate()
            .find(|(_, l)| l.transform.len() < required)
        {
            return Err(RuntimeError::LayerTooSmall {
                layer,
                required,
                actual: l.transform.len(),
            });
        }
        Ok(())
    }

    /// Runs the job. On error the output is left untouched.
    pub fn run(&mut self) -> Result<()> {
        if let Err(e) = self.validate() {
            warn!("Invalid blending job: {e}");
            return Err(e);
        }
        let (Some(bind_pose), Some(output)) = (self.bind_pose, self.output.as_deref_mut()) else {
            return Err(RuntimeError::MissingInput("blending job input"));
        };
        let num_soa_joints = bind_pose.len();
        let output = &mut output[..num_soa_joints];

        let threshold = self.threshold;
        let mut contributing = self.layers.iter().filter(move |l| l.weight >= threshold);
        let total_weight: f32 = contributing.clone().map(|l| l.weight).sum();
        if total_weight < threshold {
            output.copy_from_slice(bind_pose);
            return Ok(());
        }

        let Some(first) = contributing.next() else {
            output.copy_from_slice(bind_pose);
            return Ok(());
        };

        let weight = SimdFloat4::load1(first.weight);
        for (dst, src) in output.iter_mut().zip(first.transform) {
            *dst = SoaTransform {
                translation: src.translation * weight,
                rotation: src.rotation,
                scale: src.scale * weight,
            };
        }

        let mut accumulated = first.weight;
        for layer in contributing {
            let weight = SimdFloat4::load1(layer.weight);
            let alpha = SimdFloat4::load1(layer.weight / (accumulated + layer.weight));
            for (dst, src) in output.iter_mut().zip(layer.transform) {
                dst.translation = src.translation.madd(weight, &dst.translation);
                dst.scale = src.scale.madd(weight, &dst.scale);
                let rotation = src.rotation.align_to(&dst.rotation);
                dst.rotation = dst.rotation.nlerp(&rotation, alpha);
            }
            accumulated += layer.weight;
        }

        let inv = SimdFloat4::load1(accumulated);
        for dst in output.iter_mut() {
            dst.translation = dst.translation / inv;
            dst.scale = dst.scale / inv;
        }
        Ok(())
    }
}
