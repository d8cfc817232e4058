//! Frame by frame playback of blended layers

use anyhow::{Context, Result, bail};
use log::{debug, info};
use skel_math::{Float4x4, SoaTransform};
use skel_runtime::{
    Animation, BlendRatio, BlendingJob, BlendingLayer, LocalToModelJob, PlaybackController,
    SamplingCache, SamplingJob, Skeleton,
};

use crate::cli::BlendArgs;

use super::{check_compatible, load_animation, load_skeleton, print_joint_positions};

/// Everything one blend layer owns across frames.
struct Layer {
    animation: Animation,
    controller: PlaybackController,
    cache: SamplingCache,
    locals: Vec<SoaTransform>,
    weight: f32,
}

impl Layer {
    fn new(animation: Animation, skeleton: &Skeleton) -> Self {
        Self {
            animation,
            controller: PlaybackController::new(),
            cache: SamplingCache::new(skeleton.num_joints()),
            locals: vec![SoaTransform::IDENTITY; skeleton.num_soa_joints()],
            weight: 1.0,
        }
    }

    fn advance(&mut self, dt: f32) -> Result<()> {
        self.controller.update(&self.animation, dt);
        SamplingJob::new(
            &self.animation,
            &mut self.cache,
            self.controller.time(),
            &mut self.locals,
        )
        .run()
        .with_context(|| format!("Sampling '{}' failed", self.animation.name()))
    }
}

/// Set layer weights and speeds from explicit weights or a blend ratio.
fn configure(layers: &mut [Layer], args: &BlendArgs) -> Result<()> {
    if let Some(weights) = &args.weights {
        if weights.len() != layers.len() {
            bail!(
                "{} weights given for {} animations",
                weights.len(),
                layers.len()
            );
        }
        for (layer, &weight) in layers.iter_mut().zip(weights) {
            layer.weight = weight;
        }
    } else if let Some(ratio) = args.ratio {
        let durations: Vec<f32> = layers.iter().map(|l| l.animation.duration()).collect();
        let blend = BlendRatio::compute(ratio, &durations);
        for ((layer, weight), speed) in layers.iter_mut().zip(blend.weights).zip(blend.speeds) {
            layer.weight = weight;
            layer.controller.set_playback_speed(speed);
        }
    }
    for layer in layers.iter() {
        debug!(
            "Layer '{}': weight {}, speed {}",
            layer.animation.name(),
            layer.weight,
            layer.controller.playback_speed()
        );
    }
    Ok(())
}

#[cfg(feature = "parallel")]
fn advance_all(layers: &mut [Layer], dt: f32) -> Result<()> {
    use rayon::prelude::*;
    layers.par_iter_mut().try_for_each(|layer| layer.advance(dt))
}

#[cfg(not(feature = "parallel"))]
fn advance_all(layers: &mut [Layer], dt: f32) -> Result<()> {
    layers.iter_mut().try_for_each(|layer| layer.advance(dt))
}

pub fn execute(args: BlendArgs) -> Result<()> {
    let skeleton = load_skeleton(&args.skeleton)?;
    let mut layers = Vec::with_capacity(args.animations.len());
    for path in &args.animations {
        let animation = load_animation(path)?;
        check_compatible(&skeleton, &animation)?;
        layers.push(Layer::new(animation, &skeleton));
    }
    configure(&mut layers, &args)?;

    let mut blended = vec![SoaTransform::IDENTITY; skeleton.num_soa_joints()];
    let mut models = vec![Float4x4::IDENTITY; skeleton.num_joints()];

    info!("Playing {} frames of {}s", args.frames, args.dt);
    for frame in 0..args.frames {
        advance_all(&mut layers, args.dt)?;

        let blend_layers: Vec<BlendingLayer<'_>> = layers
            .iter()
            .map(|layer| BlendingLayer::new(&layer.locals, layer.weight))
            .collect();
        BlendingJob::new(&blend_layers, skeleton.bind_pose(), &mut blended)
            .with_threshold(args.threshold)
            .run()
            .with_context(|| format!("Blending failed at frame {frame}"))?;

        LocalToModelJob::new(&skeleton, &blended, &mut models)
            .run()
            .with_context(|| format!("Local-to-model conversion failed at frame {frame}"))?;
    }

    print_joint_positions(&skeleton, &models, args.format)
}
