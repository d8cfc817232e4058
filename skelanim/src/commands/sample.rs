//! Single animation sampling

use anyhow::{Context, Result};
use log::info;
use skel_math::{Float4x4, SoaTransform};
use skel_runtime::{LocalToModelJob, SamplingCache, SamplingJob};

use crate::cli::SampleArgs;

use super::{check_compatible, load_animation, load_skeleton, print_joint_positions};

pub fn execute(args: SampleArgs) -> Result<()> {
    let skeleton = load_skeleton(&args.skeleton)?;
    let animation = load_animation(&args.animation)?;
    check_compatible(&skeleton, &animation)?;

    let mut cache = SamplingCache::new(skeleton.num_joints());
    let mut locals = vec![SoaTransform::IDENTITY; skeleton.num_soa_joints()];
    let mut models = vec![Float4x4::IDENTITY; skeleton.num_joints()];

    info!("Sampling '{}' at {}s", animation.name(), args.time);
    SamplingJob::new(&animation, &mut cache, args.time, &mut locals)
        .run()
        .context("Sampling failed")?;
    LocalToModelJob::new(&skeleton, &locals, &mut models)
        .run()
        .context("Local-to-model conversion failed")?;

    print_joint_positions(&skeleton, &models, args.format)
}
