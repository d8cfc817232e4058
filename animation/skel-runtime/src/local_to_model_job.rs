//! Conversion of local joint transforms to model-space matrices.

use log::warn;
use skel_math::{Float4x4, SoaFloat4x4, SoaTransform};

use crate::error::{Result, RuntimeError};
use crate::skeleton::Skeleton;

/// Walks the skeleton hierarchy to compute one model-space matrix per joint.
///
/// Roots take their local matrix; every other joint is its parent's model
/// matrix times its own local matrix. Parents precede children in the
/// skeleton, so one forward pass is enough.
#[derive(Debug, Default)]
pub struct LocalToModelJob<'a> {
    pub skeleton: Option<&'a Skeleton>,
    pub input: Option<&'a [SoaTransform]>,
    pub output: Option<&'a mut [Float4x4]>,
}

impl<'a> LocalToModelJob<'a> {
    pub fn new(skeleton: &'a Skeleton, input: &'a [SoaTransform], output: &'a mut [Float4x4]) -> Self {
        Self {
            skeleton: Some(skeleton),
            input: Some(input),
            output: Some(output),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let skeleton = self.skeleton.ok_or(RuntimeError::MissingInput("skeleton"))?;
        let input = self.input.ok_or(RuntimeError::MissingInput("input"))?;
        let output = self
            .output
            .as_deref()
            .ok_or(RuntimeError::MissingInput("output"))?;

        if input.len() < skeleton.num_soa_joints() {
            return Err(RuntimeError::BufferTooSmall {
                name: "input",
                required: skeleton.num_soa_joints(),
                actual: input.len(),
            });
        }
        if output.len() < skeleton.num_joints() {
            return Err(RuntimeError::BufferTooSmall {
                name: "output",
                required: skeleton.num_joints(),
                actual: output.len(),
            });
        }
        Ok(())
    }

    /// Runs the job. On error the output is left untouched.
    pub fn run(&mut self) -> Result<()> {
        if let Err(e) = self.validate() {
            warn!("Invalid local-to-model job: {e}");
            return Err(e);
        }
        let (Some(skeleton), Some(input), Some(output)) =
            (self.skeleton, self.input, self.output.as_deref_mut())
        else {
            return Err(RuntimeError::MissingInput("local-to-model job input"));
        };

        let parents = skeleton.joint_parents();
        for (block, local) in input[..skeleton.num_soa_joints()].iter().enumerate() {
            let matrices =
                SoaFloat4x4::from_affine(&local.translation, &local.rotation, &local.scale).to_aos();
            let first = block * 4;
            let last = (first + 4).min(skeleton.num_joints());
            for (joint, local) in (first..last).zip(matrices) {
                output[joint] = match usize::try_from(parents[joint]) {
                    Ok(parent) => output[parent] * local,
                    Err(_) => local,
                };
            }
        }
        Ok(())
    }
}
