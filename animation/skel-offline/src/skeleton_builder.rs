//! Flattening of a [`RawSkeleton`] tree into a runtime [`Skeleton`].

use log::debug;
use skel_math::{JointTransform, SoaTransform, soa_count};
use skel_runtime::{NO_PARENT, Skeleton};

use crate::animation_builder::normalize_rotation;
use crate::error::Result;
use crate::raw_skeleton::RawSkeleton;

/// Builds runtime skeletons from raw skeletons.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkeletonBuilder;

impl SkeletonBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Validates `raw` and flattens it depth-first, so that every joint comes
    /// after its parent. Bind rotations are normalized, zero ones become
    /// identity. Padding lanes of the bind pose are identity.
    pub fn build(&self, raw: &RawSkeleton) -> Result<Skeleton> {
        raw.validate()?;

        let num_joints = raw.num_joints();
        let mut names = Vec::with_capacity(num_joints);
        let mut parents = Vec::with_capacity(num_joints);
        let mut bind_pose = vec![SoaTransform::IDENTITY; soa_count(num_joints)];

        raw.iter_depth_first(|joint, parent| {
            let index = names.len();
            names.push(joint.name.clone());
            // Indices fit: the joint count is bounded by validation.
            parents.push(parent.map_or(NO_PARENT, |p| p as i16));
            let t = &joint.transform;
            bind_pose[index / 4].set_lane(
                index % 4,
                &JointTransform {
                    translation: t.translation.to_array(),
                    rotation: normalize_rotation(t.rotation).0,
                    scale: t.scale.to_array(),
                },
            );
        });

        debug!("Built skeleton with {num_joints} joints");
        Ok(Skeleton::new(names, parents, bind_pose)?)
    }
}
