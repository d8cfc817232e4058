//! Runtime skeleton: joint hierarchy and bind pose.

use log::debug;
use skel_math::{JointTransform, SimdFloat4, SoaTransform, soa_count};

use crate::error::{Result, RuntimeError};

/// Maximum number of joints in a skeleton.
pub const MAX_JOINTS: usize = 1024;

/// Parent index of root joints.
pub const NO_PARENT: i16 = -1;

/// Immutable joint hierarchy stored as flat arrays.
///
/// Joints are ordered so that every parent precedes its children, which lets
/// the local-to-model pass walk the hierarchy in a single forward loop.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Skeleton {
    joint_names: Vec<String>,
    joint_parents: Vec<i16>,
    bind_pose: Vec<SoaTransform>,
}

impl Skeleton {
    /// Builds a skeleton, checking the parent-before-child ordering and that
    /// bind pose rotations are unit quaternions.
    ///
    /// `bind_pose` holds one SoA block per four joints. Lanes past the last
    /// joint are reset to identity.
    pub fn new(
        joint_names: Vec<String>,
        joint_parents: Vec<i16>,
        mut bind_pose: Vec<SoaTransform>,
    ) -> Result<Self> {
        let num_joints = joint_parents.len();
        if joint_names.len() != num_joints {
            return Err(RuntimeError::InvalidSkeleton(format!(
                "{} names for {num_joints} joints",
                joint_names.len()
            )));
        }
        if num_joints > MAX_JOINTS {
            return Err(RuntimeError::InvalidSkeleton(format!(
                "{num_joints} joints exceed the maximum of {MAX_JOINTS}"
            )));
        }
        if bind_pose.len() != soa_count(num_joints) {
            return Err(RuntimeError::InvalidSkeleton(format!(
                "bind pose has {} blocks, expected {}",
                bind_pose.len(),
                soa_count(num_joints)
            )));
        }
        for (i, &parent) in joint_parents.iter().enumerate() {
            let valid = parent == NO_PARENT || (parent >= 0 && (parent as usize) < i);
            if !valid {
                return Err(RuntimeError::InvalidSkeleton(format!(
                    "joint {i} has parent {parent}, parents must precede their children"
                )));
            }
        }

        for joint in 0..num_joints {
            let rotation = bind_pose[joint / 4].lane(joint % 4).rotation;
            if !SimdFloat4(rotation).is_normalized4().are_all_true1() {
                return Err(RuntimeError::InvalidSkeleton(format!(
                    "joint {joint} bind rotation {rotation:?} is not normalized"
                )));
            }
        }

        for joint in num_joints..bind_pose.len() * 4 {
            bind_pose[joint / 4].set_lane(joint % 4, &JointTransform::IDENTITY);
        }

        debug!("Skeleton with {num_joints} joints");
        Ok(Self {
            joint_names,
            joint_parents,
            bind_pose,
        })
    }

    pub fn num_joints(&self) -> usize {
        self.joint_parents.len()
    }

    /// Number of SoA blocks covering all joints.
    pub fn num_soa_joints(&self) -> usize {
        soa_count(self.num_joints())
    }

    /// Parent index per joint, [`NO_PARENT`] for roots.
    pub fn joint_parents(&self) -> &[i16] {
        &self.joint_parents
    }

    pub fn joint_names(&self) -> &[String] {
        &self.joint_names
    }

    pub fn bind_pose(&self) -> &[SoaTransform] {
        &self.bind_pose
    }

    /// Whether no joint has `joint` as parent.
    pub fn is_leaf(&self, joint: usize) -> bool {
        let next = joint + 1;
        // Children always come after their parent.
        !self.joint_parents[next.min(self.num_joints())..]
            .iter()
            .any(|&p| p >= 0 && p as usize == joint)
    }

    /// Index of the first joint named `name`.
    pub fn find_joint(&self, name: &str) -> Option<usize> {
        self.joint_names.iter().position(|n| n == name)
    }

    /// Depth of every joint in the hierarchy, roots at 0.
    pub fn joint_depths(&self) -> Vec<usize> {
        let mut depths = Vec::with_capacity(self.num_joints());
        for &parent in &self.joint_parents {
            let depth = if parent < 0 { 0 } else { depths[parent as usize] + 1 };
            depths.push(depth);
        }
        depths
    }
}
