//! Authored skeleton: a tree of named joints with bind pose transforms.

use glam::{Quat, Vec3};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{OfflineError, Result};

/// Maximum number of joints.
pub const MAX_JOINTS: usize = skel_runtime::MAX_JOINTS;

/// Local bind pose of a joint, relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RawTransform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl RawTransform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn is_finite(&self) -> bool {
        self.translation.is_finite() && self.rotation.is_finite() && self.scale.is_finite()
    }
}

impl Default for RawTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawJoint {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub transform: RawTransform,
    #[cfg_attr(feature = "serde", serde(default))]
    pub children: Vec<RawJoint>,
}

impl RawJoint {
    pub fn new(name: impl Into<String>, transform: RawTransform) -> Self {
        Self {
            name: name.into(),
            transform,
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }
}

/// An authored joint hierarchy, the input of [`crate::SkeletonBuilder`].
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawSkeleton {
    pub roots: Vec<RawJoint>,
}

impl RawSkeleton {
    /// Visits joints depth-first, parents before children.
    ///
    /// The callback receives the joint and the index of its parent in visit
    /// order, `None` for roots.
    pub fn iter_depth_first<F>(&self, mut f: F)
    where
        F: FnMut(&RawJoint, Option<usize>),
    {
        fn visit<F: FnMut(&RawJoint, Option<usize>)>(
            joint: &RawJoint,
            parent: Option<usize>,
            next_index: &mut usize,
            f: &mut F,
        ) {
            let index = *next_index;
            *next_index += 1;
            f(joint, parent);
            for child in &joint.children {
                visit(child, Some(index), next_index, f);
            }
        }

        let mut next_index = 0;
        for root in &self.roots {
            visit(root, None, &mut next_index, &mut f);
        }
    }

    pub fn num_joints(&self) -> usize {
        let mut count = 0;
        self.iter_depth_first(|_, _| count += 1);
        count
    }

    /// Checks the joint count and bind pose values.
    pub fn validate(&self) -> Result<()> {
        let count = self.num_joints();
        if count > MAX_JOINTS {
            return Err(OfflineError::TooManyJoints {
                count,
                max: MAX_JOINTS,
            });
        }
        let mut invalid = None;
        self.iter_depth_first(|joint, _| {
            if invalid.is_none() && !joint.transform.is_finite() {
                invalid = Some(joint.name.clone());
            }
        });
        match invalid {
            Some(name) => Err(OfflineError::InvalidJointTransform(name)),
            None => Ok(()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Parses a JSON description.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
