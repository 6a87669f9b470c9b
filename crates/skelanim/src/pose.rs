//! Pose evaluation: hierarchy composition and skinning matrices
//!
//! Turns an interpolated [`KeyFrame`] into one skinning matrix per bone. Bones
//! are visited in index order; the topological order of the [`Skeleton`]
//! guarantees each parent's root-space transform is ready before its
//! children need it.

use glam::Mat4;

use crate::convention;
use crate::error::{AnimError, Result};
use crate::keyframe::KeyFrame;
use crate::skeleton::Skeleton;

/// Per-bone matrices computed for one pose
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComputedBone {
    /// Bone transform in root space
    pub to_root: Mat4,
    /// `to_root` combined with the bone's offset, ready for skinning
    pub skinning: Mat4,
}

impl Default for ComputedBone {
    fn default() -> Self {
        Self {
            to_root: Mat4::IDENTITY,
            skinning: Mat4::IDENTITY,
        }
    }
}

/// Reusable evaluator with buffers sized to a skeleton
///
/// Buffers are allocated once in [`PoseEvaluator::new`]; evaluating a pose
/// for the same skeleton does not allocate.
#[derive(Debug, Clone)]
pub struct PoseEvaluator {
    to_root: Vec<Mat4>,
    finals: Vec<Mat4>,
}

impl PoseEvaluator {
    /// Create an evaluator for `skeleton`
    pub fn new(skeleton: &Skeleton) -> Self {
        Self::with_bone_count(skeleton.bone_count())
    }

    pub fn with_bone_count(bone_count: usize) -> Self {
        Self {
            to_root: vec![Mat4::IDENTITY; bone_count],
            finals: vec![Mat4::IDENTITY; bone_count],
        }
    }

    pub fn bone_count(&self) -> usize {
        self.finals.len()
    }

    /// Compute skinning matrices for `pose`
    ///
    /// The pose must describe exactly the skeleton's bones. On error the
    /// previous results are kept intact.
    pub fn evaluate(&mut self, skeleton: &Skeleton, pose: &KeyFrame) -> Result<&[Mat4]> {
        let bone_count = skeleton.bone_count();
        if pose.bone_count() != bone_count {
            return Err(AnimError::LengthMismatch {
                context: "pose bones",
                expected: bone_count,
                actual: pose.bone_count(),
            });
        }
        if self.finals.len() != bone_count {
            self.to_root.resize(bone_count, Mat4::IDENTITY);
            self.finals.resize(bone_count, Mat4::IDENTITY);
        }

        let locals = skeleton.bones().iter().zip(pose.local_transforms());
        for (i, (bone, local)) in locals.enumerate() {
            self.to_root[i] = match skeleton.parent(i) {
                Some(parent) => convention::compose_to_root(&self.to_root[parent], &local),
                None => local,
            };
            self.finals[i] = convention::skinning_matrix(&bone.offset, &self.to_root[i]);
        }

        Ok(&self.finals)
    }

    /// Skinning matrices from the last successful evaluation
    pub fn finals(&self) -> &[Mat4] {
        &self.finals
    }

    /// Root-space bone transforms from the last successful evaluation
    pub fn to_root(&self) -> &[Mat4] {
        &self.to_root
    }

    /// Both matrices for one bone
    pub fn computed_bone(&self, index: usize) -> Option<ComputedBone> {
        Some(ComputedBone {
            to_root: *self.to_root.get(index)?,
            skinning: *self.finals.get(index)?,
        })
    }
}

/// One-shot evaluation returning freshly allocated skinning matrices
pub fn compute_final_transforms(skeleton: &Skeleton, pose: &KeyFrame) -> Result<Vec<Mat4>> {
    let mut evaluator = PoseEvaluator::new(skeleton);
    evaluator.evaluate(skeleton, pose).map(<[Mat4]>::to_vec)
}
