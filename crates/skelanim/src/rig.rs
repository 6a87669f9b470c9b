//! Skeleton, skin, and clip bundled for per-tick evaluation

use glam::Mat4;
use log::debug;

use crate::animation::Animation;
use crate::error::{AnimError, Result};
use crate::keyframe::KeyFrame;
use crate::pose::PoseEvaluator;
use crate::skeleton::Skeleton;
use crate::skin::Skin;

/// A validated animated character
///
/// Construction checks that the skin and every keyframe match the skeleton,
/// so [`Rig::update`] can only fail on a bad time delta.
#[derive(Debug, Clone)]
pub struct Rig {
    name: String,
    skeleton: Skeleton,
    skin: Skin,
    animation: Animation,
    evaluator: PoseEvaluator,
    pose: KeyFrame,
}

impl Rig {
    pub fn new(
        name: impl Into<String>,
        skeleton: Skeleton,
        skin: Skin,
        animation: Animation,
    ) -> Result<Self> {
        let name = name.into();
        skin.validate_against(&skeleton)?;

        let key_bones = animation.bone_count().ok_or(AnimError::EmptyAnimation)?;
        if key_bones != skeleton.bone_count() {
            return Err(AnimError::LengthMismatch {
                context: "animation bones",
                expected: skeleton.bone_count(),
                actual: key_bones,
            });
        }

        debug!(
            "Rig '{}': {} bones, {} skin parts, {} keyframes",
            name,
            skeleton.bone_count(),
            skin.part_count(),
            animation.key_count()
        );

        let evaluator = PoseEvaluator::new(&skeleton);
        let pose = KeyFrame::identity(skeleton.bone_count());
        Ok(Self {
            name,
            skeleton,
            skin,
            animation,
            evaluator,
            pose,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    pub fn skin(&self) -> &Skin {
        &self.skin
    }

    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    pub fn animation_mut(&mut self) -> &mut Animation {
        &mut self.animation
    }

    /// Run one tick: advance the clip by `delta` seconds and evaluate the pose
    pub fn update(&mut self, delta: f32) -> Result<&[Mat4]> {
        self.animation.sample_into(delta, &mut self.pose)?;
        self.evaluator.evaluate(&self.skeleton, &self.pose)
    }

    /// Skinning matrices at an absolute clip time, leaving the cursor alone
    pub fn evaluate_at(&self, time: f32) -> Result<Vec<Mat4>> {
        let pose = self.animation.pose_at(time)?;
        let mut evaluator = PoseEvaluator::new(&self.skeleton);
        evaluator.evaluate(&self.skeleton, &pose)?;
        Ok(evaluator.finals().to_vec())
    }

    /// Pose interpolated by the last [`Rig::update`]
    pub fn current_pose(&self) -> &KeyFrame {
        &self.pose
    }

    /// Skinning matrices from the last [`Rig::update`]
    pub fn finals(&self) -> &[Mat4] {
        self.evaluator.finals()
    }

    /// Placement of every skin part under the last evaluated pose
    pub fn part_transforms(&self) -> Result<Vec<Mat4>> {
        self.skin.part_transforms(self.evaluator.finals())
    }
}
