//! Built-in five-bone arm rig
//!
//! A root with two arms, each ending in a hand, skinned with one cylinder per
//! bone. The clip swings the arms forward, back to rest, backward, and back to
//! rest again over four seconds.

use std::f32::consts::PI;

use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::animation::{Animation, PlaybackOptions};
use crate::convention;
use crate::error::Result;
use crate::keyframe::KeyFrame;
use crate::rig::Rig;
use crate::skeleton::SkeletonBuilder;
use crate::skin::{Skin, SkinPart};

/// Mesh every part of the demo skin draws
pub const DEMO_MESH: &str = "cylinder";

/// Bone names of the demo skeleton, in index order
pub const DEMO_BONES: [&str; 5] = ["root", "left_arm", "right_arm", "left_hand", "right_hand"];

/// Parent indices of the demo skeleton
pub const DEMO_PARENTS: [i32; 5] = [-1, 0, 0, 1, 2];

/// Seconds between demo keyframes
pub const DEMO_INTERVAL: f32 = 1.0;

/// Quaternion from pitch (X), yaw (Y), and roll (Z) angles; roll applies first
pub fn pitch_yaw_roll(pitch: f32, yaw: f32, roll: f32) -> Quat {
    Quat::from_euler(EulerRot::YXZ, yaw, pitch, roll)
}

fn bind(rotation: Quat, translation: Vec3) -> Mat4 {
    convention::local_transform(translation, rotation)
}

/// Rest pose of the demo skeleton, also its first keyframe
pub fn rest_pose() -> KeyFrame {
    pose([
        Quat::IDENTITY,
        pitch_yaw_roll(0.0, 0.0, PI * 0.5),
        pitch_yaw_roll(0.0, 0.0, PI * -0.5),
        pitch_yaw_roll(0.0, 0.0, PI * -0.5),
        pitch_yaw_roll(0.0, 0.0, PI * 0.5),
    ])
}

fn forward_pose() -> KeyFrame {
    pose([
        pitch_yaw_roll(PI * 0.25, 0.0, 0.0),
        pitch_yaw_roll(0.0, PI * 0.15, PI * 0.5),
        pitch_yaw_roll(0.0, PI * -0.15, PI * -0.5),
        pitch_yaw_roll(0.0, 0.0, PI * -0.35),
        pitch_yaw_roll(0.0, 0.0, PI * 0.65),
    ])
}

fn backward_pose() -> KeyFrame {
    pose([
        pitch_yaw_roll(PI * -0.25, 0.0, 0.0),
        pitch_yaw_roll(0.0, PI * -0.15, PI * 0.5),
        pitch_yaw_roll(0.0, PI * 0.15, PI * -0.5),
        pitch_yaw_roll(0.0, 0.0, PI * -0.65),
        pitch_yaw_roll(0.0, 0.0, PI * 0.35),
    ])
}

fn pose(rotations: [Quat; 5]) -> KeyFrame {
    let translations = vec![Vec3::ZERO, Vec3::Y, Vec3::Y, Vec3::Y, Vec3::Y];
    KeyFrame::from_parts_unchecked(translations, rotations.to_vec())
}

/// The demo rig with its skeleton, skin, and five-keyframe clip
pub fn arm_rig() -> Result<Rig> {
    let mut builder = SkeletonBuilder::new();
    let root = builder.add_named_bone(DEMO_BONES[0], Mat4::IDENTITY, None);
    let left_arm =
        builder.add_bone_from_bind(bind(Quat::from_rotation_z(PI * 0.5), Vec3::Y), Some(root))?;
    let right_arm =
        builder.add_bone_from_bind(bind(Quat::from_rotation_z(PI * -0.5), Vec3::Y), Some(root))?;
    builder.add_bone_from_bind(bind(Quat::IDENTITY, Vec3::new(-1.0, 1.0, 0.0)), Some(left_arm))?;
    builder.add_bone_from_bind(bind(Quat::IDENTITY, Vec3::new(1.0, 1.0, 0.0)), Some(right_arm))?;
    let skeleton = builder.build()?.with_names(DEMO_BONES)?;

    let skin = Skin::new(vec![
        SkinPart::new(DEMO_MESH, 0, bind(Quat::IDENTITY, Vec3::new(0.0, 0.5, 0.0))),
        SkinPart::new(
            DEMO_MESH,
            1,
            bind(Quat::from_rotation_z(PI * 0.5), Vec3::new(-0.5, 1.0, 0.0)),
        ),
        SkinPart::new(
            DEMO_MESH,
            2,
            bind(Quat::from_rotation_z(PI * 0.5), Vec3::new(0.5, 1.0, 0.0)),
        ),
        SkinPart::new(DEMO_MESH, 3, bind(Quat::IDENTITY, Vec3::new(-1.0, 1.5, 0.0))),
        SkinPart::new(DEMO_MESH, 4, bind(Quat::IDENTITY, Vec3::new(1.0, 1.5, 0.0))),
    ])?;

    let animation = Animation::from_keyframes(
        DEMO_INTERVAL,
        PlaybackOptions::default(),
        vec![
            rest_pose(),
            forward_pose(),
            rest_pose(),
            backward_pose(),
            rest_pose(),
        ],
    )?;

    Rig::new("arm", skeleton, skin, animation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skeleton::Skeleton;

    #[test]
    fn test_explicit_offsets_match_rest_pose() {
        let rig = arm_rig().unwrap();
        let parents: Vec<Option<usize>> = DEMO_PARENTS
            .iter()
            .map(|&p| usize::try_from(p).ok())
            .collect();
        let derived = Skeleton::from_rest_pose(&parents, &rest_pose()).unwrap();

        for (explicit, derived) in rig.skeleton().bones().iter().zip(derived.bones()) {
            assert!(explicit.offset.abs_diff_eq(derived.offset, 1e-5));
        }
    }

    #[test]
    fn test_demo_rest_is_identity() {
        let rig = arm_rig().unwrap();
        for m in rig.evaluate_at(0.0).unwrap() {
            assert!(m.abs_diff_eq(Mat4::IDENTITY, 1e-5));
        }
        for m in rig.evaluate_at(2.0).unwrap() {
            assert!(m.abs_diff_eq(Mat4::IDENTITY, 1e-5));
        }
    }

    #[test]
    fn test_demo_shape() {
        let rig = arm_rig().unwrap();
        assert_eq!(rig.skeleton().parent_indices(), DEMO_PARENTS.to_vec());
        assert_eq!(rig.skin().part_count(), 5);
        assert_eq!(rig.animation().key_count(), 5);
        assert_eq!(rig.animation().last_time(), 4.0);
        assert_eq!(rig.skeleton().find_bone("right_hand"), Some(4));
    }

    #[test]
    fn test_pitch_yaw_roll_order() {
        // Roll first: X axis goes to +Y, then yaw spins +Y about itself
        let q = pitch_yaw_roll(0.0, PI * 0.5, PI * 0.5);
        assert!((q * Vec3::X).abs_diff_eq(Vec3::Y, 1e-5));
        // Z axis: untouched by roll, yaw sends it to +X
        assert!((q * Vec3::Z).abs_diff_eq(Vec3::X, 1e-5));
    }
}
