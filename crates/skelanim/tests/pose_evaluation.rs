//! End-to-end checks of sampling and skinning matrix evaluation

use std::f32::consts::{FRAC_PI_2, FRAC_PI_3};

use glam::{Mat4, Quat, Vec3};
use pretty_assertions::assert_eq;
use skelanim::pose::compute_final_transforms;
use skelanim::{
    AnimError, Animation, KeyFrame, PlaybackOptions, PoseEvaluator, Rig, Skeleton, Skin,
};
use test_case::test_case;

const EPS: f32 = 1e-5;
const PARENTS: [Option<usize>; 5] = [None, Some(0), Some(0), Some(1), Some(2)];

fn rest_pose() -> KeyFrame {
    KeyFrame::new(
        vec![Vec3::ZERO, Vec3::Y, Vec3::Y, Vec3::Y, Vec3::Y],
        vec![Quat::IDENTITY; 5],
    )
    .unwrap()
}

fn rotated_root_pose() -> KeyFrame {
    let mut rotations = vec![Quat::IDENTITY; 5];
    rotations[0] = Quat::from_rotation_z(FRAC_PI_2);
    KeyFrame::new(rest_pose().translations().to_vec(), rotations).unwrap()
}

fn scenario_rig(interval: f32) -> Rig {
    let skeleton = Skeleton::from_rest_pose(&PARENTS, &rest_pose()).unwrap();
    let skin = Skin::one_part_per_bone("cylinder", vec![Mat4::IDENTITY; 5]).unwrap();
    let animation = Animation::from_keyframes(
        interval,
        PlaybackOptions::default(),
        vec![rest_pose(), rotated_root_pose()],
    )
    .unwrap();
    Rig::new("scenario", skeleton, skin, animation).unwrap()
}

fn assert_mat_eq(actual: &Mat4, expected: &Mat4) {
    assert!(
        actual.abs_diff_eq(*expected, EPS),
        "expected {expected:?}, got {actual:?}"
    );
}

#[test]
fn rest_pose_yields_identity_finals() {
    let mut rig = scenario_rig(1.0);
    let finals = rig.update(0.0).unwrap();
    assert_eq!(finals.len(), 5);
    for m in finals {
        assert_mat_eq(m, &Mat4::IDENTITY);
    }
}

#[test_case(0.5 ; "half second interval")]
#[test_case(1.0 ; "one second interval")]
#[test_case(2.0 ; "two second interval")]
fn root_rotation_propagates_to_descendants(interval: f32) {
    let mut rig = scenario_rig(interval);
    rig.update(0.0).unwrap();
    let finals = rig.update(interval).unwrap().to_vec();

    let rotation = Mat4::from_quat(Quat::from_rotation_z(FRAC_PI_2));
    for m in &finals {
        assert_mat_eq(m, &rotation);
    }

    // Tip of the first arm: rest at (0,2,0), rotated a quarter turn about Z
    let tip = finals[3].transform_point3(Vec3::new(0.0, 2.0, 0.0));
    assert!(tip.abs_diff_eq(Vec3::new(-2.0, 0.0, 0.0), EPS));
}

#[test]
fn identity_holds_for_rotated_bind_pose() {
    let rest = KeyFrame::new(
        vec![Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.0, 1.5, 0.0), Vec3::X],
        vec![
            Quat::from_rotation_y(0.3),
            Quat::from_rotation_x(-1.1),
            Quat::from_axis_angle(Vec3::new(1.0, 1.0, 0.0).normalize(), 0.8),
        ],
    )
    .unwrap();
    let skeleton = Skeleton::from_rest_pose(&[None, Some(0), Some(1)], &rest).unwrap();

    for m in compute_final_transforms(&skeleton, &rest).unwrap() {
        assert_mat_eq(&m, &Mat4::IDENTITY);
    }
}

#[test]
fn two_bone_chain_matches_hand_computed_matrix() {
    let skeleton = Skeleton::from_parent_indices(vec![Mat4::IDENTITY; 2], &[-1, 0]).unwrap();
    let pose = KeyFrame::new(
        vec![Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 2.0, 0.0)],
        vec![Quat::from_rotation_z(FRAC_PI_2), Quat::from_rotation_z(FRAC_PI_2)],
    )
    .unwrap();

    let mut evaluator = PoseEvaluator::new(&skeleton);
    evaluator.evaluate(&skeleton, &pose).unwrap();

    // Child sits at (0,2,0) in the root's frame; the root's quarter turn puts it
    // at (-2,0,0), then the root moves it to (-1,0,0). Both turns add up to a half turn.
    let expected = Mat4::from_cols_array(&[
        -1.0, 0.0, 0.0, 0.0, //
        0.0, -1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        -1.0, 0.0, 0.0, 1.0,
    ]);
    assert_mat_eq(&evaluator.to_root()[1], &expected);

    // Reversed composition would place the child elsewhere
    let reversed = pose.to_parent(1).unwrap() * pose.to_parent(0).unwrap();
    assert!(!reversed.abs_diff_eq(expected, 1e-3));
}

#[test]
fn looping_boundary_hard_resets() {
    let interval = 0.25;
    let keys: Vec<KeyFrame> = (0..4)
        .map(|i| KeyFrame::new(vec![Vec3::splat(i as f32)], vec![Quat::IDENTITY]).unwrap())
        .collect();
    let animation =
        Animation::from_keyframes(interval, PlaybackOptions::default(), keys.clone()).unwrap();
    let last_time = 3.0 * interval;

    assert_eq!(animation.pose_at(last_time).unwrap(), keys[3]);
    assert_eq!(
        animation.pose_at(last_time + 1e-3).unwrap(),
        animation.pose_at(0.0).unwrap()
    );

    // Running cursor: landing slightly past the end restarts at keyframe 0
    let mut running = animation.clone();
    running.advance(0.7).unwrap();
    let pose = running.sample(0.06).unwrap();
    assert_eq!(running.cursor(), 0.0);
    assert_eq!(pose, keys[0]);
}

#[test]
fn midpoint_interpolation() {
    let a = KeyFrame::new(
        vec![Vec3::new(0.0, 0.0, 0.0)],
        vec![Quat::from_rotation_x(0.0)],
    )
    .unwrap();
    let b = KeyFrame::new(
        vec![Vec3::new(4.0, -2.0, 8.0)],
        vec![Quat::from_rotation_x(FRAC_PI_3)],
    )
    .unwrap();
    let animation =
        Animation::from_keyframes(1.5, PlaybackOptions::default(), vec![a.clone(), b.clone()])
            .unwrap();

    let mid = animation.pose_at(0.75).unwrap();
    assert!(mid.translations()[0].abs_diff_eq(Vec3::new(2.0, -1.0, 4.0), EPS));
    assert!(
        mid.rotations()[0].abs_diff_eq(Quat::from_rotation_x(FRAC_PI_3 * 0.5), EPS)
    );
}

#[test]
fn single_keyframe_is_constant() {
    let only = rotated_root_pose();
    let mut animation =
        Animation::from_keyframes(1.0, PlaybackOptions::default(), vec![only.clone()]).unwrap();
    for delta in [0.0, 0.016, 0.5, 3.0] {
        assert_eq!(animation.sample(delta).unwrap(), only);
    }
}

#[test]
fn invalid_delta_is_rejected() {
    let mut rig = scenario_rig(1.0);
    rig.update(0.4).unwrap();
    let before = rig.finals().to_vec();

    let err = rig.update(f32::NAN).unwrap_err();
    assert!(matches!(err, AnimError::InvalidInput(_)));
    assert_eq!(rig.finals(), before.as_slice());
    assert_eq!(rig.animation().cursor(), 0.4);
}
