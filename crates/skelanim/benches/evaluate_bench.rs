use criterion::{Criterion, criterion_group, criterion_main};
use glam::{Quat, Vec3};
use skelanim::{Animation, KeyFrame, PlaybackOptions, PoseEvaluator, Skeleton, demo};
use std::hint::black_box;

fn chain(bone_count: usize) -> (Skeleton, Animation) {
    let parents: Vec<Option<usize>> = (0..bone_count).map(|i| i.checked_sub(1)).collect();
    let rest = KeyFrame::new(vec![Vec3::Y; bone_count], vec![Quat::IDENTITY; bone_count]).unwrap();
    let bent = KeyFrame::new(
        vec![Vec3::Y; bone_count],
        vec![Quat::from_rotation_z(0.1); bone_count],
    )
    .unwrap();

    let skeleton = Skeleton::from_rest_pose(&parents, &rest).unwrap();
    let animation =
        Animation::from_keyframes(0.5, PlaybackOptions::default(), vec![rest.clone(), bent, rest])
            .unwrap();
    (skeleton, animation)
}

fn bench_demo_tick(c: &mut Criterion) {
    let mut rig = demo::arm_rig().unwrap();

    c.bench_function("demo_rig_tick", |b| {
        b.iter(|| {
            let finals = rig.update(black_box(1.0 / 60.0)).unwrap();
            black_box(finals.len());
        })
    });
}

fn bench_chain_evaluate(c: &mut Criterion) {
    let (skeleton, mut animation) = chain(128);
    let mut evaluator = PoseEvaluator::new(&skeleton);
    let mut pose = KeyFrame::default();

    c.bench_function("chain_128_sample_evaluate", |b| {
        b.iter(|| {
            animation.sample_into(black_box(1.0 / 60.0), &mut pose).unwrap();
            let finals = evaluator.evaluate(&skeleton, &pose).unwrap();
            black_box(finals[127]);
        })
    });
}

criterion_group!(benches, bench_demo_tick, bench_chain_evaluate);
criterion_main!(benches);
