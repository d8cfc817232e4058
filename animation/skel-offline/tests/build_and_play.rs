//! Raw data built with the offline builders and played with the runtime jobs.

use glam::{Quat, Vec3};
use proptest::prelude::*;
use skel_math::{Float4x4, SimdFloat4, SoaTransform};
use skel_offline::{
    AnimationBuilder, RawAnimation, RawJoint, RawSkeleton, RawTransform, RotationKey, ScaleKey,
    SkeletonBuilder, TranslationKey,
};
use skel_runtime::{Keyframe, LocalToModelJob, SamplingCache, SamplingJob};

/// Strictly increasing times in `[0, duration]`.
fn key_times(duration: f32) -> impl Strategy<Value = Vec<f32>> {
    prop::collection::btree_set(0u32..=100, 0..6).prop_map(move |steps| {
        steps
            .into_iter()
            .map(|s| duration * s as f32 / 100.0)
            .collect()
    })
}

fn quaternion() -> impl Strategy<Value = Quat> {
    (-1.0f32..1.0, -1.0f32..1.0, -1.0f32..1.0, -1.0f32..1.0)
        .prop_map(|(x, y, z, w)| Quat::from_xyzw(x, y, z, w))
}

fn raw_animation() -> impl Strategy<Value = RawAnimation> {
    let duration = 2.0;
    let track = (key_times(duration), key_times(duration), key_times(duration)).prop_flat_map(
        |(t, r, s)| {
            (
                prop::collection::vec(prop::array::uniform3(-10.0f32..10.0), t.len()).prop_map(
                    move |values| {
                        t.iter()
                            .zip(values)
                            .map(|(&time, v)| TranslationKey {
                                time,
                                value: Vec3::from_array(v),
                            })
                            .collect::<Vec<_>>()
                    },
                ),
                prop::collection::vec(quaternion(), r.len()).prop_map(move |values| {
                    r.iter()
                        .zip(values)
                        .map(|(&time, value)| RotationKey { time, value })
                        .collect::<Vec<_>>()
                }),
                prop::collection::vec(prop::array::uniform3(0.1f32..4.0), s.len()).prop_map(
                    move |values| {
                        s.iter()
                            .zip(values)
                            .map(|(&time, v)| ScaleKey {
                                time,
                                value: Vec3::from_array(v),
                            })
                            .collect::<Vec<_>>()
                    },
                ),
            )
        },
    );
    prop::collection::vec(track, 0..7).prop_map(move |tracks| {
        let mut raw = RawAnimation::new("random", duration, tracks.len());
        for (dst, (translations, rotations, scales)) in raw.tracks.iter_mut().zip(tracks) {
            dst.translations = translations;
            dst.rotations = rotations;
            dst.scales = scales;
        }
        raw
    })
}

fn is_sorted_by_time_then_track<K: Keyframe>(keys: &[K]) -> bool {
    keys.windows(2).all(|w| {
        w[0].time() < w[1].time() || (w[0].time() == w[1].time() && w[0].track() < w[1].track())
    })
}

proptest! {
    #[test]
    fn prop_keys_sorted_and_bounded(raw in raw_animation()) {
        let animation = AnimationBuilder::new().build(&raw).expect("valid raw animation");
        prop_assert!(is_sorted_by_time_then_track(animation.translations()));
        prop_assert!(is_sorted_by_time_then_track(animation.rotations()));
        prop_assert!(is_sorted_by_time_then_track(animation.scales()));

        let padded = animation.num_soa_tracks() * 4;
        for track in 0..padded as u16 {
            let times: Vec<f32> = animation
                .translations()
                .iter()
                .filter(|k| k.track == track)
                .map(Keyframe::time)
                .collect();
            prop_assert!(times.len() >= 2);
            prop_assert_eq!(times[0], 0.0);
            prop_assert_eq!(times[times.len() - 1], raw.duration);
        }
    }

    #[test]
    fn prop_consecutive_rotations_share_hemisphere(raw in raw_animation()) {
        let animation = AnimationBuilder::new().build(&raw).expect("valid raw animation");
        let padded = animation.num_soa_tracks() * 4;
        for track in 0..padded as u16 {
            let rotations: Vec<SimdFloat4> = animation
                .rotations()
                .iter()
                .filter(|k| k.track == track)
                .map(|k| k.decode())
                .collect();
            prop_assert!(rotations[0].get_w() >= -1e-4);
            for pair in rotations.windows(2) {
                prop_assert!(pair[0].dot4(pair[1]).get_x() >= -1e-4);
            }
        }
    }

    #[test]
    fn prop_sampling_reproduces_boundary_keys(raw in raw_animation()) {
        let animation = AnimationBuilder::new().build(&raw).expect("valid raw animation");
        let mut cache = SamplingCache::new(raw.num_tracks());
        let mut output = vec![SoaTransform::IDENTITY; animation.num_soa_tracks()];

        for (time, first) in [(0.0, true), (raw.duration, false)] {
            SamplingJob::new(&animation, &mut cache, time, &mut output)
                .run()
                .expect("sampling succeeds");
            for (joint, track) in raw.tracks.iter().enumerate() {
                let key = if first { track.translations.first() } else { track.translations.last() };
                let expected = key.map_or(Vec3::ZERO, |k| k.value);
                let sampled = Vec3::from_array(output[joint / 4].lane(joint % 4).translation);
                // Half float precision.
                prop_assert!(sampled.abs_diff_eq(expected, 1e-2), "{} vs {}", sampled, expected);
            }
        }
    }
}

#[test]
fn test_two_joint_scenario() {
    let t0 = Vec3::new(0.0, 1.0, 0.0);
    let t1 = Vec3::new(2.0, 3.0, -4.0);
    let r1 = Quat::from_rotation_z(std::f32::consts::FRAC_PI_2);

    let raw_skeleton = RawSkeleton {
        roots: vec![
            RawJoint::new("root", RawTransform::IDENTITY)
                .with_child(RawJoint::new("child", RawTransform::IDENTITY)),
        ],
    };
    let skeleton = SkeletonBuilder::new()
        .build(&raw_skeleton)
        .expect("valid raw skeleton");

    let mut raw = RawAnimation::new("scenario", 1.0, 2);
    raw.tracks[1].translations = vec![
        TranslationKey { time: 0.0, value: t0 },
        TranslationKey { time: 1.0, value: t1 },
    ];
    raw.tracks[1].rotations = vec![
        RotationKey { time: 0.0, value: Quat::IDENTITY },
        RotationKey { time: 1.0, value: r1 },
    ];
    raw.tracks[1].scales = vec![
        ScaleKey { time: 0.0, value: Vec3::ONE },
        ScaleKey { time: 1.0, value: Vec3::splat(2.0) },
    ];
    let animation = AnimationBuilder::new().build(&raw).expect("valid raw animation");

    let mut cache = SamplingCache::new(skeleton.num_joints());
    let mut locals = vec![SoaTransform::IDENTITY; skeleton.num_soa_joints()];
    SamplingJob::new(&animation, &mut cache, 0.5, &mut locals)
        .run()
        .expect("sampling succeeds");

    let child = locals[0].lane(1);
    let translation = Vec3::from_array(child.translation);
    assert!(translation.abs_diff_eq(t0.lerp(t1, 0.5), 1e-3), "{translation}");
    let scale = Vec3::from_array(child.scale);
    assert!(scale.abs_diff_eq(Vec3::splat(1.5), 1e-3), "{scale}");
    let rotation = Quat::from_array(child.rotation);
    let nlerp_midpoint = Quat::IDENTITY.lerp(r1, 0.5);
    assert!(rotation.abs_diff_eq(nlerp_midpoint, 1e-3), "{rotation}");

    let mut models = vec![Float4x4::IDENTITY; skeleton.num_joints()];
    LocalToModelJob::new(&skeleton, &locals, &mut models)
        .run()
        .expect("local-to-model succeeds");
    assert_eq!(models[0], Float4x4::IDENTITY);

    let expected = glam::Mat4::from_scale_rotation_translation(scale, rotation, translation);
    assert!(glam::Mat4::from(models[1]).abs_diff_eq(expected, 1e-4));
}

#[cfg(feature = "serde")]
#[test]
fn test_raw_descriptions_from_json() {
    let raw = RawAnimation::from_json(
        r#"{
            "name": "nod",
            "duration": 1.0,
            "tracks": [
                { "rotations": [ { "time": 0.5, "value": [0.0, 0.0, 0.0, 1.0] } ] }
            ]
        }"#,
    )
    .expect("valid JSON");
    assert_eq!(raw.tracks[0].rotations.len(), 1);
    assert!(raw.tracks[0].translations.is_empty());
    assert!(AnimationBuilder::new().build(&raw).is_ok());

    let skeleton = RawSkeleton::from_json(
        r#"{ "roots": [ { "name": "root", "children": [ { "name": "head" } ] } ] }"#,
    )
    .expect("valid JSON");
    assert_eq!(skeleton.num_joints(), 2);
    assert_eq!(skeleton.roots[0].transform, RawTransform::IDENTITY);
}
