use super::*;
use crate::foundation::core::Vec2;

fn pose(opacity: f32, y: f64) -> ElementPose {
    ElementPose {
        opacity,
        offset: Vec2::new(0.0, y),
    }
}

#[test]
fn equal_poses_hash_equal() {
    let a = [pose(1.0, 0.0), pose(0.5, 12.0)];
    let b = [pose(1.0, 0.0), pose(0.5, 12.0)];
    assert_eq!(fingerprint_poses(&a), fingerprint_poses(&b));
}

#[test]
fn any_pose_change_changes_the_hash() {
    let base = fingerprint_poses(&[pose(1.0, 0.0), pose(0.5, 12.0)]);
    assert_ne!(base, fingerprint_poses(&[pose(1.0, 0.0), pose(0.5, 11.5)]));
    assert_ne!(base, fingerprint_poses(&[pose(1.0, 0.0), pose(0.6, 12.0)]));
    assert_ne!(base, fingerprint_poses(&[pose(0.5, 12.0), pose(1.0, 0.0)]));
    assert_ne!(base, fingerprint_poses(&[pose(1.0, 0.0)]));
}
