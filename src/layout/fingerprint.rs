use xxhash_rust::xxh3::Xxh3;

use crate::layout::anim::ElementPose;

const XXH3_SEED: u64 = 0x5f3a_9c1d_e2b7_4086;

/// Stable hash of the sampled poses of one frame.
///
/// Two instants with equal fingerprints rasterize to identical pixels, so animation capture can
/// reuse the previous frame instead of painting again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PoseFingerprint(pub u64);

pub(crate) fn fingerprint_poses(poses: &[ElementPose]) -> PoseFingerprint {
    let mut h = Xxh3::with_seed(XXH3_SEED);
    h.update(&(poses.len() as u64).to_le_bytes());
    for pose in poses {
        h.update(&pose.opacity.to_bits().to_le_bytes());
        h.update(&pose.offset.x.to_bits().to_le_bytes());
        h.update(&pose.offset.y.to_bits().to_le_bytes());
    }
    PoseFingerprint(h.digest())
}

#[cfg(test)]
#[path = "../../tests/unit/layout/fingerprint.rs"]
mod tests;
