use crate::ease::Approach;
use crate::shape::PointCloud;
use glam::Vec3;

/// Live particle positions, eased every frame toward whichever pose of the
/// cloud is active.
#[derive(Clone, Debug)]
pub struct BlendEngine {
    current: Vec<Vec3>,
    smoothing: f32,
}

impl BlendEngine {
    /// Starts in the tree pose.
    pub fn new(cloud: &PointCloud, smoothing: f32) -> Self {
        Self {
            current: cloud.attached().to_vec(),
            smoothing,
        }
    }

    pub fn step(&mut self, cloud: &PointCloud, exploded: bool) {
        let target = cloud.target(exploded);
        debug_assert_eq!(target.len(), self.current.len());
        for (cur, tgt) in self.current.iter_mut().zip(target) {
            cur.approach(*tgt, self.smoothing);
        }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.current
    }

    /// Interleaved `xyz` floats, `3 * len` long, ready for a vertex upload.
    pub fn interleaved(&self) -> &[f32] {
        bytemuck::cast_slice(&self.current)
    }

    /// Sum of per-particle distances to `target`.
    pub fn distance_to(&self, target: &[Vec3]) -> f32 {
        self.current
            .iter()
            .zip(target)
            .map(|(c, t)| c.distance(*t))
            .sum()
    }
}
