//! Procedural point cloud: a cone-shaped tree and a spherical burst.
//!
//! Both shapes are generated together so that particle `i` of the tree and
//! particle `i` of the burst are the same visual particle in its two poses.

use crate::constants::*;
use glam::Vec3;
use rand::Rng;
use std::f32::consts::{PI, TAU};

/// Cone parameters. Height fraction `h` is drawn as `U^height_bias` so the
/// base is denser than the apex.
#[derive(Clone, Copy, Debug)]
pub struct TreeShape {
    pub base_y: f32,
    pub height: f32,
    pub base_radius: f32,
    pub height_bias: f32,
}

impl Default for TreeShape {
    fn default() -> Self {
        Self {
            base_y: TREE_BASE_Y,
            height: TREE_HEIGHT,
            base_radius: TREE_BASE_RADIUS,
            height_bias: TREE_HEIGHT_BIAS,
        }
    }
}

impl TreeShape {
    /// Radius bound at height fraction `h` in `[0, 1]`.
    #[inline]
    pub fn radius_at(&self, h: f32) -> f32 {
        self.base_radius * (1.0 - h)
    }

    /// Height fraction of a world-space y coordinate.
    #[inline]
    pub fn height_fraction(&self, y: f32) -> f32 {
        (y - self.base_y) / self.height
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        let h = rng.gen::<f32>().powf(self.height_bias);
        let y = self.base_y + h * self.height;
        // sqrt keeps the disk uniformly filled by area
        let r = self.radius_at(h) * rng.gen::<f32>().sqrt();
        let theta = rng.gen_range(0.0..TAU);
        Vec3::new(theta.cos() * r, y, theta.sin() * r)
    }
}

/// Spherical shell with radius drawn uniformly (not area-corrected, so the
/// outer edge reads denser on screen).
#[derive(Clone, Copy, Debug)]
pub struct BurstShape {
    pub radius_min: f32,
    pub radius_max: f32,
}

impl Default for BurstShape {
    fn default() -> Self {
        Self {
            radius_min: BURST_RADIUS_MIN,
            radius_max: BURST_RADIUS_MAX,
        }
    }
}

impl BurstShape {
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        let radius = rng.gen_range(self.radius_min..=self.radius_max);
        let theta = rng.gen_range(0.0..TAU);
        let phi = rng.gen_range(0.0..=PI);
        Vec3::new(
            radius * phi.sin() * theta.cos(),
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
        )
    }
}

#[derive(Clone, Copy, Debug)]
pub struct CloudParams {
    pub count: usize,
    pub tree: TreeShape,
    pub burst: BurstShape,
    pub blend_smoothing: f32,
}

impl Default for CloudParams {
    fn default() -> Self {
        Self {
            count: PARTICLE_COUNT,
            tree: TreeShape::default(),
            burst: BurstShape::default(),
            blend_smoothing: BLEND_SMOOTHING,
        }
    }
}

/// Palette category a particle was drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    Needle,
    Gold,
    Ornament,
    Sparkle,
}

impl ParticleKind {
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let roll = rng.gen::<f32>();
        if roll < NEEDLE_SHARE {
            ParticleKind::Needle
        } else if roll < NEEDLE_SHARE + GOLD_SHARE {
            ParticleKind::Gold
        } else if roll < NEEDLE_SHARE + GOLD_SHARE + ORNAMENT_SHARE {
            ParticleKind::Ornament
        } else {
            ParticleKind::Sparkle
        }
    }

    /// Concrete sRGB color for this category; greens and golds vary within a
    /// narrow hue band.
    pub fn color<R: Rng + ?Sized>(self, rng: &mut R) -> [f32; 3] {
        match self {
            ParticleKind::Needle => {
                hsl_to_rgb(rng.gen_range(0.28..0.35), 0.8, rng.gen_range(0.1..0.3))
            }
            ParticleKind::Gold => hsl_to_rgb(rng.gen_range(0.10..0.14), 1.0, 0.6),
            ParticleKind::Ornament => ORNAMENT_RGB,
            ParticleKind::Sparkle => SPARKLE_RGB,
        }
    }
}

/// Draw one particle color from the categorical palette.
pub fn sample_particle_color<R: Rng + ?Sized>(rng: &mut R) -> (ParticleKind, [f32; 3]) {
    let kind = ParticleKind::sample(rng);
    (kind, kind.color(rng))
}

/// HSL (all components in `[0, 1]`) to RGB.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    if s <= 0.0 {
        return [l, l, l];
    }
    let q = if l <= 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;
    let h = h.rem_euclid(1.0);
    [
        hue_channel(p, q, h + 1.0 / 3.0),
        hue_channel(p, q, h),
        hue_channel(p, q, h - 1.0 / 3.0),
    ]
}

fn hue_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

/// Both poses of every particle plus their fixed colors. Lengths never change
/// after generation.
#[derive(Clone, Debug)]
pub struct PointCloud {
    attached: Vec<Vec3>,
    detached: Vec<Vec3>,
    colors: Vec<[f32; 3]>,
}

impl PointCloud {
    pub fn generate<R: Rng + ?Sized>(params: &CloudParams, rng: &mut R) -> Self {
        let mut attached = Vec::with_capacity(params.count);
        let mut detached = Vec::with_capacity(params.count);
        let mut colors = Vec::with_capacity(params.count);
        for _ in 0..params.count {
            attached.push(params.tree.sample(rng));
            detached.push(params.burst.sample(rng));
            colors.push(sample_particle_color(rng).1);
        }
        log::info!("[cloud] generated {} particles", params.count);
        Self {
            attached,
            detached,
            colors,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.attached.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.attached.is_empty()
    }

    /// Tree pose.
    pub fn attached(&self) -> &[Vec3] {
        &self.attached
    }

    /// Burst pose.
    pub fn detached(&self) -> &[Vec3] {
        &self.detached
    }

    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }

    /// The pose the cloud is heading for in the given mode.
    #[inline]
    pub fn target(&self, exploded: bool) -> &[Vec3] {
        if exploded {
            &self.detached
        } else {
            &self.attached
        }
    }
}
