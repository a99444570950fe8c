use crate::constants::*;
use glam::{Vec2, Vec3};
use std::f32::consts::{FRAC_PI_2, TAU};

/// Decorative star on top of the tree. Purely cosmetic: it spins, sways and
/// pulses, and is hidden while the cloud is burst.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Topper {
    pub position: Vec3,
    /// Euler angles (x, y, z) in radians.
    pub rotation: Vec3,
    pub scale: f32,
    pub visible: bool,
}

impl Default for Topper {
    fn default() -> Self {
        Self {
            position: TOPPER_POSITION,
            rotation: Vec3::ZERO,
            scale: 1.0,
            visible: true,
        }
    }
}

impl Topper {
    pub fn animate(&mut self, time: f32) {
        self.rotation.y += TOPPER_SPIN;
        self.rotation.z = (time * 2.0).sin() * TOPPER_SWAY;
        self.scale = 1.0 + (time * 3.0).sin() * TOPPER_PULSE;
    }
}

/// Outline of a star with `points` tips, starting at the top and alternating
/// between the outer and inner radius.
pub fn star_outline(points: usize, outer: f32, inner: f32) -> Vec<Vec2> {
    let n = points * 2;
    (0..n)
        .map(|i| {
            let angle = i as f32 / n as f32 * TAU + FRAC_PI_2;
            let r = if i % 2 == 0 { outer } else { inner };
            Vec2::new(angle.cos() * r, angle.sin() * r)
        })
        .collect()
}
