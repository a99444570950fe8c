//! Per-frame exponential approach: `x += (target - x) * factor`.
//!
//! The value converges asymptotically and never overshoots for factors in
//! `(0, 1]`. Callers drive it once per frame; there is no completion event.

use glam::{Vec2, Vec3};

pub trait Approach: Sized {
    fn approach(&mut self, target: Self, factor: f32);
}

impl Approach for f32 {
    #[inline]
    fn approach(&mut self, target: f32, factor: f32) {
        *self += (target - *self) * factor;
    }
}

impl Approach for Vec2 {
    #[inline]
    fn approach(&mut self, target: Vec2, factor: f32) {
        *self += (target - *self) * factor;
    }
}

impl Approach for Vec3 {
    #[inline]
    fn approach(&mut self, target: Vec3, factor: f32) {
        *self += (target - *self) * factor;
    }
}
