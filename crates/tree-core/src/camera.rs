//! Perspective camera with pointer-driven drift.
//!
//! Platform-free: the frontends feed it viewport size and pointer position and
//! read back the matrices.

use crate::constants::*;
use crate::ease::Approach;
use glam::{Mat4, Vec2, Vec3, Vec4};

/// World-space ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

/// Right-handed camera with perspective projection (depth range `[0, 1]`).
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: CAMERA_HOME,
            target: CAMERA_LOOK_AT,
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// Ease the eye toward the home position offset by `drift` (pointer
    /// offset from the viewport centre, already scaled), keeping the look-at
    /// point fixed.
    pub fn drift_toward(&mut self, drift: Vec2) {
        let goal = Vec3::new(
            drift.x * CAMERA_DRIFT_RANGE,
            -drift.y * CAMERA_DRIFT_RANGE + CAMERA_HOME.y,
            CAMERA_HOME.z,
        );
        self.eye.x.approach(goal.x, CAMERA_DRIFT_SMOOTHING);
        self.eye.y.approach(goal.y, CAMERA_DRIFT_SMOOTHING);
        self.eye.z = goal.z;
    }

    /// Ray through a point in normalized device coordinates (`x` right, `y` up,
    /// both in `[-1, 1]`).
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_proj().inverse();
        let far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let far = far.truncate() / far.w;
        Ray {
            origin: self.eye,
            dir: (far - self.eye).normalize(),
        }
    }
}

/// Viewport size in CSS pixels (web) or physical pixels (native); only ratios
/// matter to the core.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    /// Pixel position to normalized device coordinates.
    #[inline]
    pub fn to_ndc(&self, pos: Vec2) -> Vec2 {
        Vec2::new(
            pos.x / self.width * 2.0 - 1.0,
            -(pos.y / self.height) * 2.0 + 1.0,
        )
    }

    /// Pixel offset from the centre, scaled for camera drift.
    #[inline]
    pub fn drift(&self, pos: Vec2) -> Vec2 {
        Vec2::new(
            (pos.x - self.width / 2.0) * CAMERA_DRIFT_PER_PX,
            (pos.y - self.height / 2.0) * CAMERA_DRIFT_PER_PX,
        )
    }
}
