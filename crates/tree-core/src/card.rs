//! Photo cards: per-card placement, motion parameters and target poses.

use crate::constants::*;
use glam::{Vec2, Vec3};
use rand::Rng;
use std::f32::consts::TAU;

/// Stable card identifier: the card's creation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CardId(pub usize);

impl CardId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Live or target transform of a card sprite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardPose {
    pub position: Vec3,
    pub scale: Vec2,
    /// Screen-plane rotation in radians.
    pub rotation: f32,
    pub opacity: f32,
}

/// Vertical bobbing applied while a card floats in the burst.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatParams {
    pub speed: f32,
    pub phase: f32,
    pub amplitude: f32,
}

impl FloatParams {
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            speed: rng.gen_range(CARD_FLOAT_SPEED.0..CARD_FLOAT_SPEED.1),
            phase: rng.gen_range(0.0..TAU),
            amplitude: rng.gen_range(CARD_FLOAT_AMPLITUDE.0..CARD_FLOAT_AMPLITUDE.1),
        }
    }

    #[inline]
    pub fn offset(&self, time: f32) -> f32 {
        (time * self.speed + self.phase).sin() * self.amplitude
    }
}

/// Placement and easing configuration for cards.
#[derive(Clone, Copy, Debug)]
pub struct CardTuning {
    pub tree_base_y: f32,
    pub tree_height: f32,
    pub tree_radius: f32,
    pub tree_radius_pad: f32,
    pub burst_min: Vec3,
    pub burst_max: Vec3,
    pub min_separation: f32,
    pub placement_attempts: u32,
    pub fallback_z_shift: f32,
    pub tilt_max: f32,
    pub expanded_scale: f32,
    pub position_smoothing: f32,
    pub scale_smoothing: f32,
    pub rotation_smoothing: f32,
    pub opacity_smoothing: f32,
    pub visible_opacity: f32,
}

impl Default for CardTuning {
    fn default() -> Self {
        Self {
            tree_base_y: CARD_TREE_BASE_Y,
            tree_height: CARD_TREE_HEIGHT,
            tree_radius: CARD_TREE_RADIUS,
            tree_radius_pad: CARD_TREE_RADIUS_PAD,
            burst_min: CARD_BURST_MIN,
            burst_max: CARD_BURST_MAX,
            min_separation: CARD_MIN_SEPARATION,
            placement_attempts: CARD_PLACEMENT_ATTEMPTS,
            fallback_z_shift: CARD_FALLBACK_Z_SHIFT,
            tilt_max: CARD_TILT_MAX,
            expanded_scale: CARD_EXPANDED_SCALE,
            position_smoothing: CARD_POSITION_SMOOTHING,
            scale_smoothing: CARD_SCALE_SMOOTHING,
            rotation_smoothing: CARD_ROTATION_SMOOTHING,
            opacity_smoothing: CARD_OPACITY_SMOOTHING,
            visible_opacity: CARD_VISIBLE_OPACITY,
        }
    }
}

/// A spot scattered over the tree surface, slightly outside the cone.
pub fn place_attached<R: Rng + ?Sized>(tuning: &CardTuning, rng: &mut R) -> Vec3 {
    let h = rng.gen::<f32>();
    let y = tuning.tree_base_y + h * tuning.tree_height;
    let radius = tuning.tree_radius * (1.0 - h) + tuning.tree_radius_pad;
    let angle = rng.gen_range(0.0..TAU);
    Vec3::new(angle.cos() * radius, y, angle.sin() * radius)
}

/// Result of the detached-position rejection sampler.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub position: Vec3,
    /// No candidate cleared the separation test; the last one was pushed back
    /// along Z instead and may still overlap.
    pub exhausted: bool,
}

/// Pick a burst position at least `min_separation` away from every position
/// in `placed`.
pub fn place_detached<R: Rng + ?Sized>(
    placed: &[Vec3],
    tuning: &CardTuning,
    rng: &mut R,
) -> Placement {
    let min = tuning.burst_min;
    let max = tuning.burst_max;
    let mut candidate = Vec3::ZERO;
    for _ in 0..tuning.placement_attempts.max(1) {
        candidate = Vec3::new(
            rng.gen_range(min.x..=max.x),
            rng.gen_range(min.y..=max.y),
            rng.gen_range(min.z..=max.z),
        );
        let clear = placed
            .iter()
            .all(|p| p.distance(candidate) >= tuning.min_separation);
        if clear {
            return Placement {
                position: candidate,
                exhausted: false,
            };
        }
    }
    candidate.z += tuning.fallback_z_shift;
    Placement {
        position: candidate,
        exhausted: true,
    }
}

/// Animation record of one photo card.
#[derive(Clone, Debug)]
pub struct CardRecord {
    pub id: CardId,
    pub attached: Vec3,
    pub detached: Vec3,
    pub placement_exhausted: bool,
    pub base_scale: Vec2,
    pub tilt: f32,
    pub float: FloatParams,
    pub live: CardPose,
    expanded: bool,
}

impl CardRecord {
    pub fn new<R: Rng + ?Sized>(
        id: CardId,
        base_scale: Vec2,
        placed: &[Vec3],
        tuning: &CardTuning,
        rng: &mut R,
    ) -> Self {
        let tilt = rng.gen_range(-tuning.tilt_max..=tuning.tilt_max);
        let float = FloatParams::sample(rng);
        let attached = place_attached(tuning, rng);
        let placement = place_detached(placed, tuning, rng);
        Self {
            id,
            attached,
            detached: placement.position,
            placement_exhausted: placement.exhausted,
            base_scale,
            tilt,
            float,
            live: CardPose {
                position: attached,
                scale: base_scale,
                rotation: tilt,
                opacity: 0.0,
            },
            expanded: false,
        }
    }

    #[inline]
    pub fn expanded(&self) -> bool {
        self.expanded
    }

    pub(crate) fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
    }

    #[inline]
    pub fn render_priority(&self) -> u32 {
        if self.expanded {
            CARD_RENDER_ORDER_EXPANDED
        } else {
            CARD_RENDER_ORDER
        }
    }

    /// Whether the card is drawn and can be picked.
    #[inline]
    pub fn is_visible(&self, tuning: &CardTuning) -> bool {
        self.live.opacity > tuning.visible_opacity
    }

    /// Where the card is heading this frame. Recomputed every frame because
    /// the float offset depends on `time`.
    pub fn target_pose(&self, exploded: bool, time: f32, tuning: &CardTuning) -> CardPose {
        let mut position = if exploded { self.detached } else { self.attached };
        if exploded && !self.expanded {
            position.y += self.float.offset(time);
        }
        let scale_mult = if self.expanded {
            tuning.expanded_scale
        } else {
            1.0
        };
        CardPose {
            position,
            scale: self.base_scale * scale_mult,
            rotation: if self.expanded { 0.0 } else { self.tilt },
            opacity: if exploded { 1.0 } else { 0.0 },
        }
    }
}
