//! Mutable scene state shared by input resolution and the frame driver.

use crate::camera::{Camera, Viewport};
use crate::card::{CardId, CardTuning};
use crate::constants::{CLOUD_SPIN, CLOUD_SPIN_EXPLODED_BIAS};
use crate::input::{InputEvent, InputResolver, InputTuning, TimedInput};
use crate::picking;
use crate::registry::CardRegistry;
use crate::shape::CloudParams;
use crate::topper::Topper;
use glam::Vec2;

/// Everything tunable about a scene, grouped by component.
#[derive(Clone, Copy, Debug, Default)]
pub struct SceneConfig {
    pub cloud: CloudParams,
    pub cards: CardTuning,
    pub input: InputTuning,
}

/// What a click ended up doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Swallowed as the tail end of a drag.
    Suppressed,
    CardToggled { id: CardId, expanded: bool },
    /// A background click that only closed the expanded card.
    CardClosed,
    ModeToggled { exploded: bool },
}

#[derive(Clone, Debug)]
pub struct SceneState {
    exploded: bool,
    pub cards: CardRegistry,
    pub input: InputResolver,
    pub camera: Camera,
    pub topper: Topper,
    viewport: Viewport,
    pointer_ndc: Vec2,
    pointer_drift: Vec2,
    cloud_rotation: f32,
    time: f32,
}

impl SceneState {
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            exploded: false,
            cards: CardRegistry::new(config.cards),
            input: InputResolver::new(config.input),
            camera: Camera::default(),
            topper: Topper::default(),
            viewport: Viewport::default(),
            pointer_ndc: Vec2::ZERO,
            pointer_drift: Vec2::ZERO,
            cloud_rotation: 0.0,
            time: 0.0,
        }
    }

    #[inline]
    pub fn exploded(&self) -> bool {
        self.exploded
    }

    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Rotation of the particle cloud about Y, in radians.
    #[inline]
    pub fn cloud_rotation(&self) -> f32 {
        self.cloud_rotation
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn pointer_ndc(&self) -> Vec2 {
        self.pointer_ndc
    }

    pub fn pointer_drift(&self) -> Vec2 {
        self.pointer_drift
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
        self.camera.set_viewport(self.viewport.width, self.viewport.height);
    }

    /// Apply one input event. Returns the outcome for clicks.
    pub fn apply(&mut self, input: TimedInput) -> Option<ClickOutcome> {
        match input.event {
            InputEvent::PointerDown { pos } => {
                self.track_pointer(pos);
                self.input.press(pos);
            }
            InputEvent::PointerMove { pos } => {
                self.track_pointer(pos);
                self.input.drag_to(pos, self.exploded);
            }
            InputEvent::PointerUp => self.input.release(input.at),
            InputEvent::Click => return Some(self.click(input.at)),
            InputEvent::Resize { width, height } => self.set_viewport(width, height),
        }
        None
    }

    fn track_pointer(&mut self, pos: Vec2) {
        self.pointer_ndc = self.viewport.to_ndc(pos);
        self.pointer_drift = self.viewport.drift(pos);
    }

    /// Resolve a click at the last known pointer position.
    ///
    /// In the burst a click on a card toggles it; a background click closes an
    /// expanded card if there is one. Only a clean background click flips the
    /// mode.
    pub fn click(&mut self, now: f64) -> ClickOutcome {
        if !self.input.accept_click(now) {
            log::debug!("[input] click swallowed after drag");
            return ClickOutcome::Suppressed;
        }
        if self.exploded {
            if let Some(id) = picking::pick(&self.cards, &self.camera, self.pointer_ndc) {
                let expanded = self.cards.toggle_expanded(id).unwrap_or(false);
                log::info!("[cards] card {} expanded={}", id.0, expanded);
                return ClickOutcome::CardToggled { id, expanded };
            }
            if self.cards.collapse_all() {
                return ClickOutcome::CardClosed;
            }
        }
        self.set_exploded(!self.exploded);
        ClickOutcome::ModeToggled {
            exploded: self.exploded,
        }
    }

    pub fn set_exploded(&mut self, exploded: bool) {
        self.exploded = exploded;
        self.topper.visible = !exploded;
        if !exploded {
            self.cards.collapse_all();
        }
        log::info!("[scene] exploded={}", exploded);
    }

    pub(crate) fn advance_clock(&mut self, dt: f32) {
        self.time += dt.max(0.0);
    }

    /// Idle spin plus, in the burst, the decaying drag spin.
    pub(crate) fn spin_cloud(&mut self) {
        self.cloud_rotation += CLOUD_SPIN;
        if self.exploded {
            self.cloud_rotation += CLOUD_SPIN_EXPLODED_BIAS + self.input.rotation_offset();
        }
        self.input.decay(self.exploded);
    }
}
