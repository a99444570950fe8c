//! Pointer gesture state machine.
//!
//! A press either stays a click or becomes a drag once the pointer has
//! travelled past a threshold. Releasing a drag enters `SuppressClick`, which
//! swallows the click the platform fires for the same gesture and times out
//! shortly after.

use crate::constants::*;
use glam::Vec2;

#[derive(Clone, Copy, Debug)]
pub struct InputTuning {
    pub drag_rotate_per_px: f32,
    pub drag_click_threshold_px: f32,
    pub click_suppress_sec: f64,
    pub rotation_decay: f32,
}

impl Default for InputTuning {
    fn default() -> Self {
        Self {
            drag_rotate_per_px: DRAG_ROTATE_PER_PX,
            drag_click_threshold_px: DRAG_CLICK_THRESHOLD_PX,
            click_suppress_sec: CLICK_SUPPRESS_SEC,
            rotation_decay: ROTATION_OFFSET_DECAY,
        }
    }
}

/// Raw input, timestamped in seconds on any monotonic clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerDown { pos: Vec2 },
    PointerMove { pos: Vec2 },
    PointerUp,
    Click,
    Resize { width: f32, height: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimedInput {
    pub at: f64,
    pub event: InputEvent,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Gesture {
    #[default]
    Idle,
    Dragging {
        last: Vec2,
        travelled: f32,
    },
    SuppressClick {
        until: f64,
    },
}

#[derive(Clone, Debug, Default)]
pub struct InputResolver {
    gesture: Gesture,
    rotation_offset: f32,
    tuning: InputTuning,
}

impl InputResolver {
    pub fn new(tuning: InputTuning) -> Self {
        Self {
            gesture: Gesture::Idle,
            rotation_offset: 0.0,
            tuning,
        }
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn rotation_offset(&self) -> f32 {
        self.rotation_offset
    }

    pub fn press(&mut self, pos: Vec2) {
        self.gesture = Gesture::Dragging {
            last: pos,
            travelled: 0.0,
        };
    }

    /// Track the pointer while pressed. Horizontal motion spins the cloud, but
    /// only in the burst; the tree does not rotate under drag.
    pub fn drag_to(&mut self, pos: Vec2, exploded: bool) {
        if let Gesture::Dragging { last, travelled } = &mut self.gesture {
            let delta = pos - *last;
            *travelled += delta.length();
            *last = pos;
            if exploded {
                self.rotation_offset += delta.x * self.tuning.drag_rotate_per_px;
            }
        }
    }

    pub fn release(&mut self, now: f64) {
        self.gesture = match self.gesture {
            Gesture::Dragging { travelled, .. }
                if travelled > self.tuning.drag_click_threshold_px =>
            {
                Gesture::SuppressClick {
                    until: now + self.tuning.click_suppress_sec,
                }
            }
            Gesture::SuppressClick { until } => Gesture::SuppressClick { until },
            _ => Gesture::Idle,
        };
    }

    /// Whether a click at `now` should be acted on. A click inside the
    /// suppression window is consumed.
    pub fn accept_click(&mut self, now: f64) -> bool {
        match self.gesture {
            Gesture::SuppressClick { until } => {
                self.gesture = Gesture::Idle;
                now > until
            }
            _ => true,
        }
    }

    /// Leave `SuppressClick` once its deadline has passed.
    pub fn expire(&mut self, now: f64) {
        if let Gesture::SuppressClick { until } = self.gesture {
            if now > until {
                self.gesture = Gesture::Idle;
            }
        }
    }

    /// Per-frame decay of the drag spin. Outside the burst the offset is
    /// dropped entirely.
    pub fn decay(&mut self, exploded: bool) {
        if exploded {
            self.rotation_offset *= self.tuning.rotation_decay;
        } else {
            self.rotation_offset = 0.0;
        }
    }
}
