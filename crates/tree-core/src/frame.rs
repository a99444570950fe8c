//! Per-frame orchestration.
//!
//! Input events and finished image loads arrive through channels and are
//! drained at the start of each tick, so all scene mutation happens inside
//! [`FrameDriver::tick`].

use crate::animator;
use crate::blend::BlendEngine;
use crate::camera::Camera;
use crate::card::{CardId, CardPose};
use crate::input::TimedInput;
use crate::scene::{ClickOutcome, SceneConfig, SceneState};
use crate::shape::PointCloud;
use crate::topper::Topper;
use rand::rngs::StdRng;
use rand::SeedableRng;
use smallvec::SmallVec;
use std::sync::mpsc::{self, Receiver, Sender};

/// A decoded image reported by a loader. `handle` is whatever the frontend
/// needs to draw the card later; the core only reads the pixel size.
#[derive(Clone, Debug)]
pub struct LoadedImage<H> {
    pub source: String,
    pub width: u32,
    pub height: u32,
    pub handle: H,
}

/// What changed during one tick.
#[derive(Debug)]
pub struct TickReport<H> {
    /// Cards created this tick with the handle their image came with.
    pub created: Vec<(CardId, H)>,
    pub clicks: SmallVec<[ClickOutcome; 2]>,
}

/// A card to draw this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardDraw {
    pub id: CardId,
    pub pose: CardPose,
    pub priority: u32,
}

/// Read-only snapshot handed to the renderer after a tick.
pub struct FrameView<'a> {
    /// Particle positions as interleaved `xyz` floats.
    pub positions: &'a [f32],
    pub colors: &'a [[f32; 3]],
    pub cloud_rotation: f32,
    pub camera: &'a Camera,
    /// Visible cards in draw order: by render priority, then back to front.
    pub cards: Vec<CardDraw>,
    pub topper: Option<Topper>,
    pub time: f32,
}

pub struct FrameDriver<H> {
    scene: SceneState,
    cloud: PointCloud,
    blend: BlendEngine,
    rng: StdRng,
    input_tx: Sender<TimedInput>,
    input_rx: Receiver<TimedInput>,
    load_tx: Sender<LoadedImage<H>>,
    load_rx: Receiver<LoadedImage<H>>,
}

impl<H> FrameDriver<H> {
    pub fn new(config: SceneConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn with_rng(config: SceneConfig, mut rng: StdRng) -> Self {
        let cloud = PointCloud::generate(&config.cloud, &mut rng);
        let blend = BlendEngine::new(&cloud, config.cloud.blend_smoothing);
        let (input_tx, input_rx) = mpsc::channel();
        let (load_tx, load_rx) = mpsc::channel();
        Self {
            scene: SceneState::new(&config),
            cloud,
            blend,
            rng,
            input_tx,
            input_rx,
            load_tx,
            load_rx,
        }
    }

    /// Sender for pointer and resize events.
    pub fn input_sender(&self) -> Sender<TimedInput> {
        self.input_tx.clone()
    }

    /// Sender for finished image loads. Failed loads are simply never sent.
    pub fn load_sender(&self) -> Sender<LoadedImage<H>> {
        self.load_tx.clone()
    }

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut SceneState {
        &mut self.scene
    }

    pub fn cloud(&self) -> &PointCloud {
        &self.cloud
    }

    pub fn blend(&self) -> &BlendEngine {
        &self.blend
    }

    /// Advance one frame. `now` is on the same clock as input timestamps.
    pub fn tick(&mut self, dt: f32, now: f64) -> TickReport<H> {
        let mut clicks = SmallVec::new();
        while let Ok(input) = self.input_rx.try_recv() {
            if let Some(outcome) = self.scene.apply(input) {
                clicks.push(outcome);
            }
        }

        let mut created = Vec::new();
        while let Ok(loaded) = self.load_rx.try_recv() {
            match self
                .scene
                .cards
                .create(loaded.width, loaded.height, &mut self.rng)
            {
                Ok(id) => {
                    log::info!("[cards] card {} from {}", id.0, loaded.source);
                    created.push((id, loaded.handle));
                }
                Err(e) => log::debug!("[cards] skipping {}: {}", loaded.source, e),
            }
        }

        self.scene.advance_clock(dt);
        self.scene.input.expire(now);
        self.scene.spin_cloud();
        let (exploded, time) = (self.scene.exploded(), self.scene.time());
        self.blend.step(&self.cloud, exploded);
        animator::step_cards(&mut self.scene.cards, exploded, time);
        let drift = self.scene.pointer_drift();
        self.scene.camera.drift_toward(drift);
        self.scene.topper.animate(time);

        TickReport { created, clicks }
    }

    pub fn view(&self) -> FrameView<'_> {
        let tuning = self.scene.cards.tuning();
        let to_view = self.scene.camera.view_matrix();
        let mut sorted: Vec<(f32, CardDraw)> = self
            .scene
            .cards
            .iter()
            .filter(|c| c.is_visible(tuning))
            .map(|c| {
                let depth = to_view.transform_point3(c.live.position).z;
                let draw = CardDraw {
                    id: c.id,
                    pose: c.live,
                    priority: c.render_priority(),
                };
                (depth, draw)
            })
            .collect();
        // Same priority: back to front, so the last drawn is what `pick` returns.
        sorted.sort_by(|(za, a), (zb, b)| a.priority.cmp(&b.priority).then(za.total_cmp(zb)));
        let cards = sorted.into_iter().map(|(_, draw)| draw).collect();
        FrameView {
            positions: self.blend.interleaved(),
            colors: self.cloud.colors(),
            cloud_rotation: self.scene.cloud_rotation(),
            camera: &self.scene.camera,
            cards,
            topper: self.scene.topper.visible.then_some(self.scene.topper),
            time: self.scene.time(),
        }
    }
}
