pub mod animator;
pub mod blend;
pub mod camera;
pub mod card;
pub mod constants;
pub mod ease;
pub mod error;
pub mod frame;
pub mod input;
pub mod picking;
pub mod polaroid;
pub mod registry;
pub mod scene;
pub mod shape;
pub mod topper;

pub use blend::BlendEngine;
pub use camera::{Camera, Ray, Viewport};
pub use card::{CardId, CardPose, CardRecord, CardTuning, FloatParams, Placement};
pub use error::CardError;
pub use frame::{CardDraw, FrameDriver, FrameView, LoadedImage, TickReport};
pub use input::{Gesture, InputEvent, InputResolver, InputTuning, TimedInput};
pub use polaroid::{CardArtwork, PolaroidLayout};
pub use registry::CardRegistry;
pub use scene::{ClickOutcome, SceneConfig, SceneState};
pub use shape::{BurstShape, CloudParams, ParticleKind, PointCloud, TreeShape};
pub use topper::Topper;

// Shaders bundled as string constants
pub static POINTS_WGSL: &str = include_str!("../shaders/points.wgsl");
pub static CARDS_WGSL: &str = include_str!("../shaders/cards.wgsl");
pub static TOPPER_WGSL: &str = include_str!("../shaders/topper.wgsl");
