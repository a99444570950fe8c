use glam::Vec3;

// Shared tuning constants used by the web and native frontends.

// Point cloud
pub const PARTICLE_COUNT: usize = 30_000;
pub const BLEND_SMOOTHING: f32 = 0.06; // per-frame approach toward the active shape

// Tree shape (cone, denser at the base)
pub const TREE_BASE_Y: f32 = -60.0;
pub const TREE_HEIGHT: f32 = 120.0;
pub const TREE_BASE_RADIUS: f32 = 45.0;
pub const TREE_HEIGHT_BIAS: f32 = 1.5; // h = U^bias

// Burst shape (spherical shell)
pub const BURST_RADIUS_MIN: f32 = 50.0;
pub const BURST_RADIUS_MAX: f32 = 200.0;

// Particle palette weights (cumulative thresholds)
pub const NEEDLE_SHARE: f32 = 0.6;
pub const GOLD_SHARE: f32 = 0.2;
pub const ORNAMENT_SHARE: f32 = 0.1;
pub const ORNAMENT_RGB: [f32; 3] = [196.0 / 255.0, 30.0 / 255.0, 58.0 / 255.0]; // #c41e3a
pub const SPARKLE_RGB: [f32; 3] = [1.0, 1.0, 1.0];

// Card placement on the tree surface
pub const CARD_TREE_BASE_Y: f32 = -50.0;
pub const CARD_TREE_HEIGHT: f32 = 100.0;
pub const CARD_TREE_RADIUS: f32 = 45.0;
pub const CARD_TREE_RADIUS_PAD: f32 = 5.0;

// Card placement in the burst (box the camera frames, lower two thirds)
pub const CARD_BURST_MIN: Vec3 = Vec3::new(-35.0, -25.0, 0.0);
pub const CARD_BURST_MAX: Vec3 = Vec3::new(35.0, 35.0, 60.0);
pub const CARD_MIN_SEPARATION: f32 = 15.0;
pub const CARD_PLACEMENT_ATTEMPTS: u32 = 100;
pub const CARD_FALLBACK_Z_SHIFT: f32 = -10.0;

// Card motion parameters
pub const CARD_TILT_MAX: f32 = 0.5; // radians, either direction
pub const CARD_FLOAT_SPEED: (f32, f32) = (0.8, 2.0);
pub const CARD_FLOAT_AMPLITUDE: (f32, f32) = (2.0, 4.0);
pub const CARD_WORLD_WIDTH: f32 = 8.0;
pub const CARD_EXPANDED_SCALE: f32 = 4.0;

// Card easing factors (per frame)
pub const CARD_POSITION_SMOOTHING: f32 = 0.05;
pub const CARD_SCALE_SMOOTHING: f32 = 0.1;
pub const CARD_ROTATION_SMOOTHING: f32 = 0.1;
pub const CARD_OPACITY_SMOOTHING: f32 = 0.05;
pub const CARD_VISIBLE_OPACITY: f32 = 0.01; // below this a card is neither drawn nor picked

// Render order
pub const CARD_RENDER_ORDER: u32 = 999;
pub const CARD_RENDER_ORDER_EXPANDED: u32 = 10_000;

// Polaroid artwork (pixels)
pub const POLAROID_WIDTH: f32 = 350.0;
pub const POLAROID_PADDING: f32 = 25.0;
pub const POLAROID_BOTTOM: f32 = 80.0;
// Largest artwork side; WebGPU guarantees 2D textures at least this big
pub const POLAROID_MAX_SIDE: u32 = 8192;

// Interaction
pub const DRAG_ROTATE_PER_PX: f32 = 0.005;
pub const DRAG_CLICK_THRESHOLD_PX: f32 = 4.0; // travel beyond this turns a press into a drag
pub const CLICK_SUPPRESS_SEC: f64 = 0.010;
pub const ROTATION_OFFSET_DECAY: f32 = 0.95;

// Cloud spin (radians per frame)
pub const CLOUD_SPIN: f32 = 0.003;
pub const CLOUD_SPIN_EXPLODED_BIAS: f32 = -0.004;

// Camera
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_HOME: Vec3 = Vec3::new(0.0, 30.0, 120.0);
pub const CAMERA_LOOK_AT: Vec3 = Vec3::new(0.0, 10.0, 0.0);
pub const CAMERA_DRIFT_PER_PX: f32 = 0.001;
pub const CAMERA_DRIFT_RANGE: f32 = 100.0;
pub const CAMERA_DRIFT_SMOOTHING: f32 = 0.05;

// Topper (star above the tree)
pub const TOPPER_POSITION: Vec3 = Vec3::new(0.0, 62.0, 0.0);
pub const TOPPER_OUTER_RADIUS: f32 = 2.5;
pub const TOPPER_INNER_RADIUS: f32 = 1.2;
pub const TOPPER_POINTS: usize = 5;
pub const TOPPER_SPIN: f32 = -0.02;
pub const TOPPER_SWAY: f32 = 0.1;
pub const TOPPER_PULSE: f32 = 0.1;

// Photo set loaded at startup: p1.jpg ..= p50.jpg
pub const PHOTO_COUNT: usize = 50;

pub fn photo_file_name(index: usize) -> String {
    format!("p{index}.jpg")
}
