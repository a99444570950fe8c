// Web front-end constants. Scene tuning lives in `tree_core::constants`; this
// file only holds what is specific to the page.
use tree_core::constants::photo_file_name;

pub const CANVAS_ID: &str = "app-canvas";

// Photos are served next to the page
pub const IMAGE_DIR: &str = "./images/";

// Background behind the cloud (linear RGBA)
pub const CLEAR_RGBA: [f64; 4] = [0.0, 0.0, 0.0, 1.0];

// Photo drawn in place of an image the 2D canvas refused to draw
pub const PHOTO_FALLBACK_FILL: &str = "#333";
pub const FRAME_FILL: &str = "#ffffff";

pub fn photo_url(index: usize) -> String {
    format!("{IMAGE_DIR}{}", photo_file_name(index))
}
