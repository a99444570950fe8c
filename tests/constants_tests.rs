// Host-side tests for the page constants and shared tuning values.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use tree_core::constants as core;

#[test]
fn photo_urls_follow_the_naming_scheme() {
    assert_eq!(photo_url(1), "./images/p1.jpg");
    assert_eq!(photo_url(core::PHOTO_COUNT), "./images/p50.jpg");
}

#[test]
fn clear_color_is_opaque() {
    assert_eq!(CLEAR_RGBA[3], 1.0);
    assert!(CLEAR_RGBA.iter().all(|c| (0.0..=1.0).contains(c)));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn tuning_values_are_within_reasonable_bounds() {
    // easing factors must be in (0, 1] to converge without overshoot
    for f in [
        core::BLEND_SMOOTHING,
        core::CARD_POSITION_SMOOTHING,
        core::CARD_SCALE_SMOOTHING,
        core::CARD_ROTATION_SMOOTHING,
        core::CARD_OPACITY_SMOOTHING,
        core::CAMERA_DRIFT_SMOOTHING,
    ] {
        assert!(f > 0.0 && f <= 1.0);
    }
    assert!((0.0..1.0).contains(&core::ROTATION_OFFSET_DECAY));

    let shares = core::NEEDLE_SHARE + core::GOLD_SHARE + core::ORNAMENT_SHARE;
    assert!(shares < 1.0);

    assert!(core::BURST_RADIUS_MIN < core::BURST_RADIUS_MAX);
    assert!(core::CARD_RENDER_ORDER < core::CARD_RENDER_ORDER_EXPANDED);
    assert!(core::CARD_VISIBLE_OPACITY > 0.0);
    assert!(core::CAMERA_NEAR < core::CAMERA_FAR);
}

#[test]
fn tree_apex_sits_under_the_topper() {
    let apex = core::TREE_BASE_Y + core::TREE_HEIGHT;
    assert!(core::TOPPER_POSITION.y > apex);
    assert!(core::TOPPER_POSITION.y - apex < 5.0);
}
