use glam::Vec2;
use tree_core::{InputEvent, TimedInput};
use web_sys as web;

/// Pointer position relative to the canvas in CSS pixels.
#[inline]
pub fn pointer_css_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    Vec2::new(
        ev.client_x() as f32 - rect.left() as f32,
        ev.client_y() as f32 - rect.top() as f32,
    )
}

#[inline]
pub fn canvas_css_size(canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    Vec2::new(rect.width() as f32, rect.height() as f32)
}

/// Seconds on the clock shared by input timestamps and frame ticks.
#[inline]
pub fn now_sec() -> f64 {
    instant::now() / 1000.0
}

#[inline]
pub fn timed(event: InputEvent) -> TimedInput {
    TimedInput {
        at: now_sec(),
        event,
    }
}
