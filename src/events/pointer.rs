use crate::dom;
use crate::input;
use std::sync::mpsc::Sender;
use tree_core::{InputEvent, TimedInput};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Pointer Events cover mouse, touch and pen alike; positions are sent in CSS
/// pixels relative to the canvas.
#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub tx: Sender<TimedInput>,
}

impl InputWiring {
    fn send(&self, event: InputEvent) {
        // The receiver lives as long as the page.
        let _ = self.tx.send(input::timed(event));
    }
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointerdown(&w);
    wire_pointermove(&w);
    wire_pointerup(&w);
    wire_click(&w);
    wire_resize(&w);
}

fn listen<E: JsCast + 'static>(
    target: &web::EventTarget,
    name: &str,
    mut handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        if let Ok(ev) = ev.dyn_into::<E>() {
            handler(ev);
        }
    }) as Box<dyn FnMut(web::Event)>);
    if target
        .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
        .is_err()
    {
        log::warn!("[input] failed to listen for {}", name);
    }
    closure.forget();
}

fn wire_pointerdown(w: &InputWiring) {
    let w2 = w.clone();
    listen(&w.canvas, "pointerdown", move |ev: web::PointerEvent| {
        let pos = input::pointer_css_px(&ev, &w2.canvas);
        w2.send(InputEvent::PointerDown { pos });
    });
}

fn wire_pointermove(w: &InputWiring) {
    let w2 = w.clone();
    let Some(window) = web::window() else {
        return;
    };
    // On the window so drags keep tracking outside the canvas
    listen(&window, "pointermove", move |ev: web::PointerEvent| {
        let pos = input::pointer_css_px(&ev, &w2.canvas);
        w2.send(InputEvent::PointerMove { pos });
    });
}

fn wire_pointerup(w: &InputWiring) {
    let w2 = w.clone();
    let Some(window) = web::window() else {
        return;
    };
    listen(&window, "pointerup", move |_: web::PointerEvent| {
        w2.send(InputEvent::PointerUp);
    });
    let w3 = w.clone();
    listen(&window, "pointercancel", move |_: web::PointerEvent| {
        w3.send(InputEvent::PointerUp);
    });
}

fn wire_click(w: &InputWiring) {
    let w2 = w.clone();
    listen(&w.canvas, "click", move |ev: web::MouseEvent| {
        // Keep the pointer where the click landed even without a prior move.
        let pos = input::pointer_css_px(&ev, &w2.canvas);
        w2.send(InputEvent::PointerMove { pos });
        w2.send(InputEvent::Click);
    });
}

fn wire_resize(w: &InputWiring) {
    let w2 = w.clone();
    let Some(window) = web::window() else {
        return;
    };
    listen(&window, "resize", move |_: web::Event| {
        dom::sync_canvas_backing_size(&w2.canvas);
        let size = input::canvas_css_size(&w2.canvas);
        log::info!("[input] resize {}x{}", size.x, size.y);
        w2.send(InputEvent::Resize {
            width: size.x,
            height: size.y,
        });
    });
}
