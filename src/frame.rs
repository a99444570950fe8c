use crate::input;
use crate::render;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use tree_core::{CardArtwork, FrameDriver};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type TickClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

pub struct FrameContext<'a> {
    pub driver: FrameDriver<CardArtwork>,
    pub gpu: Option<render::GpuState<'a>>,
    pub canvas: web::HtmlCanvasElement,
    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        let report = self.driver.tick(dt_sec, input::now_sec());
        for outcome in &report.clicks {
            log::debug!("[input] click -> {:?}", outcome);
        }

        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        for (id, art) in &report.created {
            gpu.add_card(*id, art);
        }
        gpu.resize_if_needed(self.canvas.width(), self.canvas.height());
        gpu.render(&self.driver.view());
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    driver: &FrameDriver<CardArtwork>,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, &driver.view()).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

fn request_frame(tick: &TickClosure) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: TickClosure = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}
