#![cfg(target_arch = "wasm32")]
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use tree_core::{CardArtwork, FrameDriver, InputEvent, SceneConfig};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod loader;
mod render;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("tree-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Canvas internal pixel size tracks CSS size * devicePixelRatio
    dom::sync_canvas_backing_size(&canvas);

    let driver: FrameDriver<CardArtwork> = FrameDriver::new(SceneConfig::default());
    let tx = driver.input_sender();
    let size = input::canvas_css_size(&canvas);
    let _ = tx.send(input::timed(InputEvent::Resize {
        width: size.x,
        height: size.y,
    }));
    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        tx,
    });

    loader::load_all(driver.load_sender());

    let gpu = frame::init_gpu(&canvas, &driver).await;
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        driver,
        gpu,
        canvas,
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
