use crate::constants::{photo_url, FRAME_FILL, PHOTO_FALLBACK_FILL};
use crate::dom;
use std::sync::mpsc::Sender;
use tree_core::constants::PHOTO_COUNT;
use tree_core::{CardArtwork, LoadedImage, PolaroidLayout};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

/// Start loading every photo. Each image resolves on its own; finished ones
/// are handed to the frame driver, failed ones are only logged.
pub fn load_all(tx: Sender<LoadedImage<CardArtwork>>) {
    for i in 1..=PHOTO_COUNT {
        let url = photo_url(i);
        let tx = tx.clone();
        spawn_local(async move {
            match load_one(&url).await {
                Ok(image) => {
                    let _ = tx.send(image);
                }
                Err(e) => log::debug!("[loader] {}: {}", url, e),
            }
        });
    }
}

async fn load_one(url: &str) -> anyhow::Result<LoadedImage<CardArtwork>> {
    let img = web::HtmlImageElement::new().map_err(js_err)?;
    img.set_cross_origin(Some("anonymous"));
    img.set_src(url);
    JsFuture::from(img.decode()).await.map_err(js_err)?;
    let (width, height) = (img.natural_width(), img.natural_height());
    let artwork = compose_polaroid(&img, width, height)?;
    Ok(LoadedImage {
        source: url.to_string(),
        width,
        height,
        handle: artwork,
    })
}

/// Draw the photo onto a white polaroid frame and read the pixels back.
fn compose_polaroid(
    img: &web::HtmlImageElement,
    width: u32,
    height: u32,
) -> anyhow::Result<CardArtwork> {
    let layout = PolaroidLayout::for_photo(width, height)?;
    let (cw, ch) = layout.canvas_size();
    let (_canvas, ctx) = dom::create_canvas_2d(cw, ch)?;

    #[allow(deprecated)]
    ctx.set_fill_style(&JsValue::from_str(FRAME_FILL));
    ctx.fill_rect(0.0, 0.0, cw as f64, ch as f64);

    let pad = layout.padding as f64;
    let (pw, ph) = (layout.photo_width as f64, layout.photo_height as f64);
    if let Err(e) = ctx.draw_image_with_html_image_element_and_dw_and_dh(img, pad, pad, pw, ph) {
        log::debug!("[loader] draw failed, using flat fill: {:?}", e);
        #[allow(deprecated)]
        ctx.set_fill_style(&JsValue::from_str(PHOTO_FALLBACK_FILL));
        ctx.fill_rect(pad, pad, pw, ph);
    }

    let data = ctx
        .get_image_data(0.0, 0.0, cw as f64, ch as f64)
        .map_err(js_err)?;
    Ok(CardArtwork::new(cw, ch, data.data().0)?)
}
