use image::{imageops, Rgba, RgbaImage};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::thread;
use tree_core::constants::{photo_file_name, PHOTO_COUNT};
use tree_core::{CardArtwork, LoadedImage, PolaroidLayout};

const FRAME_WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const PHOTO_FALLBACK: Rgba<u8> = Rgba([0x33, 0x33, 0x33, 255]);

/// Draw a photo onto a white polaroid frame.
pub fn compose_polaroid(photo: &RgbaImage) -> anyhow::Result<CardArtwork> {
    let layout = PolaroidLayout::for_photo(photo.width(), photo.height())?;
    let (w, h) = layout.canvas_size();
    let mut canvas = RgbaImage::from_pixel(w, h, FRAME_WHITE);
    let pad = layout.padding.round() as u32;
    let pw = layout.photo_width.round() as u32;
    let ph = layout.photo_height.round() as u32;
    if pw == 0 || ph == 0 {
        // Degenerate aspect: keep the card, paint the photo area flat.
        log::debug!("[loader] photo {}x{} too thin to draw", photo.width(), photo.height());
        for y in pad..(pad + ph.max(1)).min(h) {
            for x in pad..(pad + pw.max(1)).min(w) {
                canvas.put_pixel(x, y, PHOTO_FALLBACK);
            }
        }
    } else {
        let resized = imageops::resize(photo, pw, ph, imageops::FilterType::Triangle);
        imageops::overlay(&mut canvas, &resized, pad as i64, pad as i64);
    }
    Ok(CardArtwork::new(w, h, canvas.into_raw())?)
}

fn load_one(path: &Path) -> anyhow::Result<LoadedImage<CardArtwork>> {
    let photo = image::open(path)?.to_rgba8();
    let (width, height) = photo.dimensions();
    let artwork = compose_polaroid(&photo)?;
    Ok(LoadedImage {
        source: path.display().to_string(),
        width,
        height,
        handle: artwork,
    })
}

/// Load `p1.jpg ..= p50.jpg` from `dir` on a background thread. Missing or
/// undecodable files are skipped; the thread stops early if the receiver goes
/// away.
pub fn spawn(dir: PathBuf, tx: Sender<LoadedImage<CardArtwork>>) -> anyhow::Result<()> {
    thread::Builder::new()
        .name("card-loader".into())
        .spawn(move || {
            let mut loaded = 0usize;
            for i in 1..=PHOTO_COUNT {
                let path = dir.join(photo_file_name(i));
                match load_one(&path) {
                    Ok(image) => {
                        if tx.send(image).is_err() {
                            return;
                        }
                        loaded += 1;
                    }
                    Err(e) => log::debug!("[loader] {}: {}", path.display(), e),
                }
            }
            log::info!("[loader] {} of {} photos loaded from {}", loaded, PHOTO_COUNT, dir.display());
        })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polaroid_has_white_frame_and_photo_inside() {
        let photo = RgbaImage::from_pixel(600, 400, Rgba([10, 20, 30, 255]));
        let art = compose_polaroid(&photo).unwrap();
        assert_eq!(art.width, 350);
        // 25 + 200 + 80
        assert_eq!(art.height, 305);
        let px = |x: u32, y: u32| {
            let i = ((y * art.width + x) * 4) as usize;
            [art.rgba[i], art.rgba[i + 1], art.rgba[i + 2]]
        };
        assert_eq!(px(2, 2), [255, 255, 255]);
        let inside = px(175, 120);
        for (got, want) in inside.iter().zip([10u8, 20, 30]) {
            assert!(got.abs_diff(want) <= 1, "{inside:?}");
        }
        assert_eq!(px(175, 290), [255, 255, 255]);
    }

    #[test]
    fn empty_photo_is_rejected() {
        let photo = RgbaImage::new(0, 10);
        assert!(compose_polaroid(&photo).is_err());
    }

    #[test]
    fn sliver_photo_is_rejected_before_composing() {
        let photo = RgbaImage::new(1, 10_000);
        assert!(compose_polaroid(&photo).is_err());
    }
}
