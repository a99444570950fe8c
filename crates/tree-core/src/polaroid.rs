//! Card artwork geometry: a photo on a white frame with a deep bottom margin.
//!
//! Frontends draw the artwork with whatever 2D API they have; the layout and
//! the resulting world-space scale are shared so both agree on proportions.

use crate::constants::*;
use crate::error::CardError;
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolaroidLayout {
    pub card_width: f32,
    pub card_height: f32,
    pub padding: f32,
    pub photo_width: f32,
    pub photo_height: f32,
}

impl PolaroidLayout {
    /// Layout for a photo of the given pixel size. The card width is fixed and
    /// its height follows the photo's aspect ratio; photos so tall that the
    /// card would exceed [`POLAROID_MAX_SIDE`] are rejected.
    pub fn for_photo(width: u32, height: u32) -> Result<Self, CardError> {
        if width == 0 || height == 0 {
            return Err(CardError::EmptyImage { width, height });
        }
        let photo_width = POLAROID_WIDTH - 2.0 * POLAROID_PADDING;
        let photo_height = photo_width * height as f32 / width as f32;
        let layout = Self {
            card_width: POLAROID_WIDTH,
            card_height: POLAROID_PADDING + photo_height + POLAROID_BOTTOM,
            padding: POLAROID_PADDING,
            photo_width,
            photo_height,
        };
        let (w, h) = layout.canvas_size();
        if w > POLAROID_MAX_SIDE || h > POLAROID_MAX_SIDE {
            return Err(CardError::ArtworkTooLarge {
                width: w,
                height: h,
                max: POLAROID_MAX_SIDE,
            });
        }
        Ok(layout)
    }

    /// Width over height of the whole card.
    #[inline]
    pub fn aspect(&self) -> f32 {
        self.card_width / self.card_height
    }

    /// Pixel size of the artwork canvas, rounded up.
    pub fn canvas_size(&self) -> (u32, u32) {
        (
            self.card_width.ceil() as u32,
            self.card_height.ceil() as u32,
        )
    }

    /// World-space size of the card at rest: fixed width, height by aspect.
    pub fn base_scale(&self) -> Vec2 {
        Vec2::new(CARD_WORLD_WIDTH, CARD_WORLD_WIDTH / self.aspect())
    }
}

/// Composed RGBA8 card artwork, row-major, `width * height * 4` bytes.
#[derive(Clone, Debug)]
pub struct CardArtwork {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl CardArtwork {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, CardError> {
        let expected = width as usize * height as usize * 4;
        if width == 0 || height == 0 {
            return Err(CardError::EmptyImage { width, height });
        }
        if rgba.len() != expected {
            return Err(CardError::ArtworkSize {
                expected,
                actual: rgba.len(),
            });
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }
}
