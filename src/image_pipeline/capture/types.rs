//! Captured image types

use std::sync::Arc;

use image::RgbaImage;

/// A decoded photo as produced by the camera.
///
/// The buffer is shared read-only; every tint produces a new buffer and the
/// original pixels are never written.
#[derive(Debug, Clone)]
pub struct CapturedImage {
    pixels: Arc<RgbaImage>,
}

impl CapturedImage {
    pub fn new(pixels: RgbaImage) -> Self {
        Self {
            pixels: Arc::new(pixels),
        }
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// An owned copy of the pixels that can be drawn on.
    pub fn duplicate(&self) -> RgbaImage {
        self.pixels.as_ref().clone()
    }
}

impl From<RgbaImage> for CapturedImage {
    fn from(pixels: RgbaImage) -> Self {
        Self::new(pixels)
    }
}
