use image::RgbaImage;
use tracing::debug;

use crate::color::Color;
use crate::image_pipeline::capture::CapturedImage;
use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::tint::Tint;

/// Paints a color over a photo with partial opacity using the source-atop rule.
///
/// Only pixels that already have coverage receive color, and their alpha is
/// kept, so transparent regions stay transparent. Painting is cumulative:
/// running it on its own output blends the color in again.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceAtopOverlay {
    alpha: f32,
}

impl SourceAtopOverlay {
    pub fn new(alpha: f32) -> Result<Self> {
        if !(0.0..=1.0).contains(&alpha) {
            return Err(PipelineError::InvalidAlpha(alpha));
        }
        Ok(Self { alpha })
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Paints `color` directly into `target`.
    pub fn paint(&self, target: &mut RgbaImage, color: Color) {
        let source = color.channels().map(|c| c as f32 * self.alpha);
        let keep = 1.0 - self.alpha;

        for pixel in target.pixels_mut() {
            if pixel[3] == 0 {
                continue;
            }
            for (channel, painted) in pixel.0[..3].iter_mut().zip(source) {
                *channel = (painted + *channel as f32 * keep).round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    /// Paints `color` onto a duplicate of `image`.
    pub fn bake(&self, image: &CapturedImage, color: Color) -> RgbaImage {
        let mut duplicate = image.duplicate();
        self.paint(&mut duplicate, color);
        duplicate
    }
}

impl Tint for SourceAtopOverlay {
    fn apply(&self, image: &CapturedImage, color: Color) -> RgbaImage {
        debug!(%color, alpha = self.alpha, "baking color overlay");
        self.bake(image, color)
    }
}
