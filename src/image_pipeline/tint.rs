//! Tinting of captured photos
//!
//! Two strategies: a display-time color filter that renders the original into
//! a fresh buffer, and a bake that paints the color over a duplicate with a
//! partial source-atop overlay. Neither touches the captured pixels.

mod bake;
mod filter;
pub mod types;


use image::RgbaImage;

use crate::color::Color;
use crate::image_pipeline::capture::CapturedImage;
use crate::image_pipeline::common::error::Result;

pub use bake::SourceAtopOverlay;
pub use filter::{ColorFilter, ColorMatrix, FilterTint, SaturationTint};
pub use types::TintMode;

pub trait Tint {
    /// Returns a new buffer of the same dimensions carrying the tint.
    fn apply(&self, image: &CapturedImage, color: Color) -> RgbaImage;
}

/// Builds the tint operator for `mode`. `saturation` only affects
/// [`TintMode::Saturation`].
pub fn for_mode(
    mode: TintMode,
    overlay_alpha: f32,
    saturation: f32,
) -> Result<Box<dyn Tint + Send + Sync>> {
    Ok(match mode {
        TintMode::Filter => Box::new(FilterTint),
        TintMode::Saturation => Box::new(SaturationTint::new(saturation)),
        TintMode::Bake => Box::new(SourceAtopOverlay::new(overlay_alpha)?),
    })
}
