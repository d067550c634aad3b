//! Tint configuration types

use serde::{Deserialize, Serialize};

/// Default opacity of the baked overlay.
pub const DEFAULT_OVERLAY_ALPHA: f32 = 0.4;

/// Saturation used by [`TintMode::Saturation`] until the magnetometer reports.
pub const DEFAULT_SATURATION: f32 = 1.0;

/// How the sensor color is applied to a photo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TintMode {
    /// Color matrix applied while rendering, pixels stay untouched
    Filter,
    /// Color matrix whose saturation follows the magnetic field X axis
    Saturation,
    /// Overlay painted into a copy of the photo (source-atop)
    #[default]
    Bake,
}
