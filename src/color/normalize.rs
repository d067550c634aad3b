use tracing::debug;

use crate::color::error::{ColorError, Result};

/// Lower bound of the default normalization window.
pub const DEFAULT_WINDOW_MIN: f64 = -1000.0;

/// Upper bound of the default normalization window.
pub const DEFAULT_WINDOW_MAX: f64 = 1000.0;

/// Fallback channel value when a product cannot be normalized.
const FALLBACK_CHANNEL: u8 = 0;

/// Linear map from `[min, max]` onto `[0, 255]`.
///
/// `min < max` and a finite `max - min` always hold, so the rescale never
/// divides by zero or infinity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizationWindow {
    min: f64,
    max: f64,
}

impl NormalizationWindow {
    pub const DEFAULT: NormalizationWindow = NormalizationWindow {
        min: DEFAULT_WINDOW_MIN,
        max: DEFAULT_WINDOW_MAX,
    };

    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !(min.is_finite() && max.is_finite() && min < max && (max - min).is_finite()) {
            return Err(ColorError::InvalidWindow { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Maps `value` to a color channel.
    ///
    /// Values outside the window saturate at 0 or 255. The scaled result is
    /// truncated toward zero. Non-finite input yields 0 instead of an error.
    pub fn normalize(&self, value: f64) -> u8 {
        if !value.is_finite() {
            debug!(value, "non-finite sensor product, using fallback channel");
            return FALLBACK_CHANNEL;
        }
        let clamped = value.clamp(self.min, self.max);
        let scaled = (clamped - self.min) / (self.max - self.min) * 255.0;
        scaled as u8
    }
}

impl Default for NormalizationWindow {
    fn default() -> Self {
        Self::DEFAULT
    }
}
