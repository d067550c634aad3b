//! Color value type

use std::fmt;
use std::str::FromStr;

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::color::error::ColorError;

/// An 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// What an all-zero sensor state maps to in the default window.
    pub const NEUTRAL: Color = Color::new(127, 127, 127);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    pub fn max_channel(&self) -> u8 {
        self.r.max(self.g).max(self.b)
    }

    pub fn min_channel(&self) -> u8 {
        self.r.min(self.g).min(self.b)
    }

    /// HSV saturation in [0, 1]; black and grays are 0.
    pub fn hsv_saturation(&self) -> f32 {
        let max = self.max_channel();
        if max == 0 {
            return 0.0;
        }
        (max - self.min_channel()) as f32 / max as f32
    }

    pub fn to_rgba(&self, alpha: u8) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, alpha])
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Color::new(r, g, b)
    }
}

impl From<Color> for [u8; 3] {
    fn from(color: Color) -> Self {
        color.channels()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Parses `#rrggbb` or `rrggbb`.
impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(ColorError::InvalidLiteral(s.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| ColorError::InvalidLiteral(s.to_string()))
        };
        Ok(Color::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}
