//! Photo pipeline configuration types

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::image_pipeline::tint::TintMode;
use crate::image_pipeline::tint::types::{DEFAULT_OVERLAY_ALPHA, DEFAULT_SATURATION};

/// Default JPEG quality for persisted photos.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Container format of the persisted photo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Jpeg,
    Tiff,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Tiff => "tiff",
        }
    }

    /// Format named by the extension of `path`, if it is one we write.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "jpg" | "jpeg" => Some(OutputFormat::Jpeg),
            "tif" | "tiff" => Some(OutputFormat::Tiff),
            _ => None,
        }
    }
}

/// TIFF compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    #[default]
    None,
    /// LZW compression (slow, good compression)
    Lzw,
    /// Deflate compression - fast level (good speed/size balance)
    DeflateFast,
    /// Deflate compression - best compression (slower)
    DeflateBest,
    /// Deflate compression - balanced
    DeflateBalanced,
}

/// Configuration for the capture-to-tinted-photo pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// How the color is applied
    pub tint_mode: TintMode,
    /// Overlay opacity for bake mode, in [0, 1]
    pub overlay_alpha: f32,
    /// Saturation factor for saturation mode, 1.0 leaves saturation as is
    pub saturation: f32,
    /// Encoding of the persisted photo
    pub output_format: OutputFormat,
    /// JPEG quality, 1..=100
    pub jpeg_quality: u8,
    /// Compression used when `output_format` is TIFF
    pub tiff_compression: TiffCompression,
    /// Horizontal differencing predictor for TIFF output
    pub tiff_predictor: bool,
    /// Whether to validate image dimensions after decoding
    pub validate_dimensions: bool,
    /// Largest accepted width or height when validating
    pub max_dimension: Option<u32>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tint_mode: TintMode::default(),
            overlay_alpha: DEFAULT_OVERLAY_ALPHA,
            saturation: DEFAULT_SATURATION,
            output_format: OutputFormat::default(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            tiff_compression: TiffCompression::default(),
            tiff_predictor: false,
            validate_dimensions: true,
            max_dimension: None,
        }
    }
}

impl PipelineConfig {
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }
}

/// Builder for PipelineConfig
#[derive(Default)]
pub struct PipelineConfigBuilder {
    tint_mode: Option<TintMode>,
    overlay_alpha: Option<f32>,
    saturation: Option<f32>,
    output_format: Option<OutputFormat>,
    jpeg_quality: Option<u8>,
    tiff_compression: Option<TiffCompression>,
    tiff_predictor: Option<bool>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<u32>>,
}

impl PipelineConfigBuilder {
    pub fn tint_mode(mut self, mode: TintMode) -> Self {
        self.tint_mode = Some(mode);
        self
    }

    pub fn overlay_alpha(mut self, alpha: f32) -> Self {
        self.overlay_alpha = Some(alpha);
        self
    }

    pub fn saturation(mut self, saturation: f32) -> Self {
        self.saturation = Some(saturation);
        self
    }

    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = Some(quality);
        self
    }

    pub fn tiff_compression(mut self, compression: TiffCompression) -> Self {
        self.tiff_compression = Some(compression);
        self
    }

    pub fn tiff_predictor(mut self, enable: bool) -> Self {
        self.tiff_predictor = Some(enable);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<u32>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn build(self) -> PipelineConfig {
        let default = PipelineConfig::default();
        PipelineConfig {
            tint_mode: self.tint_mode.unwrap_or(default.tint_mode),
            overlay_alpha: self.overlay_alpha.unwrap_or(default.overlay_alpha),
            saturation: self.saturation.unwrap_or(default.saturation),
            output_format: self.output_format.unwrap_or(default.output_format),
            jpeg_quality: self.jpeg_quality.unwrap_or(default.jpeg_quality),
            tiff_compression: self.tiff_compression.unwrap_or(default.tiff_compression),
            tiff_predictor: self.tiff_predictor.unwrap_or(default.tiff_predictor),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
        }
    }
}
