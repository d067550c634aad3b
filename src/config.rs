//! User settings
//!
//! Reads/writes settings from ~/.config/magnetophoto/config.toml

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::color::{Color, ColorMapper, NormalizationWindow};
use crate::color::normalize::{DEFAULT_WINDOW_MAX, DEFAULT_WINDOW_MIN};
use crate::image_pipeline::encode::types::DEFAULT_JPEG_QUALITY;
use crate::image_pipeline::tint::types::DEFAULT_OVERLAY_ALPHA;
use crate::image_pipeline::{OutputFormat, PipelineConfig, TintMode};
use crate::sensors::Axis;

/// How sensor readings become a color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorSettings {
    pub window_min: f64,
    pub window_max: f64,
    /// Vector component read from each sensor
    pub axis: Axis,
    /// Color used until every required sensor has reported
    pub default_color: Color,
}

impl Default for ColorSettings {
    fn default() -> Self {
        Self {
            window_min: DEFAULT_WINDOW_MIN,
            window_max: DEFAULT_WINDOW_MAX,
            axis: Axis::Z,
            default_color: Color::NEUTRAL,
        }
    }
}

/// How the color is applied and the photo saved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TintSettings {
    pub mode: TintMode,
    pub overlay_alpha: f32,
    pub format: OutputFormat,
    pub jpeg_quality: u8,
}

impl Default for TintSettings {
    fn default() -> Self {
        Self {
            mode: TintMode::default(),
            overlay_alpha: DEFAULT_OVERLAY_ALPHA,
            format: OutputFormat::default(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub color: ColorSettings,
    #[serde(default)]
    pub tint: TintSettings,
}

impl Settings {
    /// Get the settings file path
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("magnetophoto").join("config.toml"))
    }

    /// Load settings from the default location, or defaults if absent or broken
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            tracing::warn!("Could not determine config directory, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", path);
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => {
                tracing::info!("Loaded config from {:?}", path);
                settings
            }
            Err(e) => {
                tracing::error!("Failed to load config file: {:#}", e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Save settings to the default location
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = Self::path().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    pub fn mapper(&self) -> crate::color::Result<ColorMapper> {
        let window = NormalizationWindow::new(self.color.window_min, self.color.window_max)?;
        Ok(ColorMapper::default().with_window(window).with_axis(self.color.axis))
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig::builder()
            .tint_mode(self.tint.mode)
            .overlay_alpha(self.tint.overlay_alpha)
            .output_format(self.tint.format)
            .jpeg_quality(self.tint.jpeg_quality)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert_eq!(settings.color.window_min, -1000.0);
        assert_eq!(settings.color.window_max, 1000.0);
        assert_eq!(settings.color.default_color, Color::NEUTRAL);
        assert_eq!(settings.tint.mode, TintMode::Bake);
        assert_eq!(settings.mapper().unwrap().window(), &NormalizationWindow::DEFAULT);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [color]
            window_max = 500.0
            default_color = [10, 20, 30]

            [tint]
            mode = "filter"
            "#,
        )
        .unwrap();

        assert_eq!(settings.color.window_min, -1000.0);
        assert_eq!(settings.color.window_max, 500.0);
        assert_eq!(settings.color.default_color, Color::new(10, 20, 30));
        assert_eq!(settings.tint.mode, TintMode::Filter);
        assert_eq!(settings.tint.format, OutputFormat::Jpeg);

        let config = settings.pipeline_config();
        assert_eq!(config.tint_mode, TintMode::Filter);
        assert_eq!(config.jpeg_quality, DEFAULT_JPEG_QUALITY);
    }

    #[test]
    fn test_inverted_window_is_rejected() {
        let mut settings = Settings::default();
        settings.color.window_min = 10.0;
        settings.color.window_max = -10.0;
        assert!(settings.mapper().is_err());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.color.axis = Axis::X;
        settings.tint.format = OutputFormat::Tiff;
        settings.save_to(&path).unwrap();

        assert_eq!(Settings::load_from(&path).unwrap(), settings);
    }
}
