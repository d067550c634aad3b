use std::io::Write;
use std::path::Path;

use image::RgbaImage;
use tracing::{info, instrument, warn};

use crate::color::Color;
use crate::image_pipeline::{
    capture::{CapturedImage, ImageDecoder, StandardDecoder},
    common::error::{PipelineError, Result},
    common::timing::PipelineTimings,
    encode::{FormatWriter, ImageWriter, PipelineConfig},
    tint,
};

pub struct TintPipeline<D: ImageDecoder, W: ImageWriter> {
    decoder: D,
    writer: W,
    config: PipelineConfig,
}

impl TintPipeline<StandardDecoder, FormatWriter> {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            decoder: StandardDecoder,
            writer: FormatWriter,
            config,
        }
    }
}

impl<D: ImageDecoder, W: ImageWriter> TintPipeline<D, W> {
    pub fn with_custom(decoder: D, writer: W, config: PipelineConfig) -> Self {
        Self {
            decoder,
            writer,
            config,
        }
    }

    fn validate_dimensions(&self, width: u32, height: u32) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(PipelineError::InvalidDimensions(width, height));
        }

        if let Some(max) = self.config.max_dimension {
            if width > max || height > max {
                warn!("Image dimensions {}x{} exceed maximum {}", width, height, max);
                return Err(PipelineError::InvalidDimensions(width, height));
            }
        }

        Ok(())
    }

    /// Applies the configured tint to an already decoded photo.
    pub fn tint(&self, image: &CapturedImage, color: Color) -> Result<RgbaImage> {
        let operator = tint::for_mode(
            self.config.tint_mode,
            self.config.overlay_alpha,
            self.config.saturation,
        )?;
        Ok(operator.apply(image, color))
    }

    #[instrument(skip(self, input_data, output, color), fields(input_size = input_data.len(), %color))]
    pub fn process(&self, input_data: &[u8], color: Color, output: &mut dyn Write) -> Result<()> {
        self.process_with_timings(input_data, color, output)?;
        Ok(())
    }

    pub fn process_with_timings(
        &self,
        input_data: &[u8],
        color: Color,
        output: &mut dyn Write,
    ) -> Result<PipelineTimings> {
        let mut timings = PipelineTimings::new();
        info!(mode = ?self.config.tint_mode, "Starting photo tint");

        let image = timings.time("decode_capture", || {
            let _span = tracing::info_span!("decode_capture").entered();
            self.decoder.decode(input_data)
        })?;

        timings.time("validate_dimensions", || {
            let _span = tracing::info_span!(
                "validate_dimensions",
                width = image.width(),
                height = image.height()
            )
            .entered();
            self.validate_dimensions(image.width(), image.height())
        })?;

        let tinted = timings.time("tint", || {
            let _span = tracing::info_span!("tint").entered();
            self.tint(&image, color)
        })?;

        timings.time("encode", || {
            let _span = tracing::info_span!("encode", format = ?self.config.output_format).entered();
            self.writer.write_image(&tinted, output, &self.config)
        })?;

        info!(
            width = tinted.width(),
            height = tinted.height(),
            millis = timings.total_duration().as_secs_f64() * 1000.0,
            "Tint complete"
        );
        Ok(timings)
    }

    /// Tints the photo at `input_path` and persists it at `output_path`.
    ///
    /// The encoded photo is staged in a temporary file next to the
    /// destination and only renamed into place once fully written, so a
    /// failed run never leaves a partial file behind.
    #[instrument(skip(self, input_path, output_path))]
    pub fn process_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
        color: Color,
    ) -> Result<PipelineTimings> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Tinting file"
        );

        let mut timings = PipelineTimings::new();

        let input_data = timings.time("read_input_file", || {
            std::fs::read(input_path).map_err(|e| {
                PipelineError::InputReadError(format!("{}: {}", input_path.display(), e))
            })
        })?;

        let output_dir = output_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut staged = timings.time("create_output_file", || {
            tempfile::Builder::new()
                .prefix(".magnetophoto-")
                .tempfile_in(output_dir)
                .map_err(|e| {
                    PipelineError::OutputWriteError(format!("{}: {}", output_dir.display(), e))
                })
        })?;

        let steps = self.process_with_timings(&input_data, color, staged.as_file_mut())?;
        for step in steps.steps() {
            timings.record(step.name, step.duration);
        }

        timings.time("persist_output_file", || {
            staged.as_file().sync_all()?;
            staged.persist(output_path).map_err(|e| {
                PipelineError::OutputWriteError(format!("{}: {}", output_path.display(), e.error))
            })?;
            Ok::<(), PipelineError>(())
        })?;

        Ok(timings)
    }

    /// Copy of this pipeline rendering with `saturation` in saturation mode.
    pub fn with_saturation(&self, saturation: f32) -> Self
    where
        D: Clone,
        W: Clone,
    {
        let mut config = self.config.clone();
        config.saturation = saturation;
        Self::with_custom(self.decoder.clone(), self.writer.clone(), config)
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: PipelineConfig) {
        self.config = config;
    }
}
