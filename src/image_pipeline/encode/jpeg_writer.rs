use std::io::Write;

use image::codecs::jpeg::JpegEncoder;
use image::buffer::ConvertBuffer;
use image::{ExtendedColorType, ImageEncoder, RgbImage, RgbaImage};
use tracing::debug;

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::encode::types::PipelineConfig;
use crate::image_pipeline::encode::writer::ImageWriter;

/// JPEG has no alpha channel; it is dropped before encoding.
pub struct JpegWriter;

impl ImageWriter for JpegWriter {
    fn write_image(&self, image: &RgbaImage, output: &mut dyn Write, config: &PipelineConfig) -> Result<()> {
        let quality = config.jpeg_quality.clamp(1, 100);
        debug!("Encoding JPEG image: {}x{} at quality {}", image.width(), image.height(), quality);

        let rgb: RgbImage = image.convert();
        let mut buffer = Vec::new();
        JpegEncoder::new_with_quality(&mut buffer, quality)
            .write_image(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
            .map_err(|e| PipelineError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!("JPEG encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}
