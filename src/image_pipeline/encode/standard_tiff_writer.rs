use std::io::Write;

use image::RgbaImage;
use tracing::debug;

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::encode::types::{PipelineConfig, TiffCompression};
use crate::image_pipeline::encode::writer::ImageWriter;

/// Lossless RGBA8 TIFF output. Keeps the alpha channel.
pub struct StandardTiffWriter;

impl ImageWriter for StandardTiffWriter {
    fn write_image(&self, image: &RgbaImage, output: &mut dyn Write, config: &PipelineConfig) -> Result<()> {
        debug!("Encoding TIFF image: {}x{}", image.width(), image.height());

        let mut buffer = Vec::new();

        let compression = match config.tiff_compression {
            TiffCompression::None => tiff::encoder::Compression::Uncompressed,
            TiffCompression::Lzw => tiff::encoder::Compression::Lzw,
            TiffCompression::DeflateFast => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Fast),
            TiffCompression::DeflateBalanced => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Balanced),
            TiffCompression::DeflateBest => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Best),
        };

        let mut encoder = tiff::encoder::TiffEncoder::new(std::io::Cursor::new(&mut buffer))
            .map_err(|e| PipelineError::EncodeError(e.to_string()))?
            .with_compression(compression);

        if config.tiff_predictor {
            encoder = encoder.with_predictor(tiff::tags::Predictor::Horizontal);
        }

        encoder.write_image::<tiff::encoder::colortype::RGBA8>(
            image.width(),
            image.height(),
            image.as_raw(),
        ).map_err(|e| PipelineError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete");
        Ok(())
    }
}
