use std::io::Write;

use image::RgbaImage;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::encode::jpeg_writer::JpegWriter;
use crate::image_pipeline::encode::standard_tiff_writer::StandardTiffWriter;
use crate::image_pipeline::encode::types::{OutputFormat, PipelineConfig};

pub trait ImageWriter {
    fn write_image(&self, image: &RgbaImage, output: &mut dyn Write, config: &PipelineConfig) -> Result<()>;
}

/// Picks the encoder from `config.output_format`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatWriter;

impl ImageWriter for FormatWriter {
    fn write_image(&self, image: &RgbaImage, output: &mut dyn Write, config: &PipelineConfig) -> Result<()> {
        match config.output_format {
            OutputFormat::Jpeg => JpegWriter.write_image(image, output, config),
            OutputFormat::Tiff => StandardTiffWriter.write_image(image, output, config),
        }
    }
}
