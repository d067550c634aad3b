//! Image encoding module
//!
//! Encodes tinted photos for persistence, as JPEG or TIFF.

mod jpeg_writer;
mod standard_tiff_writer;
pub mod types;
mod writer;

pub use jpeg_writer::JpegWriter;
pub use standard_tiff_writer::StandardTiffWriter;
pub use types::{OutputFormat, PipelineConfig, PipelineConfigBuilder, TiffCompression};
pub use writer::{FormatWriter, ImageWriter};
