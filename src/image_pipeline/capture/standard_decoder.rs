//! Captured image decoder backed by the `image` crate.
//!
//! Camera output is usually JPEG, but any format the `image` crate was built
//! with (JPEG, PNG, TIFF) is accepted. The format is sniffed from the bytes,
//! not from a file extension, since capture destinations are not guaranteed
//! to carry one.

use tracing::debug;

use crate::image_pipeline::capture::decoder::ImageDecoder;
use crate::image_pipeline::capture::types::CapturedImage;
use crate::image_pipeline::common::error::{PipelineError, Result};

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardDecoder;

impl ImageDecoder for StandardDecoder {
    /// Decodes camera output into an RGBA8 buffer.
    ///
    /// # Arguments
    ///
    /// * `data` - Encoded image bytes as written by the camera
    ///
    /// # Returns
    ///
    /// * `Ok(CapturedImage)` - The decoded pixels, converted to RGBA8
    /// * `Err(PipelineError::DecodeError)` - Unknown format or corrupt data
    fn decode(&self, data: &[u8]) -> Result<CapturedImage> {
        debug!("Decoding captured image, {} bytes", data.len());

        let format = image::guess_format(data)
            .map_err(|e| PipelineError::DecodeError(e.to_string()))?;
        let decoded = image::load_from_memory_with_format(data, format)
            .map_err(|e| PipelineError::DecodeError(e.to_string()))?;

        debug!(
            "Decoded {:?} image: {}x{}",
            format,
            decoded.width(),
            decoded.height()
        );

        Ok(CapturedImage::new(decoded.into_rgba8()))
    }
}
