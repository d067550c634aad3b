use crate::image_pipeline::capture::types::CapturedImage;
use crate::image_pipeline::common::error::Result;

pub trait ImageDecoder {
    fn decode(&self, data: &[u8]) -> Result<CapturedImage>;
}
