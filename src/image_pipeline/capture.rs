//! Captured photo input
//!
//! The camera is an opaque collaborator that writes image bytes to a location;
//! this module turns those bytes into an immutable pixel buffer.

mod decoder;
mod source;
mod standard_decoder;
pub mod types;

pub use decoder::ImageDecoder;
pub use source::{CaptureError, CaptureSource, FileCapture};
pub use standard_decoder::StandardDecoder;
pub use types::CapturedImage;
