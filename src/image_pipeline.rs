//! Photo processing pipeline module
//!
//! Decoding of captured photos, tinting, encoding and persistence, with one
//! submodule per stage and the orchestration in `conversions`.

pub mod capture;
pub mod common;
pub mod conversions;
pub mod encode;
pub mod tint;

pub use common::{
    PipelineError,
    PipelineTimings,
    Result,
};

pub use capture::{
    CaptureError,
    CaptureSource,
    CapturedImage,
    FileCapture,
    ImageDecoder,
    StandardDecoder,
};

pub use encode::{
    FormatWriter,
    ImageWriter,
    JpegWriter,
    OutputFormat,
    PipelineConfig,
    PipelineConfigBuilder,
    StandardTiffWriter,
    TiffCompression,
};

pub use tint::{
    ColorFilter,
    ColorMatrix,
    SourceAtopOverlay,
    Tint,
    TintMode,
};

pub use conversions::TintPipeline;
