//! Common utilities module
//!
//! Errors and step timing shared across the photo pipeline.

pub mod error;
pub mod timing;

pub use error::{PipelineError, Result};
pub use timing::{PipelineTimings, StepTiming, Timer};
