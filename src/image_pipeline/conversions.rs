//! Pipeline conversions module
//!
//! Orchestrates decode, tint, encode and persist for a captured photo.

mod capture_to_tint;


pub use capture_to_tint::TintPipeline;
