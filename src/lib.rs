//! Tints photos with a color derived from live motion and magnetic sensor
//! readings.
//!
//! - [`sensors`] holds the latest reading per channel behind a message loop.
//! - [`color`] multiplies paired axes and normalizes them into an RGB triple.
//! - [`image_pipeline`] decodes a capture, applies the tint, encodes and
//!   persists it.
//! - [`app`] wires those together the way an interactive front end would.

pub mod app;
pub mod color;
pub mod config;
pub mod image_pipeline;
pub mod logger;
pub mod sensors;
