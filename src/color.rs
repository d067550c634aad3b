//! Sensor-to-color mapping
//!
//! Paired sensor axes are multiplied together and each product is squeezed
//! through a fixed linear window into one 8-bit channel.

mod error;
mod mapper;
pub mod normalize;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::{ColorError, Result};
pub use mapper::{ChannelPair, ColorMapper};
pub use normalize::NormalizationWindow;
pub use types::Color;
