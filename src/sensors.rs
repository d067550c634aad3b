//! Sensor sampling module
//!
//! Holds the latest reading per motion/environment channel and feeds it to the
//! color mapper. Platform callbacks are turned into messages consumed by a
//! single state-update loop owned by [`SensorHub`].

mod error;
mod hub;
mod replay;
mod snapshot;
mod source;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::{Result, SensorError};
pub use hub::{HubListener, SensorHub};
pub use replay::ReplaySource;
pub use snapshot::SensorSnapshot;
pub use source::{SensorListener, SensorSource};
pub use types::{Axis, DeliveryRate, SensorChannel, SensorEvent, SensorReading};
