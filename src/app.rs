//! Application controller
//!
//! Ties the sensor hub, the color mapper and the photo pipeline together and
//! owns the state a UI would render.

mod controller;

pub use controller::{PhotoController, PhotoNotice, TintedPhoto};
