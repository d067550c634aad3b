use tracing::trace;

use crate::sensors::error::Result;
use crate::sensors::types::{Axis, CHANNEL_COUNT, SensorChannel, SensorEvent, SensorReading};

/// Immutable view of the latest reading per channel.
///
/// A channel that has never reported is `None`, which keeps "not sampled yet"
/// apart from a legitimate zero reading.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SensorSnapshot {
    readings: [Option<SensorReading>; CHANNEL_COUNT],
}

impl SensorSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the snapshot that results from applying `event`.
    ///
    /// The event overwrites whatever the channel held before. Events with an
    /// empty payload are rejected and leave no trace.
    pub fn apply(&self, event: &SensorEvent) -> Result<SensorSnapshot> {
        let reading = SensorReading::from_values(event.channel, &event.values)?;
        trace!(channel = %event.channel, ?reading, "sensor reading updated");

        let mut next = *self;
        next.readings[event.channel.index()] = Some(reading);
        Ok(next)
    }

    /// Shorthand for building snapshots in place.
    pub fn with_reading(mut self, channel: SensorChannel, reading: SensorReading) -> Self {
        self.readings[channel.index()] = Some(reading);
        self
    }

    pub fn reading(&self, channel: SensorChannel) -> Option<SensorReading> {
        self.readings[channel.index()]
    }

    pub fn axis_value(&self, channel: SensorChannel, axis: Axis) -> Option<f32> {
        self.reading(channel).map(|r| r.axis(axis))
    }

    pub fn has_sampled(&self, channel: SensorChannel) -> bool {
        self.readings[channel.index()].is_some()
    }

    /// True once every channel in `required` has reported at least once.
    ///
    /// Readings are only ever overwritten, so once true this stays true.
    pub fn is_ready(&self, required: &[SensorChannel]) -> bool {
        required.iter().all(|&channel| self.has_sampled(channel))
    }

    /// Channels from `required` that have not reported yet.
    pub fn missing(&self, required: &[SensorChannel]) -> Vec<SensorChannel> {
        required
            .iter()
            .copied()
            .filter(|&channel| !self.has_sampled(channel))
            .collect()
    }
}
