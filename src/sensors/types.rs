//! Sensor channel and reading types

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sensors::error::{Result, SensorError};

/// Number of distinct sensor channels.
pub const CHANNEL_COUNT: usize = 7;

/// A physical sensor the sampler can hold a reading for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorChannel {
    Gravity,
    MagneticField,
    LinearAcceleration,
    Gyroscope,
    RotationVector,
    Proximity,
    Light,
}

impl SensorChannel {
    pub const ALL: [SensorChannel; CHANNEL_COUNT] = [
        SensorChannel::Gravity,
        SensorChannel::MagneticField,
        SensorChannel::LinearAcceleration,
        SensorChannel::Gyroscope,
        SensorChannel::RotationVector,
        SensorChannel::Proximity,
        SensorChannel::Light,
    ];

    /// Slot of this channel in a snapshot.
    pub fn index(self) -> usize {
        match self {
            SensorChannel::Gravity => 0,
            SensorChannel::MagneticField => 1,
            SensorChannel::LinearAcceleration => 2,
            SensorChannel::Gyroscope => 3,
            SensorChannel::RotationVector => 4,
            SensorChannel::Proximity => 5,
            SensorChannel::Light => 6,
        }
    }

    /// Proximity and ambient light report a single value.
    pub fn is_scalar(self) -> bool {
        matches!(self, SensorChannel::Proximity | SensorChannel::Light)
    }

    pub fn name(self) -> &'static str {
        match self {
            SensorChannel::Gravity => "gravity",
            SensorChannel::MagneticField => "magnetic_field",
            SensorChannel::LinearAcceleration => "linear_acceleration",
            SensorChannel::Gyroscope => "gyroscope",
            SensorChannel::RotationVector => "rotation_vector",
            SensorChannel::Proximity => "proximity",
            SensorChannel::Light => "light",
        }
    }
}

impl fmt::Display for SensorChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Component of a vector reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    #[default]
    Z,
}

impl Axis {
    fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Latest value held for one channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorReading {
    Vector([f32; 3]),
    Scalar(f32),
}

impl SensorReading {
    /// Builds a reading from a raw event payload.
    ///
    /// Vector payloads shorter than three components are zero-padded and extra
    /// components are ignored. Scalar channels keep only the first value.
    pub fn from_values(channel: SensorChannel, values: &[f32]) -> Result<Self> {
        let first = *values.first().ok_or(SensorError::EmptyReading(channel))?;
        if channel.is_scalar() {
            return Ok(SensorReading::Scalar(first));
        }

        let mut vector = [0.0f32; 3];
        for (slot, value) in vector.iter_mut().zip(values) {
            *slot = *value;
        }
        Ok(SensorReading::Vector(vector))
    }

    /// Value along `axis`. Scalar readings return their value for every axis.
    pub fn axis(&self, axis: Axis) -> f32 {
        match self {
            SensorReading::Vector(v) => v[axis.index()],
            SensorReading::Scalar(s) => *s,
        }
    }
}

/// Coarse delivery-rate hint passed to the platform on registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryRate {
    #[default]
    Normal,
    Ui,
    Game,
    Fastest,
}

/// A single sensor callback as delivered by the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorEvent {
    pub channel: SensorChannel,
    pub values: Vec<f32>,
    /// Platform timestamp in nanoseconds
    #[serde(default)]
    pub timestamp_ns: u64,
}

impl SensorEvent {
    pub fn new(channel: SensorChannel, values: Vec<f32>) -> Self {
        Self {
            channel,
            values,
            timestamp_ns: 0,
        }
    }
}
