use thiserror::Error;

use crate::sensors::types::SensorChannel;

#[derive(Error, Debug)]
pub enum SensorError {
    #[error("No sensor hardware for channel {0}")]
    Unavailable(SensorChannel),

    #[error("Empty reading for channel {0}")]
    EmptyReading(SensorChannel),

    #[error("Sensor hub is not running")]
    HubStopped,

    #[error("Failed to read sensor session: {0}")]
    SessionReadError(String),
}

pub type Result<T> = std::result::Result<T, SensorError>;
