//! Recorded sensor sessions.
//!
//! A session is a JSON-lines file, one [`SensorEvent`] per line:
//!
//! ```text
//! {"channel":"gravity","values":[0.0,0.1,9.8]}
//! {"channel":"light","values":[320.0],"timestamp_ns":1200}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. Channels that never
//! appear in the recording behave like sensors missing from the device.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info};

use crate::sensors::error::{Result, SensorError};
use crate::sensors::source::{SensorListener, SensorSource};
use crate::sensors::types::{DeliveryRate, SensorChannel, SensorEvent};

pub struct ReplaySource {
    events: Vec<SensorEvent>,
    listeners: Vec<(SensorChannel, Box<dyn SensorListener>)>,
}

impl ReplaySource {
    pub fn new(events: Vec<SensorEvent>) -> Self {
        Self {
            events,
            listeners: Vec::new(),
        }
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut events = Vec::new();
        for (line_no, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| SensorError::SessionReadError(e.to_string()))?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let event: SensorEvent = serde_json::from_str(line).map_err(|e| {
                SensorError::SessionReadError(format!("line {}: {}", line_no + 1, e))
            })?;
            events.push(event);
        }
        debug!("Parsed {} recorded sensor events", events.len());
        Ok(Self::new(events))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| SensorError::SessionReadError(format!("{}: {}", path.display(), e)))?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn events(&self) -> &[SensorEvent] {
        &self.events
    }

    /// Delivers the recording, in order, to the registered listeners.
    ///
    /// Returns the number of callbacks made.
    pub fn play(&self) -> usize {
        let mut delivered = 0;
        for event in &self.events {
            for (channel, listener) in &self.listeners {
                if *channel == event.channel {
                    listener.on_sensor_changed(event.clone());
                    delivered += 1;
                }
            }
        }
        info!(delivered, "sensor session replayed");
        delivered
    }
}

impl SensorSource for ReplaySource {
    fn has_channel(&self, channel: SensorChannel) -> bool {
        self.events.iter().any(|event| event.channel == channel)
    }

    fn register(
        &mut self,
        channel: SensorChannel,
        _rate: DeliveryRate,
        listener: Box<dyn SensorListener>,
    ) -> Result<()> {
        if !self.has_channel(channel) {
            return Err(SensorError::Unavailable(channel));
        }
        self.listeners.push((channel, listener));
        Ok(())
    }

    fn unregister_all(&mut self) {
        self.listeners.clear();
    }
}
