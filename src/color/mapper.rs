use tracing::trace;

use crate::color::normalize::NormalizationWindow;
use crate::color::types::Color;
use crate::sensors::{Axis, SensorChannel, SensorSnapshot};

/// Divisor turning a magnetic-field X reading (µT) into a saturation factor.
const MAGNETIC_SATURATION_DIVISOR: f32 = 100.0;

/// Two channels whose readings are multiplied into one color component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelPair(pub SensorChannel, pub SensorChannel);

/// Turns a sensor snapshot into a color.
#[derive(Debug, Clone)]
pub struct ColorMapper {
    pairs: [ChannelPair; 3],
    axis: Axis,
    window: NormalizationWindow,
}

impl ColorMapper {
    /// Red, green and blue pairs used unless configured otherwise.
    pub const DEFAULT_PAIRS: [ChannelPair; 3] = [
        ChannelPair(SensorChannel::Gravity, SensorChannel::MagneticField),
        ChannelPair(SensorChannel::LinearAcceleration, SensorChannel::Gyroscope),
        ChannelPair(SensorChannel::RotationVector, SensorChannel::Light),
    ];

    pub fn new(pairs: [ChannelPair; 3], axis: Axis, window: NormalizationWindow) -> Self {
        Self { pairs, axis, window }
    }

    pub fn with_window(mut self, window: NormalizationWindow) -> Self {
        self.window = window;
        self
    }

    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn window(&self) -> &NormalizationWindow {
        &self.window
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Channels that must have reported before a color can be produced.
    pub fn required_channels(&self) -> Vec<SensorChannel> {
        let mut channels = Vec::with_capacity(6);
        for ChannelPair(a, b) in self.pairs {
            for channel in [a, b] {
                if !channels.contains(&channel) {
                    channels.push(channel);
                }
            }
        }
        channels
    }

    /// Raw product for one pair, `None` while either side is unsampled.
    pub fn product(&self, snapshot: &SensorSnapshot, pair: ChannelPair) -> Option<f64> {
        let a = snapshot.axis_value(pair.0, self.axis)?;
        let b = snapshot.axis_value(pair.1, self.axis)?;
        Some(a as f64 * b as f64)
    }

    /// Color for `snapshot`, or `None` until every required channel reported.
    pub fn map(&self, snapshot: &SensorSnapshot) -> Option<Color> {
        let mut channels = [0u8; 3];
        for (slot, pair) in channels.iter_mut().zip(self.pairs) {
            let product = self.product(snapshot, pair)?;
            *slot = self.window.normalize(product);
        }
        let color = Color::from(channels);
        trace!(%color, "mapped sensor snapshot");
        Some(color)
    }

    pub fn map_or_default(&self, snapshot: &SensorSnapshot, default: Color) -> Color {
        self.map(snapshot).unwrap_or(default)
    }

    /// Saturation factor derived from the magnetic field X axis.
    pub fn saturation(snapshot: &SensorSnapshot) -> Option<f32> {
        snapshot
            .axis_value(SensorChannel::MagneticField, Axis::X)
            .map(|x| x / MAGNETIC_SATURATION_DIVISOR)
    }
}

impl Default for ColorMapper {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PAIRS, Axis::Z, NormalizationWindow::DEFAULT)
    }
}
