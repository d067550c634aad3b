use crate::sensors::error::Result;
use crate::sensors::types::{DeliveryRate, SensorChannel, SensorEvent};

/// Observer for platform sensor callbacks.
pub trait SensorListener: Send {
    fn on_sensor_changed(&self, event: SensorEvent);

    fn on_accuracy_changed(&self, _channel: SensorChannel, _accuracy: i32) {}
}

/// Platform motion-sensor interface.
///
/// Delivers typed events per channel at a rate of the platform's choosing;
/// `rate` is only a hint.
pub trait SensorSource {
    fn has_channel(&self, channel: SensorChannel) -> bool;

    /// Registers `listener` for `channel`. Fails with
    /// [`SensorError::Unavailable`](crate::sensors::SensorError::Unavailable)
    /// when the device has no such sensor.
    fn register(
        &mut self,
        channel: SensorChannel,
        rate: DeliveryRate,
        listener: Box<dyn SensorListener>,
    ) -> Result<()>;

    fn unregister_all(&mut self);
}
