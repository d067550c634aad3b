use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

use crate::sensors::error::{Result, SensorError};
use crate::sensors::snapshot::SensorSnapshot;
use crate::sensors::source::{SensorListener, SensorSource};
use crate::sensors::types::{DeliveryRate, SensorChannel, SensorEvent};

#[derive(Debug)]
enum HubMessage {
    Reading(SensorEvent),
    Accuracy(SensorChannel, i32),
    /// Answered with the snapshot once every earlier message is applied.
    Flush(oneshot::Sender<SensorSnapshot>),
}

/// Listener handed to the platform. Every callback becomes a message for the
/// hub's update loop, so the platform thread never touches the snapshot.
#[derive(Clone)]
pub struct HubListener {
    sender: mpsc::UnboundedSender<HubMessage>,
}

impl SensorListener for HubListener {
    fn on_sensor_changed(&self, event: SensorEvent) {
        if self.sender.send(HubMessage::Reading(event)).is_err() {
            trace!("sensor hub closed, dropping reading");
        }
    }

    fn on_accuracy_changed(&self, channel: SensorChannel, accuracy: i32) {
        if self.sender.send(HubMessage::Accuracy(channel, accuracy)).is_err() {
            trace!("sensor hub closed, dropping accuracy change");
        }
    }
}

/// Owns the sensor state for the application.
///
/// Readings flow platform → [`HubListener`] → mpsc → update loop → watch
/// channel. The update loop is the only writer of the snapshot.
pub struct SensorHub {
    required: Vec<SensorChannel>,
    sender: mpsc::UnboundedSender<HubMessage>,
    receiver: Option<mpsc::UnboundedReceiver<HubMessage>>,
    snapshots: Arc<watch::Sender<SensorSnapshot>>,
    task: Option<JoinHandle<()>>,
}

impl SensorHub {
    pub fn new(required: Vec<SensorChannel>) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let (snapshots, _) = watch::channel(SensorSnapshot::new());
        Self {
            required,
            sender,
            receiver: Some(receiver),
            snapshots: Arc::new(snapshots),
            task: None,
        }
    }

    pub fn required(&self) -> &[SensorChannel] {
        &self.required
    }

    pub fn listener(&self) -> HubListener {
        HubListener {
            sender: self.sender.clone(),
        }
    }

    /// Spawns the update loop on the current tokio runtime.
    ///
    /// The loop can only be started once; later calls are no-ops.
    pub fn start(&mut self) {
        let Some(receiver) = self.receiver.take() else {
            debug!("sensor hub already started");
            return;
        };
        let snapshots = Arc::clone(&self.snapshots);
        self.task = Some(tokio::spawn(run_update_loop(receiver, snapshots)));
        info!(required = ?self.required, "sensor hub started");
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Registers the hub for every required channel.
    ///
    /// Returns the channels the device cannot provide. Those never become
    /// ready, so the mapper keeps producing the default color.
    pub fn subscribe<S: SensorSource + ?Sized>(
        &self,
        source: &mut S,
        rate: DeliveryRate,
    ) -> Vec<SensorChannel> {
        let mut unavailable = Vec::new();
        for &channel in &self.required {
            match source.register(channel, rate, Box::new(self.listener())) {
                Ok(()) => debug!(%channel, ?rate, "registered sensor listener"),
                Err(SensorError::Unavailable(channel)) => {
                    warn!(%channel, "sensor unavailable, color will stay at default");
                    unavailable.push(channel);
                }
                Err(e) => {
                    warn!(%channel, error = %e, "failed to register sensor listener");
                    unavailable.push(channel);
                }
            }
        }
        unavailable
    }

    pub fn unsubscribe<S: SensorSource + ?Sized>(&self, source: &mut S) {
        source.unregister_all();
        debug!("sensor listeners unregistered");
    }

    pub fn snapshot(&self) -> SensorSnapshot {
        *self.snapshots.borrow()
    }

    pub fn watch(&self) -> watch::Receiver<SensorSnapshot> {
        self.snapshots.subscribe()
    }

    pub fn is_ready(&self) -> bool {
        self.snapshot().is_ready(&self.required)
    }

    /// Waits until every required channel has reported at least once.
    pub async fn wait_until_ready(&self) -> Result<SensorSnapshot> {
        if self.task.is_none() {
            return Err(SensorError::HubStopped);
        }
        let mut receiver = self.watch();
        let required = self.required.clone();
        let snapshot = receiver
            .wait_for(|snapshot| snapshot.is_ready(&required))
            .await
            .map_err(|_| SensorError::HubStopped)?;
        Ok(*snapshot)
    }

    /// Waits until every reading delivered so far has been applied and
    /// returns the resulting snapshot.
    ///
    /// [`SensorHub::wait_until_ready`] returns on the first ready snapshot,
    /// which may predate readings still queued behind it.
    pub async fn flush(&self) -> Result<SensorSnapshot> {
        if !self.is_running() {
            return Err(SensorError::HubStopped);
        }
        let (reply, response) = oneshot::channel();
        self.sender
            .send(HubMessage::Flush(reply))
            .map_err(|_| SensorError::HubStopped)?;
        response.await.map_err(|_| SensorError::HubStopped)
    }

    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            info!("sensor hub stopped");
        }
    }
}

impl Drop for SensorHub {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn run_update_loop(
    mut receiver: mpsc::UnboundedReceiver<HubMessage>,
    snapshots: Arc<watch::Sender<SensorSnapshot>>,
) {
    while let Some(message) = receiver.recv().await {
        match message {
            HubMessage::Reading(event) => {
                let current = *snapshots.borrow();
                match current.apply(&event) {
                    Ok(next) => {
                        snapshots.send_replace(next);
                    }
                    Err(e) => warn!(error = %e, "discarding sensor event"),
                }
            }
            HubMessage::Accuracy(channel, accuracy) => {
                debug!(%channel, accuracy, "sensor accuracy changed");
            }
            HubMessage::Flush(reply) => {
                if reply.send(*snapshots.borrow()).is_err() {
                    trace!("flush requester went away");
                }
            }
        }
    }
    debug!("sensor update loop finished");
}
