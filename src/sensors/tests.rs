use std::io::Cursor;
use std::sync::{Arc, Mutex};

use crate::sensors::{
    Axis, DeliveryRate, ReplaySource, SensorChannel, SensorError, SensorEvent, SensorHub,
    SensorListener, SensorReading, SensorSnapshot, SensorSource,
};

const REQUIRED: [SensorChannel; 2] = [SensorChannel::Gravity, SensorChannel::MagneticField];

struct RecordingListener {
    seen: Arc<Mutex<Vec<SensorEvent>>>,
}

impl SensorListener for RecordingListener {
    fn on_sensor_changed(&self, event: SensorEvent) {
        self.seen.lock().unwrap().push(event);
    }
}

#[test]
fn test_unsampled_channel_is_not_zero() {
    let snapshot = SensorSnapshot::new();
    assert_eq!(snapshot.reading(SensorChannel::Gravity), None);

    let snapshot = snapshot
        .apply(&SensorEvent::new(SensorChannel::Gravity, vec![0.0, 0.0, 0.0]))
        .unwrap();
    assert_eq!(
        snapshot.reading(SensorChannel::Gravity),
        Some(SensorReading::Vector([0.0, 0.0, 0.0]))
    );
}

#[test]
fn test_apply_leaves_previous_snapshot_untouched() {
    let before = SensorSnapshot::new();
    let after = before
        .apply(&SensorEvent::new(SensorChannel::Gyroscope, vec![1.0, 2.0, 3.0]))
        .unwrap();

    assert!(!before.has_sampled(SensorChannel::Gyroscope));
    assert_eq!(after.axis_value(SensorChannel::Gyroscope, Axis::Y), Some(2.0));
}

#[test]
fn test_latest_event_overwrites() {
    let snapshot = SensorSnapshot::new()
        .apply(&SensorEvent::new(SensorChannel::MagneticField, vec![1.0, 1.0, 1.0]))
        .unwrap()
        .apply(&SensorEvent::new(SensorChannel::MagneticField, vec![4.0, 5.0, 6.0]))
        .unwrap();

    assert_eq!(snapshot.axis_value(SensorChannel::MagneticField, Axis::Z), Some(6.0));
}

#[test]
fn test_short_vector_is_padded_and_scalar_keeps_first() {
    let vector = SensorReading::from_values(SensorChannel::RotationVector, &[0.5, 0.25]).unwrap();
    assert_eq!(vector, SensorReading::Vector([0.5, 0.25, 0.0]));

    let scalar = SensorReading::from_values(SensorChannel::Light, &[320.0, 1.0, 2.0]).unwrap();
    assert_eq!(scalar, SensorReading::Scalar(320.0));
    assert_eq!(scalar.axis(Axis::X), 320.0);
    assert_eq!(scalar.axis(Axis::Z), 320.0);
}

#[test]
fn test_empty_event_is_rejected() {
    let result = SensorSnapshot::new().apply(&SensorEvent::new(SensorChannel::Proximity, vec![]));
    assert!(matches!(
        result,
        Err(SensorError::EmptyReading(SensorChannel::Proximity))
    ));
}

#[test]
fn test_readiness_latches() {
    let mut snapshot = SensorSnapshot::new();
    assert!(!snapshot.is_ready(&REQUIRED));
    assert_eq!(snapshot.missing(&REQUIRED), REQUIRED.to_vec());

    snapshot = snapshot
        .apply(&SensorEvent::new(SensorChannel::Gravity, vec![0.0, 0.0, 9.8]))
        .unwrap();
    assert!(!snapshot.is_ready(&REQUIRED));
    assert_eq!(snapshot.missing(&REQUIRED), vec![SensorChannel::MagneticField]);

    snapshot = snapshot
        .apply(&SensorEvent::new(SensorChannel::MagneticField, vec![20.0, -5.0, 40.0]))
        .unwrap();
    assert!(snapshot.is_ready(&REQUIRED));

    for value in [0.0, -1.0, 7.5] {
        snapshot = snapshot
            .apply(&SensorEvent::new(SensorChannel::Gravity, vec![0.0, 0.0, value]))
            .unwrap();
        assert!(snapshot.is_ready(&REQUIRED));
    }
}

#[test]
fn test_event_json_shape() {
    let event: SensorEvent =
        serde_json::from_str(r#"{"channel":"linear_acceleration","values":[1.0,2.0,3.0]}"#)
            .unwrap();
    assert_eq!(event.channel, SensorChannel::LinearAcceleration);
    assert_eq!(event.timestamp_ns, 0);
}

#[test]
fn test_replay_parses_and_skips_comments() {
    let session = "# recorded on bench\n\
        {\"channel\":\"gravity\",\"values\":[0.0,0.0,2.0]}\n\
        \n\
        {\"channel\":\"light\",\"values\":[100.0],\"timestamp_ns\":5}\n";
    let source = ReplaySource::from_reader(Cursor::new(session)).unwrap();

    assert_eq!(source.events().len(), 2);
    assert!(source.has_channel(SensorChannel::Light));
    assert!(!source.has_channel(SensorChannel::Gyroscope));
}

#[test]
fn test_replay_reports_bad_line() {
    let result = ReplaySource::from_reader(Cursor::new("{\"channel\":\"gravity\"\n"));
    match result {
        Err(SensorError::SessionReadError(message)) => assert!(message.contains("line 1")),
        _ => panic!("expected a session read error"),
    }
}

#[test]
fn test_replay_delivers_only_registered_channels() {
    let mut source = ReplaySource::new(vec![
        SensorEvent::new(SensorChannel::Gravity, vec![0.0, 0.0, 1.0]),
        SensorEvent::new(SensorChannel::Light, vec![50.0]),
        SensorEvent::new(SensorChannel::Gravity, vec![0.0, 0.0, 2.0]),
    ]);
    let seen = Arc::new(Mutex::new(Vec::new()));
    source
        .register(
            SensorChannel::Gravity,
            DeliveryRate::Normal,
            Box::new(RecordingListener { seen: seen.clone() }),
        )
        .unwrap();

    assert_eq!(source.play(), 2);
    assert_eq!(seen.lock().unwrap().len(), 2);

    source.unregister_all();
    assert_eq!(source.play(), 0);
}

#[test]
fn test_replay_rejects_missing_hardware() {
    let mut source = ReplaySource::new(vec![]);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let result = source.register(
        SensorChannel::Gyroscope,
        DeliveryRate::Normal,
        Box::new(RecordingListener { seen }),
    );
    assert!(matches!(result, Err(SensorError::Unavailable(SensorChannel::Gyroscope))));
}

#[tokio::test]
async fn test_hub_becomes_ready_from_listener_events() {
    let mut hub = SensorHub::new(REQUIRED.to_vec());
    hub.start();
    assert!(hub.is_running());
    assert!(!hub.is_ready());

    let listener = hub.listener();
    listener.on_sensor_changed(SensorEvent::new(SensorChannel::Gravity, vec![0.0, 0.0, 2.0]));
    listener.on_accuracy_changed(SensorChannel::Gravity, 3);
    listener.on_sensor_changed(SensorEvent::new(SensorChannel::MagneticField, vec![0.0, 0.0, 3.0]));

    let snapshot = hub.wait_until_ready().await.unwrap();
    assert_eq!(snapshot.axis_value(SensorChannel::Gravity, Axis::Z), Some(2.0));
    assert_eq!(snapshot.axis_value(SensorChannel::MagneticField, Axis::Z), Some(3.0));
    assert!(hub.is_ready());
}

#[tokio::test]
async fn test_hub_reports_unavailable_channels() {
    let mut hub = SensorHub::new(REQUIRED.to_vec());
    hub.start();

    let mut source = ReplaySource::new(vec![SensorEvent::new(
        SensorChannel::Gravity,
        vec![0.0, 0.0, 9.8],
    )]);
    let unavailable = hub.subscribe(&mut source, DeliveryRate::Normal);
    assert_eq!(unavailable, vec![SensorChannel::MagneticField]);

    source.play();
    let mut watch = hub.watch();
    let snapshot = *watch
        .wait_for(|s| s.has_sampled(SensorChannel::Gravity))
        .await
        .unwrap();
    assert!(!snapshot.is_ready(hub.required()));

    hub.unsubscribe(&mut source);
    assert_eq!(source.play(), 0);
}

#[tokio::test]
async fn test_wait_requires_started_hub() {
    let hub = SensorHub::new(REQUIRED.to_vec());
    assert!(matches!(hub.wait_until_ready().await, Err(SensorError::HubStopped)));
}

#[tokio::test]
async fn test_flush_applies_every_queued_reading() {
    let mut hub = SensorHub::new(REQUIRED.to_vec());
    hub.start();

    let listener = hub.listener();
    for i in 0..300 {
        listener.on_sensor_changed(SensorEvent::new(SensorChannel::Gravity, vec![0.0, 0.0, i as f32]));
        listener.on_sensor_changed(SensorEvent::new(SensorChannel::MagneticField, vec![0.0, 0.0, 2.0]));
    }

    let snapshot = hub.flush().await.unwrap();
    assert_eq!(snapshot.axis_value(SensorChannel::Gravity, Axis::Z), Some(299.0));
    assert_eq!(hub.snapshot(), snapshot);
}

#[tokio::test]
async fn test_flush_requires_started_hub() {
    let mut hub = SensorHub::new(REQUIRED.to_vec());
    assert!(matches!(hub.flush().await, Err(SensorError::HubStopped)));

    hub.start();
    hub.stop();
    assert!(matches!(hub.flush().await, Err(SensorError::HubStopped)));
}

#[test]
fn test_listener_outliving_hub_drops_callbacks() {
    let hub = SensorHub::new(REQUIRED.to_vec());
    let listener = hub.listener();
    drop(hub);

    listener.on_sensor_changed(SensorEvent::new(SensorChannel::Gravity, vec![1.0]));
    listener.on_accuracy_changed(SensorChannel::Gravity, 2);
}
