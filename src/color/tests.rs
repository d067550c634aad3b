use crate::color::{ChannelPair, Color, ColorError, ColorMapper, NormalizationWindow};
use crate::sensors::{Axis, SensorChannel, SensorEvent, SensorReading, SensorSnapshot};

fn snapshot_with_z(values: &[(SensorChannel, f32)]) -> SensorSnapshot {
    values.iter().fold(SensorSnapshot::new(), |snapshot, &(channel, z)| {
        snapshot
            .apply(&SensorEvent::new(channel, vec![0.0, 0.0, z]))
            .unwrap()
    })
}

#[test]
fn test_window_bounds() {
    let window = NormalizationWindow::default();
    assert_eq!(window.normalize(-1000.0), 0);
    assert_eq!(window.normalize(1000.0), 255);
    assert_eq!(window.normalize(0.0), 127);
}

#[test]
fn test_out_of_window_saturates() {
    let window = NormalizationWindow::default();
    assert_eq!(window.normalize(5000.0), 255);
    assert_eq!(window.normalize(-5000.0), 0);
    assert_eq!(window.normalize(f64::MAX), 255);
    assert_eq!(window.normalize(f64::MIN), 0);
}

#[test]
fn test_non_finite_falls_back_to_zero() {
    let window = NormalizationWindow::default();
    assert_eq!(window.normalize(f64::NAN), 0);
    assert_eq!(window.normalize(f64::INFINITY), 0);
    assert_eq!(window.normalize(f64::NEG_INFINITY), 0);
}

#[test]
fn test_products_always_in_range_and_monotonic() {
    let window = NormalizationWindow::default();
    let samples: Vec<f32> = (-60..=60)
        .map(|i| i as f32 * 0.75)
        .chain([f32::MAX, f32::MIN, f32::MIN_POSITIVE, 1e20, -1e20])
        .collect();

    let mut products: Vec<f64> = Vec::new();
    for &a in &samples {
        for &b in &samples {
            products.push(a as f64 * b as f64);
        }
    }
    assert!(products.iter().all(|p| p.is_finite()));

    products.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let mut previous = 0u8;
    for product in products {
        let channel = window.normalize(product);
        assert!(channel >= previous, "normalize decreased at {}", product);
        previous = channel;
    }
}

#[test]
fn test_invalid_windows_are_rejected() {
    assert_eq!(
        NormalizationWindow::new(10.0, 10.0),
        Err(ColorError::InvalidWindow { min: 10.0, max: 10.0 })
    );
    assert!(NormalizationWindow::new(5.0, -5.0).is_err());
    assert!(NormalizationWindow::new(f64::NAN, 1.0).is_err());
    assert!(matches!(
        NormalizationWindow::new(-f64::MAX, f64::MAX),
        Err(ColorError::InvalidWindow { .. })
    ));

    let wide = NormalizationWindow::new(-f64::MAX / 2.0, f64::MAX / 2.0).unwrap();
    assert_eq!(wide.normalize(f64::MAX / 2.0), 255);
    assert_eq!(wide.normalize(-f64::MAX / 2.0), 0);

    let narrow = NormalizationWindow::new(0.0, 10.0).unwrap();
    assert_eq!(narrow.normalize(5.0), 127);
}

#[test]
fn test_gravity_times_magnetic_maps_to_red() {
    let snapshot = snapshot_with_z(&[
        (SensorChannel::Gravity, 2.0),
        (SensorChannel::MagneticField, 3.0),
        (SensorChannel::LinearAcceleration, 0.0),
        (SensorChannel::Gyroscope, 0.0),
        (SensorChannel::RotationVector, 0.0),
    ])
    .apply(&SensorEvent::new(SensorChannel::Light, vec![0.0]))
    .unwrap();

    let color = ColorMapper::default().map(&snapshot).unwrap();
    assert_eq!(color.r, 128);
    assert_eq!(color.g, 127);
    assert_eq!(color.b, 127);
}

#[test]
fn test_extreme_products_saturate() {
    let mapper = ColorMapper::default();
    let snapshot = snapshot_with_z(&[
        (SensorChannel::Gravity, 1000.0),
        (SensorChannel::MagneticField, 1.0),
        (SensorChannel::LinearAcceleration, -1000.0),
        (SensorChannel::Gyroscope, 1.0),
        (SensorChannel::RotationVector, 5000.0),
    ])
    .with_reading(SensorChannel::Light, SensorReading::Scalar(1.0));

    assert_eq!(mapper.map(&snapshot), Some(Color::new(255, 0, 255)));
}

#[test]
fn test_no_color_until_ready() {
    let mapper = ColorMapper::default();
    let partial = snapshot_with_z(&[
        (SensorChannel::Gravity, 2.0),
        (SensorChannel::MagneticField, 3.0),
    ]);
    assert_eq!(mapper.map(&partial), None);
    assert_eq!(mapper.map_or_default(&partial, Color::NEUTRAL), Color::NEUTRAL);
    assert!(!partial.is_ready(&mapper.required_channels()));
}

#[test]
fn test_required_channels_follow_pairs() {
    let mapper = ColorMapper::default();
    assert_eq!(
        mapper.required_channels(),
        vec![
            SensorChannel::Gravity,
            SensorChannel::MagneticField,
            SensorChannel::LinearAcceleration,
            SensorChannel::Gyroscope,
            SensorChannel::RotationVector,
            SensorChannel::Light,
        ]
    );

    let shared = ColorMapper::new(
        [
            ChannelPair(SensorChannel::Gravity, SensorChannel::Gravity),
            ChannelPair(SensorChannel::Gravity, SensorChannel::Proximity),
            ChannelPair(SensorChannel::Proximity, SensorChannel::Proximity),
        ],
        Axis::Z,
        NormalizationWindow::default(),
    );
    assert_eq!(
        shared.required_channels(),
        vec![SensorChannel::Gravity, SensorChannel::Proximity]
    );
}

#[test]
fn test_axis_selection() {
    let snapshot = SensorSnapshot::new()
        .with_reading(SensorChannel::Gravity, SensorReading::Vector([10.0, 0.0, 0.0]))
        .with_reading(SensorChannel::MagneticField, SensorReading::Vector([100.0, 0.0, 0.0]));
    let pair = ChannelPair(SensorChannel::Gravity, SensorChannel::MagneticField);

    let z = ColorMapper::default();
    assert_eq!(z.product(&snapshot, pair), Some(0.0));

    let x = ColorMapper::default().with_axis(Axis::X);
    assert_eq!(x.product(&snapshot, pair), Some(1000.0));
}

#[test]
fn test_non_finite_reading_maps_to_zero_channel() {
    let snapshot = snapshot_with_z(&[
        (SensorChannel::Gravity, f32::NAN),
        (SensorChannel::MagneticField, 3.0),
        (SensorChannel::LinearAcceleration, 0.0),
        (SensorChannel::Gyroscope, 0.0),
        (SensorChannel::RotationVector, 0.0),
    ])
    .with_reading(SensorChannel::Light, SensorReading::Scalar(0.0));

    let color = ColorMapper::default().map(&snapshot).unwrap();
    assert_eq!(color.r, 0);
}

#[test]
fn test_magnetic_saturation() {
    let snapshot = SensorSnapshot::new()
        .with_reading(SensorChannel::MagneticField, SensorReading::Vector([50.0, 1.0, 2.0]));
    assert_eq!(ColorMapper::saturation(&snapshot), Some(0.5));
    assert_eq!(ColorMapper::saturation(&SensorSnapshot::new()), None);
}

#[test]
fn test_color_literals() {
    let color: Color = "#ff8000".parse().unwrap();
    assert_eq!(color, Color::new(255, 128, 0));
    assert_eq!(color.to_string(), "#ff8000");
    assert!("#ff80".parse::<Color>().is_err());
    assert!("zzzzzz".parse::<Color>().is_err());
}

#[test]
fn test_hsv_saturation() {
    assert_eq!(Color::NEUTRAL.hsv_saturation(), 0.0);
    assert_eq!(Color::new(0, 0, 0).hsv_saturation(), 0.0);
    assert_eq!(Color::new(255, 0, 0).hsv_saturation(), 1.0);
}
