/// INTEGRATION TESTS: faults inside the sensor callback
///
/// A bad sample must never stop the loop: it is counted, reported as the
/// last fault and as an error event, and the next sample is processed
/// normally.

use entrain_node::{
    transport::loopback::LinkConditionerConfig, ErrorEvent, NamedValue, NodeConfig, NodeError,
    SensorReading, SyncError,
};
use entrain_test::{assert_period_near, ConstantMotion, MotionSource, SineMotion, TestSession};

struct Glitchy {
    inner: SineMotion,
    tick: u32,
}

impl MotionSource for Glitchy {
    fn next_reading(&mut self) -> SensorReading {
        self.tick += 1;
        let reading = self.inner.next_reading();
        if self.tick % 50 == 0 {
            SensorReading::new(f32::NAN, 0.0, f32::INFINITY)
        } else {
            reading
        }
    }
}

#[test]
fn non_finite_readings_are_skipped() {
    let mut session =
        TestSession::new(vec![NodeConfig::new(1)], LinkConditionerConfig::perfect()).unwrap();
    let mut motion = Glitchy {
        inner: SineMotion::new(25.0),
        tick: 0,
    };

    session.run(1000, &mut [&mut motion as &mut dyn MotionSource]);

    let status = session.node(0).status();
    assert_eq!(status.errors.faulted_samples, 20);
    assert_eq!(status.samples, 980);
    assert!(status.last_fault.as_deref().unwrap_or("").contains("finite"));
    // dropped samples shift the phase a little, nothing more
    assert_period_near!(status.period, 500.0, 0.15);

    let mut events = session.node(0).node.take_events();
    let errors: Vec<NodeError> = events.read::<ErrorEvent>().collect();
    assert_eq!(errors.len(), 20);
    assert!(errors
        .iter()
        .all(|error| matches!(error, NodeError::Sync(SyncError::NonFiniteSample { .. }))));
}

#[test]
fn overflowing_magnitude_is_a_fault() {
    let mut session =
        TestSession::new(vec![NodeConfig::new(1)], LinkConditionerConfig::perfect()).unwrap();
    let mut motion = ConstantMotion::new(SensorReading::new(f32::MAX, f32::MAX, 0.0));

    session.run(10, &mut [&mut motion as &mut dyn MotionSource]);

    let status = session.node(0).status();
    assert_eq!(status.errors.faulted_samples, 10);
    assert_eq!(status.cycles, 0);
}

#[test]
fn still_device_never_drives_the_clock() {
    let mut session =
        TestSession::new(vec![NodeConfig::new(1)], LinkConditionerConfig::perfect()).unwrap();
    let mut motion = ConstantMotion::new(SensorReading::new(0.0, 0.0, 9.81));

    session.run(500, &mut [&mut motion as &mut dyn MotionSource]);

    let status = session.node(0).status();
    assert_eq!(status.cycles, 100);
    assert_eq!(status.errors.rejected_estimates, 100);
    assert_eq!(status.period, 0.0);
    assert!(status.deviation.is_finite());
    assert!(session.node(0).clock.intervals().is_empty());
}

#[test]
fn garbage_broadcasts_are_counted_and_ignored() {
    let mut session =
        TestSession::new(vec![NodeConfig::new(1)], LinkConditionerConfig::perfect()).unwrap();
    let node = &session.node(0).node;

    node.on_peer_message(&NamedValue::new("intensity2", 1.0));
    node.on_peer_message(&NamedValue::new("P_", 500.0));
    node.on_peer_message(&NamedValue::new("P_2", f32::NAN));

    let mut motion = SineMotion::new(25.0);
    session.run(10, &mut [&mut motion as &mut dyn MotionSource]);

    let status = session.node(0).status();
    assert_eq!(status.errors.ignored_peer_messages, 3);
    assert_eq!(status.their_period, -1.0);
}
