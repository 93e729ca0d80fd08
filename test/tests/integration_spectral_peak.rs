/// INTEGRATION TESTS: the FFT-peak preset end to end
///
/// Long history, coarse decimation, period spread as regularity. Nodes
/// start DISJOINT and move to UNITY once their period histories are steady.

use entrain_node::{
    transport::loopback::LinkConditionerConfig, Mode, ModeChangeEvent, NodeConfig, SyncConfig,
};
use entrain_test::{assert_mode, assert_period_near, MotionSource, SineMotion, TestSession};

fn spectral_duet() -> TestSession {
    TestSession::new(
        vec![
            NodeConfig::new(1).with_sync(SyncConfig::spectral_peak()),
            NodeConfig::new(2).with_sync(SyncConfig::spectral_peak()),
        ],
        LinkConditionerConfig::perfect(),
    )
    .unwrap()
}

#[test]
fn fft_nodes_track_their_tempo() {
    let mut session = spectral_duet();
    // bins 16 and 8 of a 512-sample window at 20ms
    let mut fast = SineMotion::new(32.0);
    let mut slow = SineMotion::new(64.0);

    session.run(2000, &mut [&mut fast as &mut dyn MotionSource, &mut slow]);

    assert_period_near!(session.node(0).status().period, 640.0, 0.1);
    assert_period_near!(session.node(1).status().period, 1280.0, 0.1);
    assert!(session.node(0).status().period_strength > 0.0);
}

#[test]
fn fft_nodes_leave_disjoint_for_unity() {
    let mut session = spectral_duet();
    let mut fast = SineMotion::new(32.0);
    let mut slow = SineMotion::new(64.0);

    assert_mode!(session.node(0).node, Mode::Disjoint);
    session.run(2500, &mut [&mut fast as &mut dyn MotionSource, &mut slow]);

    assert_mode!(session.node(0).node, Mode::Unity);
    assert_mode!(session.node(1).node, Mode::Unity);

    let mut events = session.node(0).node.take_events();
    let last = events.read::<ModeChangeEvent>().last().unwrap();
    assert_eq!(last.to, Mode::Unity);

    let interval = session.node(0).clock.last().unwrap();
    assert_period_near!(interval, 960.0, 0.1);
}
