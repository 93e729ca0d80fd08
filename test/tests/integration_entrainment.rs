/// INTEGRATION TESTS: two nodes converging on a shared clock
///
/// Both nodes swing steadily at different tempi. Once their period
/// histories settle they are both regular, sit in UNITY, and drive their
/// clocks with the average of the two periods.

use entrain_node::{
    shared::{RegularityKind, VarianceNormalization},
    transport::loopback::LinkConditionerConfig,
    Mode, NodeConfig, SyncConfig,
};
use entrain_test::{assert_mode, assert_period_near, MotionSource, SineMotion, TestSession};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn steady_config() -> SyncConfig {
    SyncConfig {
        regularity: RegularityKind::PeriodVariance {
            normalization: VarianceNormalization::Population,
        },
        ..SyncConfig::zero_crossing()
    }
}

fn duet(link: LinkConditionerConfig) -> TestSession {
    TestSession::new(
        vec![
            NodeConfig::new(1).with_sync(steady_config()),
            NodeConfig::new(2).with_sync(steady_config()),
        ],
        link,
    )
    .unwrap()
}

#[test]
fn each_node_tracks_its_own_tempo() {
    init_logging();
    let mut session = duet(LinkConditionerConfig::perfect());
    // 25 and 30 samples per swing at 20ms
    let mut left = SineMotion::new(25.0);
    let mut right = SineMotion::new(30.0);

    session.run(600, &mut [&mut left as &mut dyn MotionSource, &mut right]);

    assert_period_near!(session.node(0).status().period, 500.0, 0.1);
    assert_period_near!(session.node(1).status().period, 600.0, 0.1);
}

#[test]
fn regular_nodes_settle_in_unity() {
    init_logging();
    let mut session = duet(LinkConditionerConfig::perfect());
    let mut left = SineMotion::new(25.0);
    let mut right = SineMotion::new(30.0);

    session.run(600, &mut [&mut left as &mut dyn MotionSource, &mut right]);

    assert_mode!(session.node(0).node, Mode::Unity);
    assert_mode!(session.node(1).node, Mode::Unity);
}

#[test]
fn clocks_converge_on_the_average_period() {
    init_logging();
    let mut session = duet(LinkConditionerConfig::perfect());
    let mut left = SineMotion::new(25.0);
    let mut right = SineMotion::new(30.0);

    session.run(600, &mut [&mut left as &mut dyn MotionSource, &mut right]);

    let left_interval = session.node(0).clock.last().unwrap();
    let right_interval = session.node(1).clock.last().unwrap();
    assert_period_near!(left_interval, 550.0, 0.1);
    assert_period_near!(right_interval, 550.0, 0.1);
    assert!((left_interval - right_interval).abs() < 5.0);
}

#[test]
fn peers_learn_each_others_period() {
    let mut session = duet(LinkConditionerConfig::perfect());
    let mut left = SineMotion::new(25.0);
    let mut right = SineMotion::new(30.0);

    session.run(600, &mut [&mut left as &mut dyn MotionSource, &mut right]);

    let left_status = session.node(0).status();
    let right_status = session.node(1).status();
    assert_eq!(left_status.their_period, right_status.period);
    assert_eq!(right_status.their_period, left_status.period);
    assert_eq!(left_status.errors.ignored_peer_messages, 0);
}

#[test]
fn lossy_link_still_converges() {
    init_logging();
    let mut session = duet(LinkConditionerConfig::lossy().with_seed(42));
    let mut left = SineMotion::new(25.0);
    let mut right = SineMotion::new(30.0);

    session.run(800, &mut [&mut left as &mut dyn MotionSource, &mut right]);

    for index in 0..2 {
        let status = session.node(index).status();
        assert!(status.their_period > 0.0, "node {index} never heard its peer");
        assert_period_near!(session.node(index).clock.last().unwrap(), 550.0, 0.1);
    }
}

#[test]
fn lone_node_drives_clock_with_its_own_period() {
    let mut session = TestSession::new(
        vec![NodeConfig::new(1).with_sync(steady_config())],
        LinkConditionerConfig::perfect(),
    )
    .unwrap();
    let mut motion = SineMotion::new(25.0);

    session.run(600, &mut [&mut motion as &mut dyn MotionSource]);

    let status = session.node(0).status();
    assert_eq!(status.their_period, -1.0);
    assert_period_near!(session.node(0).clock.last().unwrap(), 500.0, 0.1);
    assert_eq!(status.integrated_period, Some(status.period));
}
