use std::time::{Duration, Instant};

use entrain_node::{
    transport::{
        loopback::{LinkConditionerConfig, LoopbackHub},
        PeerReceiver,
    },
    Node, NodeConfig, NodeError,
};

use crate::{MotionSource, RecordingClock, RecordingModeHook};

/// A node on a test hub together with its receiving end and recorders
pub struct TestNode {
    pub node: Node,
    pub receiver: Box<dyn PeerReceiver>,
    pub clock: RecordingClock,
    pub hook: RecordingModeHook,
}

impl TestNode {
    pub fn status(&self) -> entrain_node::NodeStatus {
        self.node.status()
    }
}

/// Several nodes sharing one loopback hub and a virtual sample clock.
///
/// Each [`TestSession::tick`] feeds one reading to every node at the same
/// virtual instant and then lets every node drain its receiver.
pub struct TestSession {
    pub hub: LoopbackHub,
    pub nodes: Vec<TestNode>,
    start: Instant,
    sample_interval: Duration,
    ticks: u32,
}

impl TestSession {
    pub fn new(configs: Vec<NodeConfig>, link: LinkConditionerConfig) -> Result<Self, NodeError> {
        let hub = LoopbackHub::new(link);
        let mut nodes = Vec::new();
        for config in configs {
            let (sender, receiver) = hub.join();
            let node = Node::new(config, sender)?;
            let clock = RecordingClock::new();
            let hook = RecordingModeHook::new();
            node.set_clock_driver(clock.clone());
            node.set_mode_hook(hook.clone());
            nodes.push(TestNode {
                node,
                receiver,
                clock,
                hook,
            });
        }

        Ok(Self {
            hub,
            nodes,
            start: Instant::now(),
            sample_interval: Duration::from_millis(20),
            ticks: 0,
        })
    }

    pub fn with_sample_interval(mut self, sample_interval: Duration) -> Self {
        self.sample_interval = sample_interval;
        self
    }

    pub fn node(&self, index: usize) -> &TestNode {
        &self.nodes[index]
    }

    /// Advances virtual time by one sample for every node. `sources[i]` feeds
    /// `nodes[i]`.
    pub fn tick(&mut self, sources: &mut [&mut dyn MotionSource]) {
        let now = self.start + self.sample_interval * self.ticks;
        self.ticks += 1;

        for (test_node, source) in self.nodes.iter().zip(sources.iter_mut()) {
            test_node.node.on_sensor_sample_at(source.next_reading(), now);
        }
        self.exchange();
    }

    /// Advances virtual time by one sample for a single node; the others
    /// receive nothing from their sensors.
    pub fn tick_node(&mut self, index: usize, source: &mut dyn MotionSource) {
        let now = self.start + self.sample_interval * self.ticks;
        self.ticks += 1;

        self.nodes[index]
            .node
            .on_sensor_sample_at(source.next_reading(), now);
        self.exchange();
    }

    pub fn run(&mut self, ticks: usize, sources: &mut [&mut dyn MotionSource]) {
        for _ in 0..ticks {
            self.tick(sources);
        }
    }

    /// Lets every node drain its receiver.
    pub fn exchange(&mut self) {
        for test_node in self.nodes.iter_mut() {
            test_node
                .node
                .receive_peer_messages(test_node.receiver.as_mut());
        }
    }
}
