use std::time::{Duration, Instant};

use log::info;

use entrain_node::{
    transport::{
        loopback::{LinkConditionerConfig, LoopbackHub},
        PeerReceiver,
    },
    BeatEvent, ErrorEvent, IntervalEvent, Mode, ModeChangeEvent, Node, NodeConfig, NodeError,
};

use crate::motion::Swing;

struct Performer {
    name: &'static str,
    node: Node,
    receiver: Box<dyn PeerReceiver>,
    swing: Swing,
    next_beat: Option<Instant>,
}

pub struct App {
    hub: LoopbackHub,
    performers: Vec<Performer>,
}

impl App {
    pub fn new() -> Result<Self, NodeError> {
        info!("Entrain duet demo started");

        let hub = LoopbackHub::new(LinkConditionerConfig::lossy().with_seed(2024));
        let performers = vec![
            Self::performer(&hub, "left", Swing::steady(25.0, 1))?,
            Self::performer(&hub, "right", Swing::erratic(30.0, 600, 2))?,
        ];

        Ok(App { hub, performers })
    }

    fn performer(
        hub: &LoopbackHub,
        name: &'static str,
        swing: Swing,
    ) -> Result<Performer, NodeError> {
        let (sender, receiver) = hub.join();
        let node = Node::new(NodeConfig::new(name), sender)?;
        node.set_mode_hook(move |from: Mode, to: Mode| {
            info!("[{name}] renderer: {from} -> {to}");
        });
        Ok(Performer {
            name,
            node,
            receiver,
            swing,
            next_beat: None,
        })
    }

    pub fn update(&mut self) {
        let now = Instant::now();

        for performer in self.performers.iter_mut() {
            performer
                .node
                .on_sensor_sample_at(performer.swing.next_reading(), now);
        }
        for performer in self.performers.iter_mut() {
            performer
                .node
                .receive_peer_messages(performer.receiver.as_mut());
        }

        for performer in self.performers.iter_mut() {
            let mut events = performer.node.take_events();

            for transition in events.read::<ModeChangeEvent>() {
                info!(
                    "[{}] mode {} -> {}",
                    performer.name, transition.from, transition.to
                );
            }
            for interval_ms in events.read::<IntervalEvent>() {
                let interval = Duration::from_secs_f32(interval_ms / 1000.0);
                if performer.next_beat.is_none() {
                    performer.next_beat = Some(now + interval);
                }
            }
            for beat in events.read::<BeatEvent>() {
                info!(
                    "[{}] beat {} in {} ({:?}ms)",
                    performer.name, beat.beat, beat.mode, beat.integrated_period
                );
            }
            for error in events.read::<ErrorEvent>() {
                info!("[{}] error: {}", performer.name, error);
            }

            if let Some(next_beat) = performer.next_beat {
                if now >= next_beat {
                    let beat = performer.node.on_beat();
                    let interval_ms = beat.integrated_period.unwrap_or(500.0);
                    performer.next_beat =
                        Some(next_beat + Duration::from_secs_f32(interval_ms / 1000.0));
                }
            }
        }
    }

    pub fn report(&self) {
        info!("{} nodes on the hub", self.hub.members());
        for performer in &self.performers {
            let status = performer.node.status();
            info!(
                "[{}] mode {} period {:.1}ms (peer {:.1}ms) deviation {:.3} (peer {:.3}) intensity {:.2} beats {} errors {:?}",
                performer.name,
                status.mode,
                status.period,
                status.their_period,
                status.deviation,
                status.their_deviation,
                status.intensity,
                status.beats,
                status.errors
            );
        }
    }
}
