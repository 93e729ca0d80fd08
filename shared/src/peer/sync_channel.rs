use log::{debug, trace};

use crate::{
    peer::{
        error::PeerMessageError,
        peer_message::{NamedValue, PeerMessage, PeerValueKind},
        peer_state::PeerState,
    },
    types::NodeId,
};

/// Effect of one inbound broadcast on the [`PeerState`].
#[derive(Clone, Debug, PartialEq)]
pub enum PeerUpdate {
    /// Our own broadcast came back. State untouched.
    OwnEcho,
    /// `their_deviation` was replaced. The mode must be re-evaluated.
    Deviation(f32),
    /// `their_period` was replaced.
    Period(f32),
    /// Not a peer broadcast this node understands. State untouched.
    Ignored(PeerMessageError),
}

/// Names outbound estimates with this node's identity and folds inbound
/// broadcasts from other nodes into the [`PeerState`].
///
/// The channel underneath is lossy and unordered; nothing here waits for,
/// counts on, or reorders deliveries.
#[derive(Clone, Debug)]
pub struct PeerSyncChannel {
    node_id: NodeId,
    state: PeerState,
    received: u64,
    ignored: u64,
}

impl PeerSyncChannel {
    pub fn new(node_id: NodeId) -> Self {
        Self {
            node_id,
            state: PeerState::new(),
            received: 0,
            ignored: 0,
        }
    }

    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    pub fn state(&self) -> &PeerState {
        &self.state
    }

    /// Broadcasts for one recompute cycle: deviation first, then period.
    pub fn outbound(&self, deviation: f32, period_ms: f32) -> [NamedValue; 2] {
        [
            PeerMessage::deviation(self.node_id.clone(), deviation).to_named(),
            PeerMessage::period(self.node_id.clone(), period_ms).to_named(),
        ]
    }

    pub fn receive(&mut self, named: &NamedValue) -> PeerUpdate {
        let message = match PeerMessage::parse(named) {
            Ok(message) => message,
            Err(error) => {
                self.ignored += 1;
                debug!("ignoring broadcast: {error}");
                return PeerUpdate::Ignored(error);
            }
        };

        if message.sender == self.node_id {
            trace!("ignoring own broadcast {}", named.name);
            return PeerUpdate::OwnEcho;
        }

        self.received += 1;
        match message.kind {
            PeerValueKind::Deviation => {
                self.state.their_deviation = message.value;
                PeerUpdate::Deviation(message.value)
            }
            PeerValueKind::Period => {
                self.state.their_period = message.value;
                PeerUpdate::Period(message.value)
            }
        }
    }

    /// Broadcasts from other nodes that changed the state.
    pub fn received(&self) -> u64 {
        self.received
    }

    /// Broadcasts dropped because their name or value was unusable.
    pub fn ignored(&self) -> u64 {
        self.ignored
    }

    pub fn reset(&mut self) {
        self.state.reset();
        self.received = 0;
        self.ignored = 0;
    }
}
