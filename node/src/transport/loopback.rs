use std::sync::{Arc, Mutex, PoisonError};

use log::trace;
use smol::channel::{self, Receiver, Sender, TryRecvError};

use entrain_shared::NamedValue;

use super::{PeerReceiver, PeerSender, RecvError, SendError};

/// Imperfections applied by a [`LoopbackHub`].
#[derive(Clone, Debug, PartialEq)]
pub struct LinkConditionerConfig {
    /// Chance in `[0, 1]` that a single delivery is dropped
    pub loss: f32,
    /// Whether a receiver may hand out a message after the one sent behind it
    pub reorder: bool,
    /// Fixed seed for repeatable runs
    pub seed: Option<u64>,
}

impl LinkConditionerConfig {
    pub fn new(loss: f32, reorder: bool, seed: Option<u64>) -> Self {
        Self {
            loss,
            reorder,
            seed,
        }
    }

    /// Every broadcast reaches every member, in send order.
    pub fn perfect() -> Self {
        Self::new(0.0, false, None)
    }

    /// A quarter of deliveries lost, the rest possibly swapped.
    pub fn lossy() -> Self {
        Self::new(0.25, true, None)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for LinkConditionerConfig {
    fn default() -> Self {
        Self::perfect()
    }
}

struct HubState {
    members: Vec<Sender<NamedValue>>,
    rng: fastrand::Rng,
    joined: u64,
}

/// In-process broadcast channel. Every member receives every broadcast,
/// including its own, subject to the configured link conditions.
#[derive(Clone)]
pub struct LoopbackHub {
    config: LinkConditionerConfig,
    state: Arc<Mutex<HubState>>,
}

impl LoopbackHub {
    pub fn new(config: LinkConditionerConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Self {
            config,
            state: Arc::new(Mutex::new(HubState {
                members: Vec::new(),
                rng,
                joined: 0,
            })),
        }
    }

    pub fn config(&self) -> &LinkConditionerConfig {
        &self.config
    }

    /// Adds a member and returns its sending and receiving ends.
    pub fn join(&self) -> (Box<dyn PeerSender>, Box<dyn PeerReceiver>) {
        let (sender, receiver) = channel::unbounded();

        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.members.push(sender);
        state.joined += 1;
        let rng = fastrand::Rng::with_seed(state.rng.u64(..) ^ state.joined);
        drop(state);

        let hub_sender = LoopbackSender {
            loss: self.config.loss,
            state: self.state.clone(),
        };
        let hub_receiver = LoopbackReceiver {
            receiver,
            reorder: self.config.reorder,
            rng,
            held: None,
        };
        (Box::new(hub_sender), Box::new(hub_receiver))
    }

    /// Members whose receiving end is still alive.
    pub fn members(&self) -> usize {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state
            .members
            .iter()
            .filter(|member| !member.is_closed())
            .count()
    }
}

struct LoopbackSender {
    loss: f32,
    state: Arc<Mutex<HubState>>,
}

impl PeerSender for LoopbackSender {
    fn broadcast(&self, named: &NamedValue) -> Result<(), SendError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.members.retain(|member| !member.is_closed());
        if state.members.is_empty() {
            return Err(SendError::Closed);
        }

        let HubState { members, rng, .. } = &mut *state;
        for member in members.iter() {
            if self.loss > 0.0 && rng.f32() < self.loss {
                trace!("link conditioner dropped {}", named.name);
                continue;
            }
            // unbounded, and closed members were just removed
            let _ = member.try_send(named.clone());
        }
        Ok(())
    }
}

struct LoopbackReceiver {
    receiver: Receiver<NamedValue>,
    reorder: bool,
    rng: fastrand::Rng,
    held: Option<NamedValue>,
}

impl PeerReceiver for LoopbackReceiver {
    fn receive(&mut self) -> Result<Option<NamedValue>, RecvError> {
        match self.receiver.try_recv() {
            Ok(named) => {
                if self.reorder && self.held.is_none() && self.rng.bool() {
                    trace!("link conditioner holding back {}", named.name);
                    self.held = Some(named);
                    return self.receive();
                }
                Ok(Some(named))
            }
            Err(TryRecvError::Empty) => Ok(self.held.take()),
            Err(TryRecvError::Closed) => match self.held.take() {
                Some(named) => Ok(Some(named)),
                None => Err(RecvError::Closed),
            },
        }
    }
}
