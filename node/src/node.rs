use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Instant,
};

use log::warn;

use entrain_shared::{NamedValue, PeerUpdate, SensorReading};

use crate::{
    events::{Beat, Events},
    hooks::{ClockDriver, ModeChangeHook},
    status::NodeStatus,
    sync_loop::SynchronizationLoop,
    transport::{PeerReceiver, PeerSender},
    NodeConfig, NodeError,
};

/// Thread-safe handle to a [`SynchronizationLoop`] and the sender its
/// broadcasts go out on.
///
/// Clones share the same loop, so the sensor source and the broadcast
/// listener may each hold one on their own thread. All state changes go
/// through a single mutex; broadcasts are sent after it is released.
#[derive(Clone)]
pub struct Node {
    inner: Arc<Mutex<SynchronizationLoop>>,
    sender: Arc<dyn PeerSender>,
}

impl Node {
    pub fn new(config: NodeConfig, sender: Box<dyn PeerSender>) -> Result<Self, NodeError> {
        let sync_loop = SynchronizationLoop::new(config)?;
        Ok(Self::from_loop(sync_loop, sender))
    }

    /// Wraps an already-built loop, e.g. one with custom strategies.
    pub fn from_loop(sync_loop: SynchronizationLoop, sender: Box<dyn PeerSender>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(sync_loop)),
            sender: Arc::from(sender),
        }
    }

    pub fn set_clock_driver<D: ClockDriver + 'static>(&self, driver: D) {
        self.lock().set_clock_driver(driver);
    }

    pub fn set_mode_hook<H: ModeChangeHook + 'static>(&self, hook: H) {
        self.lock().set_mode_hook(hook);
    }

    /// Sensor callback. Never fails: faults are counted and queued as
    /// [`ErrorEvent`](crate::ErrorEvent)s.
    pub fn on_sensor_sample(&self, reading: SensorReading) {
        self.on_sensor_sample_at(reading, Instant::now());
    }

    pub fn on_sensor_sample_at(&self, reading: SensorReading, now: Instant) {
        let result = self.lock().on_sensor_sample_at(reading, now);
        // faults were already recorded by the loop
        if let Ok(Some(outbound)) = result {
            self.broadcast(&outbound);
        }
    }

    /// Broadcast listener callback.
    pub fn on_peer_message(&self, named: &NamedValue) -> PeerUpdate {
        self.lock().on_peer_message(named)
    }

    /// Drains everything currently waiting on `receiver`. Returns the number of
    /// broadcasts handed to the loop.
    pub fn receive_peer_messages(&self, receiver: &mut dyn PeerReceiver) -> usize {
        let mut count = 0;
        loop {
            match receiver.receive() {
                Ok(Some(named)) => {
                    self.on_peer_message(&named);
                    count += 1;
                }
                Ok(None) => break,
                Err(error) => {
                    warn!("Stopped receiving broadcasts: {error}");
                    self.lock().record_transport_error(NodeError::Recv(error));
                    break;
                }
            }
        }
        count
    }

    /// Clock beat callback.
    pub fn on_beat(&self) -> Beat {
        self.lock().on_beat()
    }

    pub fn status(&self) -> NodeStatus {
        self.lock().status()
    }

    pub fn take_events(&self) -> Events {
        self.lock().take_events()
    }

    pub fn reset(&self) {
        self.lock().reset();
    }

    // Private

    fn lock(&self) -> MutexGuard<'_, SynchronizationLoop> {
        // a panicking hook must not take the node down with it
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn broadcast(&self, outbound: &[NamedValue]) {
        for named in outbound {
            if let Err(error) = self.sender.broadcast(named) {
                warn!("Failed to broadcast {}: {error}", named.name);
                self.lock().record_transport_error(NodeError::Send(error));
            }
        }
    }
}
