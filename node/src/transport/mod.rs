cfg_if! {
    if #[cfg(feature = "transport_udp")] {
        pub mod udp;
    } else {}
}

pub mod loopback;

pub use inner::{PeerReceiver, PeerSender, RecvError, SendError};

mod inner {

    use thiserror::Error;

    use entrain_shared::{NamedValue, WireError};

    /// Errors that can occur while broadcasting a named value
    #[derive(Debug, Clone, PartialEq, Eq, Error)]
    pub enum SendError {
        /// Every receiving end of the channel is gone
        #[error("Broadcast channel is closed")]
        Closed,

        /// Value could not be put on the wire
        #[error("Could not encode broadcast: {0}")]
        Wire(#[from] WireError),

        /// Socket refused the datagram
        #[error("Socket send failed: {reason}")]
        Io { reason: String },
    }

    /// Errors that can occur while polling for broadcasts
    #[derive(Debug, Clone, PartialEq, Eq, Error)]
    pub enum RecvError {
        /// The sending side of the channel is gone
        #[error("Broadcast channel is closed")]
        Closed,

        /// Socket read failed for a reason other than having no data
        #[error("Socket receive failed: {reason}")]
        Io { reason: String },
    }

    /// Puts a named value on the shared broadcast channel. Delivery is
    /// at-most-once and unordered; every listener, the sender's own included,
    /// may or may not see it.
    pub trait PeerSender: Send + Sync {
        fn broadcast(&self, named: &NamedValue) -> Result<(), SendError>;
    }

    /// Polls the broadcast channel without blocking. `Ok(None)` means nothing
    /// is waiting right now.
    pub trait PeerReceiver: Send {
        fn receive(&mut self) -> Result<Option<NamedValue>, RecvError>;
    }
}
