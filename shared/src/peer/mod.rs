pub mod error;
pub mod peer_message;
pub mod peer_state;
pub mod sync_channel;
pub mod wire;
