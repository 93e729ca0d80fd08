use thiserror::Error;

/// Errors that can occur while interpreting a named peer broadcast
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PeerMessageError {
    /// Name does not start with a known value prefix
    #[error("Unrecognized broadcast name {name:?}. Expected a 'D_' or 'P_' prefix followed by a node id")]
    UnrecognizedName { name: String },

    /// Known prefix with nothing after it
    #[error("Broadcast name {name:?} carries no sender id after its prefix")]
    MissingSender { name: String },

    /// Value is NaN or infinite
    #[error("Broadcast {name:?} carries a non-finite value {value}")]
    NonFiniteValue { name: String, value: f32 },
}

/// Errors that can occur while encoding or decoding an OSC broadcast packet
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    /// Packet ended before a complete field was read
    #[error("Packet truncated while reading {field}: needed {needed} bytes, {remaining} remaining")]
    Truncated {
        field: &'static str,
        needed: usize,
        remaining: usize,
    },

    /// OSC string without a null terminator
    #[error("Unterminated OSC string in {field}")]
    UnterminatedString { field: &'static str },

    /// Address is not valid UTF-8
    #[error("Broadcast name is not valid UTF-8")]
    InvalidUtf8,

    /// Type tag string does not start with ','
    #[error("Malformed OSC type tag string {tags:?}")]
    MalformedTypeTags { tags: String },

    /// First argument is not a number this codec can read
    #[error("Unsupported OSC argument type '{tag}'. Only 'f', 'd' and 'i' are accepted")]
    UnsupportedTypeTag { tag: char },

    /// Encoded packet would not fit in a single datagram
    #[error("Encoded packet of {size} bytes exceeds the {limit} byte datagram limit")]
    PacketTooLarge { size: usize, limit: usize },
}
