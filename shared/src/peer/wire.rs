//! OSC 1.0 encoding of named float broadcasts.
//!
//! A packet is the broadcast name as an OSC string, the type tag string
//! `",f"`, and the value as a big-endian `f32`. Decoding also accepts a first
//! argument of type `d` (f64) or `i` (i32). Extra arguments are ignored.

use crate::peer::{error::WireError, peer_message::NamedValue};

/// Largest packet this codec produces or accepts.
pub const MAX_PACKET_BYTES: usize = 1024;

const FLOAT_TAGS: &str = ",f";

/// Encodes `named` as a single OSC message.
pub fn encode(named: &NamedValue) -> Result<Vec<u8>, WireError> {
    let size = padded_len(named.name.len()) + padded_len(FLOAT_TAGS.len()) + 4;
    if size > MAX_PACKET_BYTES {
        return Err(WireError::PacketTooLarge {
            size,
            limit: MAX_PACKET_BYTES,
        });
    }

    let mut packet = Vec::with_capacity(size);
    write_string(&mut packet, &named.name);
    write_string(&mut packet, FLOAT_TAGS);
    packet.extend_from_slice(&named.value.to_be_bytes());
    Ok(packet)
}

/// Decodes one OSC message into its name and first numeric argument.
pub fn decode(packet: &[u8]) -> Result<NamedValue, WireError> {
    if packet.len() > MAX_PACKET_BYTES {
        return Err(WireError::PacketTooLarge {
            size: packet.len(),
            limit: MAX_PACKET_BYTES,
        });
    }

    let mut reader = Reader::new(packet);
    let name = reader.read_string("address")?;
    let name = std::str::from_utf8(name).map_err(|_| WireError::InvalidUtf8)?;

    let tags = reader.read_string("type tags")?;
    let mut tag_chars = tags.iter().map(|byte| char::from(*byte));
    if tag_chars.next() != Some(',') {
        return Err(WireError::MalformedTypeTags {
            tags: String::from_utf8_lossy(tags).into_owned(),
        });
    }

    let value = match tag_chars.next() {
        Some('f') => f32::from_be_bytes(reader.read_array::<4>("float argument")?),
        Some('d') => f64::from_be_bytes(reader.read_array::<8>("double argument")?) as f32,
        Some('i') => i32::from_be_bytes(reader.read_array::<4>("int argument")?) as f32,
        Some(tag) => return Err(WireError::UnsupportedTypeTag { tag }),
        None => {
            return Err(WireError::MalformedTypeTags {
                tags: String::from(","),
            })
        }
    };

    Ok(NamedValue::new(name, value))
}

/// OSC strings are null-terminated and padded to a multiple of four bytes.
fn padded_len(len: usize) -> usize {
    (len + 4) & !3
}

fn write_string(packet: &mut Vec<u8>, value: &str) {
    packet.extend_from_slice(value.as_bytes());
    let padding = padded_len(value.len()) - value.len();
    packet.extend(std::iter::repeat(0u8).take(padding));
}

struct Reader<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    fn remaining(&self) -> &'a [u8] {
        &self.bytes[self.position..]
    }

    fn read_string(&mut self, field: &'static str) -> Result<&'a [u8], WireError> {
        let remaining = self.remaining();
        let Some(end) = remaining.iter().position(|byte| *byte == 0) else {
            return Err(WireError::UnterminatedString { field });
        };

        let consumed = padded_len(end);
        if consumed > remaining.len() {
            return Err(WireError::Truncated {
                field,
                needed: consumed,
                remaining: remaining.len(),
            });
        }

        self.position += consumed;
        Ok(&remaining[..end])
    }

    fn read_array<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N], WireError> {
        let remaining = self.remaining();
        if remaining.len() < N {
            return Err(WireError::Truncated {
                field,
                needed: N,
                remaining: remaining.len(),
            });
        }

        let mut output = [0u8; N];
        output.copy_from_slice(&remaining[..N]);
        self.position += N;
        Ok(output)
    }
}
