use crate::{peer::error::PeerMessageError, types::NodeId};

/// A raw named float as delivered by the broadcast channel. The sender's
/// identity is encoded in the name.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedValue {
    pub name: String,
    pub value: f32,
}

impl NamedValue {
    pub fn new<S: Into<String>>(name: S, value: f32) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Which value a peer broadcast carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PeerValueKind {
    Deviation,
    Period,
}

impl PeerValueKind {
    pub const ALL: [PeerValueKind; 2] = [PeerValueKind::Deviation, PeerValueKind::Period];

    pub fn prefix(&self) -> &'static str {
        match self {
            PeerValueKind::Deviation => "D_",
            PeerValueKind::Period => "P_",
        }
    }
}

/// A recognized peer broadcast: `<prefix><sender>` carrying `value`.
#[derive(Clone, Debug, PartialEq)]
pub struct PeerMessage {
    pub kind: PeerValueKind,
    pub sender: NodeId,
    pub value: f32,
}

impl PeerMessage {
    pub fn new(kind: PeerValueKind, sender: NodeId, value: f32) -> Self {
        Self {
            kind,
            sender,
            value,
        }
    }

    pub fn deviation(sender: NodeId, value: f32) -> Self {
        Self::new(PeerValueKind::Deviation, sender, value)
    }

    pub fn period(sender: NodeId, value: f32) -> Self {
        Self::new(PeerValueKind::Period, sender, value)
    }

    pub fn name(&self) -> String {
        format!("{}{}", self.kind.prefix(), self.sender)
    }

    pub fn to_named(&self) -> NamedValue {
        NamedValue::new(self.name(), self.value)
    }

    /// Splits a broadcast name into kind and sender.
    pub fn parse(named: &NamedValue) -> Result<Self, PeerMessageError> {
        let kind_and_sender = PeerValueKind::ALL.iter().find_map(|kind| {
            named
                .name
                .strip_prefix(kind.prefix())
                .map(|sender| (*kind, sender))
        });

        let Some((kind, sender)) = kind_and_sender else {
            return Err(PeerMessageError::UnrecognizedName {
                name: named.name.clone(),
            });
        };
        if sender.is_empty() {
            return Err(PeerMessageError::MissingSender {
                name: named.name.clone(),
            });
        }
        if !named.value.is_finite() {
            return Err(PeerMessageError::NonFiniteValue {
                name: named.name.clone(),
                value: named.value,
            });
        }

        Ok(Self::new(kind, NodeId::new(sender), named.value))
    }
}

impl From<&PeerMessage> for NamedValue {
    fn from(message: &PeerMessage) -> Self {
        message.to_named()
    }
}
