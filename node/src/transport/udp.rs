use std::{
    io,
    net::{SocketAddr, UdpSocket},
};

use log::{info, warn};

use entrain_shared::{wire, NamedValue};

use super::{PeerReceiver, PeerSender, RecvError, SendError};

/// UDP broadcast of OSC-encoded named values. Every node binds the same port
/// and sends to the subnet broadcast address, so it also hears itself.
pub struct UdpBroadcast {
    socket: UdpSocket,
    target: SocketAddr,
}

impl UdpBroadcast {
    /// Binds `bind_addr` in non-blocking broadcast mode. Broadcasts go to
    /// `target`, typically `255.255.255.255:<port>` or the subnet address.
    pub fn bind(bind_addr: SocketAddr, target: SocketAddr) -> io::Result<Self> {
        let socket = UdpSocket::bind(bind_addr)?;
        socket.set_broadcast(true)?;
        socket.set_nonblocking(true)?;
        info!("UDP broadcast bound on {} -> {}", socket.local_addr()?, target);
        Ok(Self { socket, target })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Splits into independently owned sending and receiving ends.
    pub fn split(self) -> io::Result<(Box<dyn PeerSender>, Box<dyn PeerReceiver>)> {
        let receiving = self.socket.try_clone()?;
        let sender = UdpSender {
            socket: self.socket,
            target: self.target,
        };
        let receiver = UdpReceiver {
            socket: receiving,
            buffer: Box::new([0u8; wire::MAX_PACKET_BYTES]),
        };
        Ok((Box::new(sender), Box::new(receiver)))
    }
}

struct UdpSender {
    socket: UdpSocket,
    target: SocketAddr,
}

impl PeerSender for UdpSender {
    fn broadcast(&self, named: &NamedValue) -> Result<(), SendError> {
        let packet = wire::encode(named)?;
        self.socket
            .send_to(&packet, self.target)
            .map(|_| ())
            .map_err(|error| SendError::Io {
                reason: error.to_string(),
            })
    }
}

struct UdpReceiver {
    socket: UdpSocket,
    buffer: Box<[u8; wire::MAX_PACKET_BYTES]>,
}

impl PeerReceiver for UdpReceiver {
    /// Returns the next well-formed broadcast. Malformed datagrams are logged
    /// and skipped.
    fn receive(&mut self) -> Result<Option<NamedValue>, RecvError> {
        loop {
            match self.socket.recv_from(&mut self.buffer[..]) {
                Ok((length, address)) => match wire::decode(&self.buffer[..length]) {
                    Ok(named) => return Ok(Some(named)),
                    Err(error) => {
                        warn!("Dropping malformed datagram from {address}: {error}");
                    }
                },
                Err(error) if error.kind() == io::ErrorKind::WouldBlock => return Ok(None),
                Err(error) => {
                    return Err(RecvError::Io {
                        reason: error.to_string(),
                    })
                }
            }
        }
    }
}
