//! UDP sink for pose datagrams
//!
//! Send-only unicast: bind an ephemeral local port and address every
//! datagram to the configured consumer. Fire-and-forget - no retry, no
//! delivery guarantee, one send call per reading.

use crate::error::{Error, Result};
use crate::transport::PacketSink;
use std::net::{SocketAddr, UdpSocket};

/// UDP sink that forwards each packet as one datagram
pub struct UdpSink {
    socket: UdpSocket,
    target: SocketAddr,
}

impl UdpSink {
    /// Bind a send-only socket aimed at `target`
    pub fn connect(target: &str) -> Result<Self> {
        let target: SocketAddr = target
            .parse()
            .map_err(|e| Error::InvalidParameter(format!("sink address '{}': {}", target, e)))?;

        // Bind to any available port; we only send
        let socket = UdpSocket::bind("0.0.0.0:0")?;

        log::info!("UDP sink ready, forwarding to {}", target);

        Ok(Self { socket, target })
    }
}

impl PacketSink for UdpSink {
    fn send(&mut self, datagram: &[u8]) -> Result<()> {
        self.socket.send_to(datagram, self.target)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_unparseable_address() {
        assert!(UdpSink::connect("not-an-endpoint").is_err());
    }

    #[test]
    fn test_sends_one_datagram_per_packet() {
        let receiver = UdpSocket::bind("127.0.0.1:0").unwrap();
        let target = receiver.local_addr().unwrap();

        let mut sink = UdpSink::connect(&target.to_string()).unwrap();
        sink.send(b"first").unwrap();
        sink.send(b"second").unwrap();

        let mut buf = [0u8; 64];
        let (n, _) = receiver.recv_from(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"first");
        let (n, _) = receiver.recv_from(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"second");
    }
}
