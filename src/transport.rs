//! Source/sink seam for the bridge
//!
//! The bridge owns exactly one byte source and one packet sink for its
//! whole lifetime; nothing else touches either handle. Both are trait
//! objects so the same loop runs against real hardware, the mock
//! simulator, or in-memory test doubles.

use crate::config::SourceConfig;
use crate::error::{Error, Result};
use crate::mock::MockImuSource;
use crate::serial_io::SerialTransport;

/// A source of raw telemetry bytes, delivered in arbitrary chunk sizes
pub trait ByteSource: Send {
    /// Read available bytes into `buf`, returning the count.
    ///
    /// A return of 0 means nothing arrived within the transport's
    /// timeout; it is a normal tick, not end-of-stream. Errors are fatal
    /// to the bridge.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize>;
}

/// A sink that transmits each buffer as one discrete datagram
pub trait PacketSink: Send {
    /// Send one datagram. Errors are fatal to the bridge.
    fn send(&mut self, datagram: &[u8]) -> Result<()>;
}

/// Create a byte source based on configuration
pub fn create_source(config: &SourceConfig) -> Result<Box<dyn ByteSource>> {
    match config.kind.as_str() {
        "serial" => Ok(Box::new(SerialTransport::open(
            &config.address,
            config.baud,
        )?)),
        "mock" => Ok(Box::new(MockImuSource::new(config.seed))),
        _ => Err(Error::UnknownSource(config.kind.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SourceConfig;

    #[test]
    fn test_unknown_source_kind_rejected() {
        let config = SourceConfig {
            kind: "carrier-pigeon".to_string(),
            address: "/dev/null".to_string(),
            baud: 115_200,
            seed: 0,
        };
        match create_source(&config) {
            Err(Error::UnknownSource(kind)) => assert_eq!(kind, "carrier-pigeon"),
            other => panic!("expected UnknownSource, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_mock_source_created() {
        let config = SourceConfig {
            kind: "mock".to_string(),
            address: String::new(),
            baud: 115_200,
            seed: 7,
        };
        assert!(create_source(&config).is_ok());
    }
}
