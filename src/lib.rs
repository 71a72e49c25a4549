//! DishaIO - orientation telemetry bridge
//!
//! Reads CR-LF-framed JSON status lines from an MPU-6050-class IMU on a
//! serial port and forwards each `ready` reading as a fixed-layout UDP
//! datagram of six little-endian doubles (reserved position triple plus
//! angleZ/angleY/angleX).
//!
//! The pipeline is a single sequential worker:
//!
//! ```text
//! serial bytes -> LineAssembler -> parse/validate -> PosePacket -> UDP
//! ```

pub mod bridge;
pub mod config;
pub mod error;
pub mod framing;
pub mod mock;
pub mod packet;
pub mod serial_io;
pub mod telemetry;
pub mod transport;
pub mod udp_sink;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{Error, Result};
