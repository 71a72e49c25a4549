//! Fixed-layout pose datagram encoding
//!
//! The downstream consumer expects six consecutive little-endian IEEE-754
//! doubles per datagram, position before orientation:
//!
//! ```text
//! offset  0: posX    (reserved, always 0.0)
//! offset  8: posY    (reserved, always 0.0)
//! offset 16: posZ    (reserved, always 0.0)
//! offset 24: angleZ
//! offset 32: angleY
//! offset 40: angleX
//! ```
//!
//! Field order and byte order are a frozen wire contract; swapping any
//! two fields breaks the consumer.

use crate::telemetry::Reading;

/// Datagram size: six f64 fields, 8 bytes each
pub const PACKET_LEN: usize = 48;

/// One outbound pose record
///
/// Position fields are reserved for future use and stay at 0.0; only
/// orientation is sensed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PosePacket {
    pub pos_x: f64,
    pub pos_y: f64,
    pub pos_z: f64,
    pub angle_x: f64,
    pub angle_y: f64,
    pub angle_z: f64,
}

impl PosePacket {
    /// Build a packet from one validated reading, positions zeroed
    pub fn from_reading(reading: &Reading) -> Self {
        Self {
            angle_x: reading.angle_x,
            angle_y: reading.angle_y,
            angle_z: reading.angle_z,
            ..Self::default()
        }
    }

    /// Serialize to the fixed wire layout
    pub fn to_bytes(&self) -> [u8; PACKET_LEN] {
        let mut buf = [0u8; PACKET_LEN];
        buf[0..8].copy_from_slice(&self.pos_x.to_le_bytes());
        buf[8..16].copy_from_slice(&self.pos_y.to_le_bytes());
        buf[16..24].copy_from_slice(&self.pos_z.to_le_bytes());
        buf[24..32].copy_from_slice(&self.angle_z.to_le_bytes());
        buf[32..40].copy_from_slice(&self.angle_y.to_le_bytes());
        buf[40..48].copy_from_slice(&self.angle_x.to_le_bytes());
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Decode the f64 field at `offset`
    fn field_at(buf: &[u8], offset: usize) -> f64 {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&buf[offset..offset + 8]);
        f64::from_le_bytes(bytes)
    }

    #[test]
    fn test_encode_known_values() {
        let packet = PosePacket::from_reading(&Reading {
            angle_x: 1.5,
            angle_y: -2.25,
            angle_z: 3.0,
        });
        let buf = packet.to_bytes();

        assert_eq!(buf.len(), PACKET_LEN);
        assert_eq!(field_at(&buf, 0), 0.0);
        assert_eq!(field_at(&buf, 8), 0.0);
        assert_eq!(field_at(&buf, 16), 0.0);
        assert_eq!(field_at(&buf, 24), 3.0); // angleZ
        assert_eq!(field_at(&buf, 32), -2.25); // angleY
        assert_eq!(field_at(&buf, 40), 1.5); // angleX
    }

    #[test]
    fn test_little_endian_byte_order() {
        let packet = PosePacket {
            angle_x: 1.0,
            ..Default::default()
        };
        let buf = packet.to_bytes();
        // 1.0 as little-endian IEEE-754: mantissa zeros, exponent in the
        // last two bytes of the field
        assert_eq!(&buf[40..48], &[0, 0, 0, 0, 0, 0, 0xF0, 0x3F]);
    }

    #[test]
    fn test_default_packet_is_all_zero_bytes() {
        assert_eq!(PosePacket::default().to_bytes(), [0u8; PACKET_LEN]);
    }

    #[test]
    fn test_field_order_is_position_then_reversed_angles() {
        let packet = PosePacket::from_reading(&Reading {
            angle_x: 10.0,
            angle_y: 20.0,
            angle_z: 30.0,
        });
        let buf = packet.to_bytes();
        let decoded: Vec<f64> = (0..6).map(|i| field_at(&buf, i * 8)).collect();
        assert_eq!(decoded, vec![0.0, 0.0, 0.0, 30.0, 20.0, 10.0]);
    }
}
