//! Simulated IMU source for hardware-free operation
//!
//! Replays the firmware's boot lifecycle (`initialising`, `calibrating`,
//! then `ready` forever) and produces continuous orientation frames with
//! slowly drifting angles, Gaussian noise, and the extra data keys the
//! real firmware emits. Bytes are delivered in irregular chunk sizes so
//! downstream framing is exercised the way a real UART delivers data.

use crate::error::Result;
use crate::transport::ByteSource;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::thread;
use std::time::Duration;

/// Boot statuses emitted once each before continuous readings
const BOOT_STATUSES: [&str; 2] = ["initialising", "calibrating"];

/// Delay between generated frames, roughly the device's update rate
const FRAME_INTERVAL: Duration = Duration::from_millis(5);

/// Simulated MPU-6050 emitting JSON status lines
pub struct MockImuSource {
    rng: SmallRng,
    pending: VecDeque<u8>,
    boot_emitted: usize,
    tick: u64,
    /// Integrated yaw, degrees, wraps at 360
    yaw: f64,
}

impl MockImuSource {
    /// Create a simulator
    ///
    /// Seed 0 draws from entropy; any other value is reproducible.
    pub fn new(seed: u64) -> Self {
        let rng = if seed == 0 {
            SmallRng::from_entropy()
        } else {
            SmallRng::seed_from_u64(seed)
        };
        Self {
            rng,
            pending: VecDeque::new(),
            boot_emitted: 0,
            tick: 0,
            yaw: 0.0,
        }
    }

    /// Gaussian noise via Box-Muller
    fn gaussian(&mut self, stddev: f64) -> f64 {
        if stddev == 0.0 {
            return 0.0;
        }
        let u1: f64 = self.rng.gen_range(f64::EPSILON..1.0);
        let u2: f64 = self.rng.gen();
        (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos() * stddev
    }

    /// Generate the next CR-LF-terminated status line
    fn next_line(&mut self) -> Vec<u8> {
        let frame = if self.boot_emitted < BOOT_STATUSES.len() {
            let status = BOOT_STATUSES[self.boot_emitted];
            self.boot_emitted += 1;
            serde_json::json!({ "status": status, "data": {} })
        } else {
            self.tick += 1;
            let t = self.tick as f64 * 0.01;
            self.yaw = (self.yaw + 0.5) % 360.0;

            let angle_x = 2.0 * t.sin() + self.gaussian(0.05);
            let angle_y = 1.5 * t.cos() + self.gaussian(0.05);
            let angle_z = self.yaw + self.gaussian(0.05);

            serde_json::json!({
                "status": "ready",
                "data": {
                    "temp": 24.0 + self.gaussian(0.1),
                    "accX": self.gaussian(0.02),
                    "accY": self.gaussian(0.02),
                    "accZ": 1.0 + self.gaussian(0.02),
                    "gyroX": self.gaussian(0.5),
                    "gyroY": self.gaussian(0.5),
                    "gyroZ": self.gaussian(0.5),
                    "angleX": angle_x,
                    "angleY": angle_y,
                    "angleZ": angle_z,
                }
            })
        };

        let mut line = frame.to_string().into_bytes();
        line.extend_from_slice(b"\r\n");
        line
    }
}

impl ByteSource for MockImuSource {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        if self.pending.is_empty() {
            thread::sleep(FRAME_INTERVAL);
            let line = self.next_line();
            self.pending.extend(line);
        }

        // Deliver an irregular chunk, as a UART read would
        let max = buf.len().min(self.pending.len());
        let n = if max <= 1 {
            max
        } else {
            self.rng.gen_range(1..=max)
        };
        for (slot, byte) in buf.iter_mut().zip(self.pending.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framing::LineAssembler;
    use crate::telemetry::{self, MissingAxisPolicy};

    /// Pull complete lines out of the simulator until `count` are in hand
    fn collect_lines(source: &mut MockImuSource, count: usize) -> Vec<Vec<u8>> {
        let mut assembler = LineAssembler::new(4096);
        let mut lines = Vec::new();
        let mut buf = [0u8; 64];
        while lines.len() < count {
            let n = source.read(&mut buf).unwrap();
            for event in assembler.feed(&buf[..n]) {
                lines.push(event.unwrap());
            }
        }
        lines.truncate(count);
        lines
    }

    #[test]
    fn test_boot_lifecycle_then_ready() {
        let mut source = MockImuSource::new(42);
        let lines = collect_lines(&mut source, 4);

        let statuses: Vec<String> = lines
            .iter()
            .map(|l| telemetry::parse(l).unwrap().status)
            .collect();
        assert_eq!(statuses, vec!["initialising", "calibrating", "ready", "ready"]);
    }

    #[test]
    fn test_ready_frames_carry_all_axes() {
        let mut source = MockImuSource::new(42);
        for line in collect_lines(&mut source, 6).iter().skip(2) {
            let frame = telemetry::parse(line).unwrap();
            let reading = telemetry::validate(&frame, MissingAxisPolicy::Strict).unwrap();
            assert!(reading.angle_z >= 0.0 && reading.angle_z < 361.0);
        }
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let mut a = MockImuSource::new(7);
        let mut b = MockImuSource::new(7);
        assert_eq!(collect_lines(&mut a, 5), collect_lines(&mut b, 5));
    }
}
