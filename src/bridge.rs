//! Bridge worker: sensor frames in, pose datagrams out
//!
//! A single worker owns the whole pipeline and runs it sequentially:
//! read a chunk, reassemble lines, parse and validate each, encode and
//! send. Readings are forwarded in strict arrival order with no batching.
//!
//! Error handling splits two ways:
//! - transport read/write failures are fatal and end the loop;
//! - per-line content failures (malformed JSON, not-ready status, missing
//!   axis, oversized line) are counted, logged at low verbosity, and
//!   never stop processing.

use crate::config::BridgeConfig;
use crate::error::Result;
use crate::framing::{FrameError, LineAssembler};
use crate::packet::PosePacket;
use crate::telemetry::{self, MissingAxisPolicy, ValidationError};
use crate::transport::{ByteSource, PacketSink};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Serial read chunk size; the assembler tolerates any chunking
const READ_CHUNK_SIZE: usize = 256;

/// Interval between statistics log lines
const STATS_INTERVAL: Duration = Duration::from_secs(10);

/// Forwarding counters, logged periodically
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BridgeStats {
    pub forwarded: u64,
    pub malformed: u64,
    pub not_ready: u64,
    pub missing_axis: u64,
    pub oversized: u64,
}

/// The forwarding pipeline, driven by a single worker thread
pub struct Bridge {
    source: Box<dyn ByteSource>,
    sink: Box<dyn PacketSink>,
    assembler: LineAssembler,
    policy: MissingAxisPolicy,
    stats: BridgeStats,
}

impl Bridge {
    /// Assemble the pipeline around exclusively owned transport handles
    pub fn new(
        source: Box<dyn ByteSource>,
        sink: Box<dyn PacketSink>,
        config: &BridgeConfig,
    ) -> Self {
        Self {
            source,
            sink,
            assembler: LineAssembler::new(config.max_line_bytes),
            policy: config.missing_axis,
            stats: BridgeStats::default(),
        }
    }

    /// Drive the pipeline until `running` clears or a transport error.
    ///
    /// The flag is checked between iterations; the source's read timeout
    /// guarantees it is observed within one tick.
    pub fn run(&mut self, running: &AtomicBool) -> Result<()> {
        log::info!("Bridge running (missing axis policy: {:?})", self.policy);

        let mut chunk = [0u8; READ_CHUNK_SIZE];
        let mut last_stats = Instant::now();

        while running.load(Ordering::Relaxed) {
            let n = self.source.read(&mut chunk)?;
            if n > 0 {
                self.process_chunk(&chunk[..n])?;
            }

            if last_stats.elapsed() >= STATS_INTERVAL {
                self.log_statistics();
                last_stats = Instant::now();
            }
        }

        log::info!(
            "Bridge stopped ({} readings forwarded)",
            self.stats.forwarded
        );
        Ok(())
    }

    /// Counters accumulated so far
    pub fn stats(&self) -> BridgeStats {
        self.stats
    }

    /// Feed one chunk through framing and forward every accepted reading
    fn process_chunk(&mut self, chunk: &[u8]) -> Result<()> {
        for event in self.assembler.feed(chunk) {
            match event {
                Ok(line) => self.process_line(&line)?,
                Err(FrameError::LineTooLong { limit }) => {
                    self.stats.oversized += 1;
                    log::warn!("Discarding oversized line (cap {} bytes)", limit);
                }
            }
        }
        Ok(())
    }

    /// Parse, validate, encode, and send one line.
    ///
    /// Only the sink write can fail here; every content rejection returns
    /// `Ok` after bumping its counter.
    fn process_line(&mut self, line: &[u8]) -> Result<()> {
        let frame = match telemetry::parse(line) {
            Ok(frame) => frame,
            Err(e) => {
                self.stats.malformed += 1;
                log::debug!("Dropping line: {}", e);
                return Ok(());
            }
        };

        let reading = match telemetry::validate(&frame, self.policy) {
            Ok(reading) => reading,
            Err(ValidationError::NotReady(status)) => {
                self.stats.not_ready += 1;
                log::debug!("Device not ready (status: {})", status);
                return Ok(());
            }
            Err(e @ ValidationError::MissingAxis(_)) => {
                self.stats.missing_axis += 1;
                log::debug!("Dropping reading: {}", e);
                return Ok(());
            }
        };

        let packet = PosePacket::from_reading(&reading);
        self.sink.send(&packet.to_bytes())?;
        self.stats.forwarded += 1;

        log::trace!(
            "Forwarded angles x={:.3} y={:.3} z={:.3}",
            reading.angle_x,
            reading.angle_y,
            reading.angle_z
        );
        Ok(())
    }

    fn log_statistics(&self) {
        let s = &self.stats;
        log::info!(
            "Forwarded={} Malformed={} NotReady={} MissingAxis={} Oversized={}",
            s.forwarded,
            s.malformed,
            s.not_ready,
            s.missing_axis,
            s.oversized
        );
    }
}
