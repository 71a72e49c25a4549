//! Telemetry frame schema and validation
//!
//! Each line from the device is a JSON object carrying a status tag and a
//! map of numeric fields:
//!
//! ```text
//! {"status":"ready","data":{"angleX":1.2,"angleY":-0.4,"angleZ":87.5,...}}
//! ```
//!
//! During boot the firmware cycles through `initialising` and
//! `calibrating` before settling on `ready`; only `ready` frames carry
//! usable orientation data. Keys in `data` beyond the three angles
//! (temperature, raw accelerometer and gyro values) are ignored.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Status tag a frame must carry to be forwarded
pub const STATUS_READY: &str = "ready";

/// One decoded line, prior to validation
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryFrame {
    pub status: String,
    pub data: HashMap<String, f64>,
}

/// A validated orientation reading, in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub angle_x: f64,
    pub angle_y: f64,
    pub angle_z: f64,
}

/// Structural rejection of a line
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Not a JSON object of the expected shape
    #[error("malformed telemetry frame: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Content rejection of a parsed frame
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Device has not finished booting
    #[error("device not ready (status: {0})")]
    NotReady(String),

    /// An angle field is absent and the policy is strict
    #[error("missing axis field: {0}")]
    MissingAxis(&'static str),
}

/// What to do when a `ready` frame lacks one of the angle fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingAxisPolicy {
    /// Substitute 0.0 for the absent axis (the device contract's lenient
    /// reading; one dropped axis does not stall the pipeline)
    #[default]
    ZeroFill,
    /// Reject the whole frame
    Strict,
}

/// Decode one line as a telemetry frame.
///
/// The line must be a JSON object with a string `status` and an object
/// `data` whose values are all numeric. Anything else is `Malformed` and
/// the caller drops the line.
pub fn parse(line: &[u8]) -> Result<TelemetryFrame, ParseError> {
    Ok(serde_json::from_slice(line)?)
}

/// Check the status gate and extract the three angles.
pub fn validate(
    frame: &TelemetryFrame,
    policy: MissingAxisPolicy,
) -> Result<Reading, ValidationError> {
    if frame.status != STATUS_READY {
        return Err(ValidationError::NotReady(frame.status.clone()));
    }

    let axis = |key: &'static str| match frame.data.get(key) {
        Some(value) => Ok(*value),
        None => match policy {
            MissingAxisPolicy::ZeroFill => Ok(0.0),
            MissingAxisPolicy::Strict => Err(ValidationError::MissingAxis(key)),
        },
    };

    Ok(Reading {
        angle_x: axis("angleX")?,
        angle_y: axis("angleY")?,
        angle_z: axis("angleZ")?,
    })
}
