//! Configuration for the DishaIO bridge
//!
//! Loads configuration from a TOML file with the few parameters the
//! bridge needs: where the sensor is attached, where pose datagrams go,
//! and how tolerant the pipeline should be.

use crate::error::Result;
use crate::telemetry::MissingAxisPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub source: SourceConfig,
    pub sink: SinkConfig,
    #[serde(default)]
    pub bridge: BridgeConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Telemetry source configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    /// Source kind: `serial` for a real device, `mock` for the simulator
    #[serde(default = "default_source_kind")]
    pub kind: String,
    /// Serial port path (e.g., "/dev/ttyUSB0"); ignored by the mock
    pub address: String,
    /// Baud rate
    #[serde(default = "default_baud")]
    pub baud: u32,
    /// Mock simulator seed (0 = nondeterministic)
    #[serde(default)]
    pub seed: u64,
}

/// UDP sink configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SinkConfig {
    /// Destination endpoint for pose datagrams
    ///
    /// Examples:
    /// - `127.0.0.1:4242` - local consumer
    /// - `192.168.1.20:4242` - consumer on the LAN
    pub address: String,
}

/// Pipeline tolerance configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BridgeConfig {
    /// Policy for `ready` frames missing one of angleX/angleY/angleZ
    #[serde(default)]
    pub missing_axis: MissingAxisPolicy,
    /// Cap on bytes buffered between delimiters; an accumulation past
    /// this is discarded and framing resynchronizes
    #[serde(default = "default_max_line_bytes")]
    pub max_line_bytes: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error); `RUST_LOG` overrides
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_source_kind() -> String {
    "serial".to_string()
}

fn default_baud() -> u32 {
    115_200
}

fn default_max_line_bytes() -> usize {
    4096
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            missing_axis: MissingAxisPolicy::default(),
            max_line_bytes: default_max_line_bytes(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML file
    ///
    /// # Example
    /// ```no_run
    /// use disha_io::config::AppConfig;
    ///
    /// let config = AppConfig::from_file("dishaio.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Default configuration for an MPU-6050 tracker on USB serial
    ///
    /// Suitable for testing and development. Deployments should use a
    /// proper TOML configuration file.
    pub fn mpu6050_defaults() -> Self {
        Self {
            source: SourceConfig {
                kind: default_source_kind(),
                address: "/dev/ttyUSB0".to_string(),
                baud: default_baud(),
                seed: 0,
            },
            sink: SinkConfig {
                address: "127.0.0.1:4242".to_string(),
            },
            bridge: BridgeConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::mpu6050_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::mpu6050_defaults();
        assert_eq!(config.source.kind, "serial");
        assert_eq!(config.source.address, "/dev/ttyUSB0");
        assert_eq!(config.source.baud, 115_200);
        assert_eq!(config.sink.address, "127.0.0.1:4242");
        assert_eq!(config.bridge.missing_axis, MissingAxisPolicy::ZeroFill);
        assert_eq!(config.bridge.max_line_bytes, 4096);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_toml_serialization() {
        let config = AppConfig::mpu6050_defaults();
        let toml_string = toml::to_string_pretty(&config).unwrap();

        assert!(toml_string.contains("[source]"));
        assert!(toml_string.contains("[sink]"));
        assert!(toml_string.contains("[bridge]"));
        assert!(toml_string.contains("[logging]"));

        assert!(toml_string.contains("address = \"/dev/ttyUSB0\""));
        assert!(toml_string.contains("baud = 115200"));
        assert!(toml_string.contains("missing_axis = \"zero-fill\""));
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_content = r#"
[source]
kind = "serial"
address = "/dev/ttyACM1"
baud = 57600

[sink]
address = "10.0.0.5:4242"

[bridge]
missing_axis = "strict"
max_line_bytes = 1024

[logging]
level = "debug"
"#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.source.address, "/dev/ttyACM1");
        assert_eq!(config.source.baud, 57600);
        assert_eq!(config.sink.address, "10.0.0.5:4242");
        assert_eq!(config.bridge.missing_axis, MissingAxisPolicy::Strict);
        assert_eq!(config.bridge.max_line_bytes, 1024);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let toml_content = r#"
[source]
address = "/dev/ttyUSB0"

[sink]
address = "127.0.0.1:4242"
"#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.source.kind, "serial");
        assert_eq!(config.source.baud, 115_200);
        assert_eq!(config.source.seed, 0);
        assert_eq!(config.bridge.missing_axis, MissingAxisPolicy::ZeroFill);
        assert_eq!(config.bridge.max_line_bytes, 4096);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_roundtrip_through_file_format() {
        let config = AppConfig::mpu6050_defaults();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let reparsed: AppConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(reparsed.source.address, config.source.address);
        assert_eq!(reparsed.sink.address, config.sink.address);
        assert_eq!(reparsed.bridge.max_line_bytes, config.bridge.max_line_bytes);
    }
}
