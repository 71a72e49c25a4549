//! DishaIO - orientation telemetry bridge daemon
//!
//! Continuously forwards IMU orientation readings from a serial-attached
//! device to a UDP consumer. One worker thread drives the whole pipeline;
//! the main thread idles until the worker exits or a shutdown signal
//! arrives.

use disha_io::bridge::Bridge;
use disha_io::config::AppConfig;
use disha_io::error::{Error, Result};
use disha_io::transport::create_source;
use disha_io::udp_sink::UdpSink;
use std::env;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Parse config path from command line arguments.
///
/// Supports:
/// - `disha-io <path>` (positional)
/// - `disha-io --config <path>` (flag-based)
/// - `disha-io -c <path>` (short flag)
///
/// Defaults to `/etc/dishaio.toml` if not specified.
fn parse_config_path() -> String {
    let args: Vec<String> = env::args().collect();

    // Look for --config or -c flag
    for i in 1..args.len() {
        if (args[i] == "--config" || args[i] == "-c") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }

    // Fall back to first positional argument (if it doesn't start with -)
    if args.len() > 1 && !args[1].starts_with('-') {
        return args[1].clone();
    }

    // Default path
    "/etc/dishaio.toml".to_string()
}

fn main() -> Result<()> {
    let config_path = parse_config_path();
    let config = match AppConfig::from_file(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config {}: {}", config_path, e);
            return Err(e);
        }
    };

    // Initialize logger; RUST_LOG overrides the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&config.logging.level),
    )
    .init();

    log::info!("DishaIO v0.1.0 starting...");
    log::info!("Using config: {}", config_path);
    log::info!(
        "Source: {} ({}, {} baud)",
        config.source.address,
        config.source.kind,
        config.source.baud
    );
    log::info!("Sink: {}", config.sink.address);

    // Open transports; both handles move into the worker and stay
    // exclusively owned by it
    let source = create_source(&config.source)?;
    let sink = UdpSink::connect(&config.sink.address)?;

    // Set up shutdown signal handler
    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);

    ctrlc::set_handler(move || {
        log::info!("Received shutdown signal");
        r.store(false, Ordering::Relaxed);
    })
    .map_err(|e| Error::Other(format!("Error setting Ctrl-C handler: {}", e)))?;

    // Spawn the bridge worker
    let mut bridge = Bridge::new(source, Box::new(sink), &config.bridge);
    let worker_running = Arc::clone(&running);
    let worker = thread::Builder::new()
        .name("bridge-worker".to_string())
        .spawn(move || bridge.run(&worker_running))
        .map_err(|e| Error::Other(format!("Failed to spawn bridge worker: {}", e)))?;

    log::info!("DishaIO running. Press Ctrl-C to stop.");

    // Idle until shutdown is requested or the worker dies on its own
    while running.load(Ordering::Relaxed) && !worker.is_finished() {
        thread::sleep(Duration::from_millis(100));
    }
    running.store(false, Ordering::Relaxed);

    let result = worker
        .join()
        .map_err(|_| Error::Other("bridge worker panicked".to_string()))?;

    if let Err(ref e) = result {
        log::error!("Bridge failed: {}", e);
    }
    result?;

    log::info!("DishaIO stopped");
    Ok(())
}
