//! Standard pipeline example
//!
//! Level filter, level prefix, then one line per event on the chosen target.
//!
//! Run with: cargo run --example default_logger

use rust_logger_pipeline::core::Target;
use rust_logger_pipeline::prelude::*;
use rust_logger_pipeline::{info, warn};

fn main() -> Result<()> {
    println!("=== Rust Logger Pipeline - Default Logger Example ===\n");

    println!("1. Warn threshold, stdout, no timestamp:");
    let logger = LoggerConfig {
        level: Level::WARN,
        target: Target::Stdout,
        timestamp: None,
        ..LoggerConfig::default()
    }
    .into_builder()?
    .build();

    logger.info("information", args![]);
    logger.error("error", args![]);
    logger.debug("debug", args![]);
    logger.warn("warn", args![]);
    logger.debug("last line", args![]);

    println!("\n2. Same pipeline from JSON, with macros:");
    let logger = LoggerConfig::from_json(
        r#"{"level": "debug", "target": "stdout", "timestamp": "iso8601"}"#,
    )?
    .into_builder()?
    .build();

    info!(logger, "listening on port %d", 8080);
    warn!(logger, "cache at %d%%", 93);

    println!("\n3. Default target (stderr, local timestamp):");
    let logger = Logger::default_pipeline(Level::INFO);
    logger.info("written to stderr", args![]);

    println!("\n=== Example completed successfully ===");
    Ok(())
}
