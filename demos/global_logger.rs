//! Process-wide logger example
//!
//! Run with: cargo run --example global_logger

use rust_logger_pipeline::prelude::*;
use std::thread;

fn main() {
    println!("=== Rust Logger Pipeline - Global Logger Example ===\n");

    let g = global();
    g.info("information", args![]);
    g.error("error", args![]);
    g.debug("debug (hidden at INFO)", args![]);

    g.set_level(Level::DEBUG);
    g.info("change level to %v", args![g.level()]);
    g.debug("last line", args![]);

    // Every thread sees the same instance and threshold
    let handles: Vec<_> = (0..3)
        .map(|t| thread::spawn(move || global().debug("from thread %d", args![t])))
        .collect();
    for h in handles {
        let _ = h.join();
    }

    println!("\n=== Example completed successfully ===");
}
