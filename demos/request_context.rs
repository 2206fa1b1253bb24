//! Request context example
//!
//! A context logs its current data as trailing JSON. It travels down the
//! call chain inside a carrier; a cloned context diverges from its parent.
//!
//! Run with: cargo run --example request_context

use rust_logger_pipeline::container::{Carrier, Context, ContextData};
use rust_logger_pipeline::core::{emit_to, level_to_prefix_mapper};
use rust_logger_pipeline::prelude::*;
use rust_logger_pipeline::sinks::ConsoleTarget;
use std::sync::Arc;

fn handle(carrier: &Carrier) -> Result<()> {
    let ctx = Context::from_carrier(carrier)?;
    ctx.data().set("Verb", "POST");
    ctx.logger().info("third", args![]);
    Ok(())
}

fn main() -> Result<()> {
    println!("=== Rust Logger Pipeline - Request Context Example ===\n");

    let stdout = Arc::new(ConsoleSink::plain(ConsoleTarget::Stdout));
    let tail = MapperFunc::new(level_to_prefix_mapper).next(emit_to(stdout));

    let mut data = ContextData::new();
    data.set("RequestID", "stone1");
    let carrier = Arc::new(Context::new(data, tail)).with_carrier(&Carrier::new());

    let c1 = Context::from_carrier(&carrier)?;
    c1.logger().info("first", args![]);
    c1.data().set("Path", "/update");
    c1.logger().info("second", args![]);

    handle(&Arc::new((*c1).clone()).with_carrier(&carrier))?;

    Context::from_carrier(&carrier)?.logger().info("forth", args![]);

    if let Err(e) = Context::from_carrier(&Carrier::new()) {
        println!("\nwithout a context: {}", e);
    }

    println!("\n=== Example completed successfully ===");
    Ok(())
}
