//! Custom pipeline example
//!
//! `next` chains stages and stops on the first error; `via` attaches a side
//! observer whose error is ignored.
//!
//! Run with: cargo run --example custom_pipeline

use rust_logger_pipeline::core::{render_mapper, Proxy};
use rust_logger_pipeline::prelude::*;
use std::sync::Arc;

fn level_word(ev: Event) -> Event {
    let word = match ev.level() {
        Level::INFO => "INFO",
        Level::WARN => "WARN",
        Level::ERROR => "ERROR",
        _ => "?",
    };
    let (level, format, args) = ev.into_parts();
    Event::new(level, format!("{} {}", word, format), args)
}

fn error_generator(tag: &'static str) -> MapperFunc {
    MapperFunc::check(move |ev: &Event| {
        if ev.level() != Level::ERROR {
            return Ok(());
        }
        Err(LoggerError::other(format!("{} GotError: {}", tag, ev.format())))
    })
}

fn main() {
    println!("=== Rust Logger Pipeline - Custom Pipeline Example ===\n");

    println!("1. via vs next:");
    let chain = MapperFunc::transform(level_word)
        .via(error_generator("1"))
        .next(MapperFunc::inspect(|ev: &Event| println!("Consume1: {}", ev)))
        .next(error_generator("2"))
        .next(MapperFunc::inspect(|ev: &Event| println!("Consume2: {}", ev)));

    let logger = Logger::new(Proxy::new(vec![Arc::new(chain)]));
    logger.set_err_consumer(|e| println!("Err: {}", e.root_cause()));
    logger.info("info msg", args![]);
    logger.error("error msg", args![]);

    println!("\n2. next with rendering:");
    let chain = MapperFunc::transform(level_word)
        .next(MapperFunc::new(render_mapper))
        .next(MapperFunc::transform(|ev: Event| {
            if ev.level() == Level::INFO {
                println!("ConsumeInfo: {}", ev.format());
            }
            ev
        }))
        .next(MapperFunc::inspect(|ev: &Event| println!("{}", ev.format())));

    let logger = Logger::new(Proxy::new(vec![Arc::new(chain)]));
    logger.info("info msg", args![]);
    logger.warn("warn msg", args![]);
    logger.error("error msg", args![]);
    logger.info("info level value is %d", args![Level::INFO]);

    println!("\n=== Example completed successfully ===");
}
