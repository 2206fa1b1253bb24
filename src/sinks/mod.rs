//! Sink implementations

pub mod console;
pub mod file;
pub mod memory;

pub use console::{ConsoleSink, ConsoleTarget};
pub use file::FileSink;
pub use memory::MemorySink;

// Re-export the trait next to its implementations
pub use crate::core::Sink;
