//! Sink implementations
//!
//! Contains ConsoleSink, CrashSink, FileWriterSink and HapticSink.

mod console;
mod crash;
mod file_writer;
mod haptic;

pub use self::console::ConsoleSink;
pub use self::crash::{CrashSink, DEFAULT_CRASH_PREFIX};
pub use self::file_writer::{FileWriterConfig, FileWriterSink};
pub use self::haptic::{Actuator, HapticSink, DEFAULT_PULSE};
