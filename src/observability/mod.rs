//! Structured logging to a rotating file.
//!
//! Stdout belongs to the terminal UI, so `tracing` events are written to a
//! log file through `tracing-subscriber`'s fmt layer:
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → FileWriter → cinefind.log (+ 3 backups)
//! ```
//!
//! # Configuration
//!
//! Trace level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`file_writer`]: Rotating file writer with size-based rotation

pub mod file_writer;
mod init;

pub use file_writer::FileWriter;
pub use init::init_tracing;
