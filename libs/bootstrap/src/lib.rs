//! Shared plumbing for the SeqHub binaries: layered configuration,
//! logging setup, and shutdown signal handling.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod config;
pub mod logging;
pub mod signals;

// Re-export main types at crate root for convenience
pub use config::{AppConfig, ClientConfig, ENV_PREFIX, LoggingConfig};
pub use signals::wait_for_shutdown;
