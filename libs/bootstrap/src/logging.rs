//! Logging setup for the binaries.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` always wins. Otherwise `-v` flags pick the level: none
/// uses the configured directives, one forces `info`, two `debug`,
/// three or more `trace`. Output goes to stderr so results on stdout
/// stay clean.
pub fn init(verbose: u8, config: &LoggingConfig) {
    let directives = match verbose {
        0 => config.level.clone(),
        1 => "info".to_owned(),
        2 => "debug".to_owned(),
        _ => "trace".to_owned(),
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
