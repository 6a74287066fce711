//! Logging infrastructure for wkout.
//!
//! Provides centralized tracing setup for the binary. The editor itself only
//! emits events; it never installs a subscriber.

use crate::{Error, Result};
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter, Registry};

/// Adjusts the active log level after the subscriber is installed
///
/// Logging starts before the config file is read, so the configured level
/// is applied afterwards through this handle.
pub struct LevelHandle {
    handle: reload::Handle<EnvFilter, Registry>,
    from_env: bool,
}

impl LevelHandle {
    /// Switch to `level` unless RUST_LOG chose the filter
    pub fn set_level(&self, level: &str) -> Result<()> {
        if self.from_env {
            return Ok(());
        }
        self.handle
            .reload(EnvFilter::new(level))
            .map_err(|e| Error::Config(format!("Failed to apply log level {:?}: {}", level, e)))
    }
}

/// Initialize logging with the default level (warn)
pub fn init() -> Option<LevelHandle> {
    init_with_level("warn")
}

/// Initialize logging with a specific default level
///
/// # Arguments
/// * `default_level` - Default log level (trace, debug, info, warn, error)
///
/// This can still be overridden by the RUST_LOG environment variable.
/// Output goes to stderr so command output on stdout stays clean.
/// Returns `None` if a global subscriber is already installed.
pub fn init_with_level(default_level: &str) -> Option<LevelHandle> {
    let (filter, from_env) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, true),
        Err(_) => (EnvFilter::new(default_level), false),
    };
    let (filter, handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .try_init()
        .ok()?;

    Some(LevelHandle { handle, from_env })
}

/// Initialize logging for testing (captures logs for test output)
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
