//! Logging setup shared by the `stockdesk` binaries and tests.

/// Tracing subscriber configuration.
pub mod tracing;

pub use crate::tracing::{LogFormat, LogOptions};

/// Initialize process-wide logging with defaults read from the environment.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    tracing::init(LogOptions::from_env());
}
