//! Shared error type across statline crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, StatlineError>;

/// Unified error type used by core and the push subsystem.
///
/// The metrics subsystem is fail-open: most faults (bad interval strings,
/// missing host identity, push failures) are recovered locally and never
/// reach this type. What remains is configuration loading and transport
/// construction, which callers may want to report at startup.
#[derive(Debug, Error)]
pub enum StatlineError {
    #[error("config: {0}")]
    Config(String),
    #[error("transport: {0}")]
    Transport(String),
}
