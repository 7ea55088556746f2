//! Process-wide tracing/logging setup for permgate binaries.
//!
//! Libraries in this workspace only emit `tracing` events; installing a
//! subscriber is left to the binary via [`init`].

pub mod tracing;

pub use crate::tracing::LogFormat;

/// Initialize tracing with JSON output.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(LogFormat::Json);
}

/// Initialize tracing with an explicit output format.
pub fn init_with(format: LogFormat) {
    tracing::init(format);
}
