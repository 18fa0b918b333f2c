//! Process-wide tracing setup.

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filters, formatting).
pub mod tracing;
