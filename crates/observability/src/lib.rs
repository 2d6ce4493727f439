//! Tracing and logging (shared setup).

/// Tracing configuration (filters, output format).
pub mod tracing;

/// Initialize process-wide observability with human-readable output.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Initialize with JSON output, for deployment pipelines whose logs are
/// collected and indexed.
pub fn init_json() {
    tracing::init_json();
}
