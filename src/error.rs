//! Error types for the CWT engine.
//!
//! Every failure inside a calculation is recovered locally and surfaced as a
//! single [`CwtError`]; nothing panics across the calculation boundary. Rows
//! already delivered to the callback before an abort remain valid.

/// Engine error taxonomy.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CwtError {
    /// Invalid configuration or kernel parameters (e.g. output width larger
    /// than input width, non-positive deviation).
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Buffer or plan acquisition failed; everything already acquired in the
    /// same call has been released.
    #[error("resource acquisition failed: {0}")]
    Resource(String),

    /// Worker thread creation or join failed; already-created threads were
    /// still joined and their buffers released.
    #[error("worker thread failure: {0}")]
    Concurrency(String),

    /// The per-row callback returned a non-zero status. This is a cooperative
    /// abort signal, not a defect; it stops only the signaling thread.
    #[error("aborted by callback with status {0}")]
    Callback(i32),
}

impl CwtError {
    /// C-style status code for FFI consumers: callback codes pass through,
    /// internal failures map to distinct negative values.
    pub fn code(&self) -> i32 {
        match self {
            CwtError::Config(_) => -1,
            CwtError::Resource(_) => -2,
            CwtError::Concurrency(_) => -3,
            CwtError::Callback(code) => *code,
        }
    }
}
