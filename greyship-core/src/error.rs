use thiserror::Error;

/// Configuration errors raised before any grid is allocated.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid max iterations: {0} (must be < 255, the in-set sentinel)")]
    InvalidMaxIterations(u32),

    #[error("invalid window: {reason}")]
    InvalidWindow { reason: String },
}
