use thiserror::Error;

pub type Result<T> = core::result::Result<T, RngError>;

/// Errors reported by the structural operations of a generator.
/// Word generation itself never fails.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RngError {
    #[error("invalid jump distance: {distance} (period: {period})")]
    InvalidJumpDistance { distance: f64, period: f64 },
    #[error("invalid jump distance: 2^{log_distance} (period: 2^{log_period})")]
    InvalidLogJumpDistance { log_distance: i32, log_period: i32 },
    #[error("distance is not a non-negative finite number: {0}")]
    InvalidDistanceValue(f64),
    #[error("state size mismatch: expected {expected} bytes, found {found}")]
    StateSize { expected: usize, found: usize },
    #[error("bound must be positive: {0}")]
    InvalidBound(u64),
}

impl RngError {
    pub fn state_size(expected: usize, found: usize) -> Self {
        RngError::StateSize { expected, found }
    }
}
