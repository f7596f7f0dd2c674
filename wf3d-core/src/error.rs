//! Error types for vector construction and vector algebra
use thiserror::Error;

/// Result alias for fallible vector operations
pub type Result<T> = std::result::Result<T, VectorError>;

/// Caller-correctable contract violations raised by [`crate::Vector3`].
///
/// The projection pipeline and the movement controller never produce these;
/// degenerate numbers are absorbed there instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VectorError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{name} out of range ({value}): {reason}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("cannot normalize a vector when its magnitude is zero")]
    ZeroMagnitude,

    #[error("cannot normalize a vector when its magnitude is NaN")]
    NaNMagnitude,

    #[error("cannot normalize a vector when its magnitude is infinite except under special conditions")]
    InfiniteMagnitude,
}

impl VectorError {
    pub(crate) fn out_of_range(name: &'static str, value: f64, reason: &'static str) -> Self {
        Self::OutOfRange {
            name,
            value,
            reason,
        }
    }
}
