//! Error types for council operations.

use crate::advisor::AgentId;
use thiserror::Error;

/// Errors from council engine operations.
///
/// Capacity overflow, empty recall results, and empty councils are policy,
/// not failures; they never produce an error.
#[derive(Debug, Error)]
pub enum CouncilError {
    #[error("unknown agent: {id}")]
    NotFound { id: AgentId },

    #[error("{field} out of range: {value}")]
    InvalidRange { field: &'static str, value: f64 },
}

impl CouncilError {
    /// Shorthand for an out-of-range numeric input.
    pub fn invalid_range(field: &'static str, value: f64) -> Self {
        CouncilError::InvalidRange { field, value }
    }
}

/// Reject non-finite inputs; clamping a NaN would silently corrupt state.
pub(crate) fn ensure_finite(field: &'static str, value: f32) -> Result<f32, CouncilError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CouncilError::invalid_range(field, value as f64))
    }
}

/// Validate that a value lies in `[lo, hi]`.
pub(crate) fn ensure_in_range(
    field: &'static str,
    value: f32,
    lo: f32,
    hi: f32,
) -> Result<f32, CouncilError> {
    if value.is_finite() && value >= lo && value <= hi {
        Ok(value)
    } else {
        Err(CouncilError::invalid_range(field, value as f64))
    }
}
