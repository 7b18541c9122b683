//! Error type for the relaxation core.
//!
//! The numeric core is total over finite input, so the only failures are
//! configuration mistakes and non-finite values at the ingestion boundary.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RelaxError {
    /// A parameter would lead to a division by zero or an impossible range.
    #[error("invalid configuration for `{field}`: {reason}")]
    InvalidConfiguration {
        field: &'static str,
        reason: String,
    },
    #[error("non-finite relaxation sample: {0}")]
    NonFiniteSample(f32),
    /// Delta times must be finite and non-negative.
    #[error("invalid delta time: {0}")]
    InvalidDeltaTime(f32),
}

impl RelaxError {
    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RelaxError>;
