//! Error types.

use thiserror::Error;

/// Grid access errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WorldError {
    #[error("out of bounds, x, y = {x}, {y} (grid is {width}x{height})")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },
}

/// Problems loading or validating a [`crate::WorldConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse world config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("invalid world config: {field} {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: &'static str) -> Self {
        Self::Invalid { field, reason }
    }
}
