use thiserror::Error;

use crate::adjustment::Adjustment;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("expected {expected} bytes for {width}x{height} RGBA, got {actual}")]
    InvalidDimensions {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("{width}x{height} RGBA does not fit in memory")]
    TooLarge { width: u32, height: u32 },

    #[error("unknown adjustment: {0}")]
    UnknownAdjustment(String),

    #[error("{adjustment} has non-finite value {value}")]
    NonFiniteParameter { adjustment: Adjustment, value: f32 },

    #[error("{adjustment} transform failed: {reason}")]
    Transform {
        adjustment: Adjustment,
        reason: String,
    },

    #[error("{adjustment} returned {actual} bytes, expected {expected}")]
    MalformedOutput {
        adjustment: Adjustment,
        expected: usize,
        actual: usize,
    },

    #[error("histogram failed: {0}")]
    Histogram(String),
}

impl Error {
    /// True for failures raised by a transform stage, as opposed to bad input.
    pub fn is_transform_failure(&self) -> bool {
        matches!(self, Self::Transform { .. } | Self::MalformedOutput { .. })
    }
}
