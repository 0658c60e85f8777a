use std::fmt::{self, Display};

/// Errors produced by placement normalization and range validation.
#[derive(Debug, Clone, PartialEq)]
pub enum PlacementError {
    /// Canvas width or height was zero or negative, so pixel coordinates
    /// cannot be expressed as a fraction of it.
    InvalidCanvas { width: f64, height: f64 },
    /// A percentage coordinate fell outside `[0, 100]`. Out-of-range
    /// values are rejected rather than clamped.
    OutOfRange { field: &'static str, value: f64 },
    /// A coordinate was NaN or infinite.
    NotFinite { field: &'static str },
}

impl Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::InvalidCanvas { width, height } => {
                write!(f, "canvas dimensions must be positive, got {width}x{height}")
            }
            PlacementError::OutOfRange { field, value } => {
                write!(f, "{field} must be within 0..=100 percent, got {value}")
            }
            PlacementError::NotFinite { field } => {
                write!(f, "{field} must be a finite number")
            }
        }
    }
}

impl std::error::Error for PlacementError {}

pub type Result<T> = std::result::Result<T, PlacementError>;
