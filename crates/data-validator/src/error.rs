//! Validation Error Types

use std::fmt;
use thiserror::Error;

/// Errors during domain validation of a single field
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    /// Value out of allowed range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Value must be non-negative
    #[error("{field} value {value} must be >= 0")]
    Negative { field: &'static str, value: f64 },

    /// Value not in the allowed enumeration
    #[error("{field} must be one of {allowed:?}, got {value:?}")]
    NotAllowed {
        field: &'static str,
        value: String,
        allowed: &'static [&'static str],
    },
}

/// Aggregate of every validation error found in one record
///
/// All failures are reported together so a caller can fix the whole request
/// in one round trip.
#[derive(Debug, Clone, Error)]
pub struct ValidationFailure {
    pub errors: Vec<ValidationError>,
}

impl ValidationFailure {
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", messages.join("; "))
    }
}
