//! Request Schema and Domain Validation
//!
//! Defines the accepted input shape for prediction requests and enforces
//! range and enumeration constraints before a record reaches the pipeline.

mod error;
mod record;
mod validator;

pub use error::{ValidationError, ValidationFailure};
pub use record::{CarRecord, FuelType, Transmission, ValidatedCar};
pub use validator::{ValidationConfig, Validator};
