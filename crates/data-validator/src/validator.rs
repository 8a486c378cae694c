//! Domain Validator for Prediction Requests

use crate::error::{ValidationError, ValidationFailure};
use crate::record::{CarRecord, FuelType, Transmission, ValidatedCar};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Model year valid range
    pub year_range: (i32, i32),
    /// Engine size valid range (liters)
    pub engine_size_range: (f64, f64),
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            year_range: (1980, 2025),
            engine_size_range: (0.5, 10.0),
        }
    }
}

/// Validator for car prediction requests
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a record, collecting every failure
    ///
    /// Nothing is coerced or defaulted; a record either passes all checks
    /// or every violation is returned in one `ValidationFailure`.
    pub fn validate(&self, record: &CarRecord) -> Result<ValidatedCar, ValidationFailure> {
        let mut errors = Vec::new();

        let (year_min, year_max) = self.config.year_range;
        if record.year < year_min || record.year > year_max {
            errors.push(ValidationError::OutOfRange {
                field: "Year",
                value: record.year as f64,
                min: year_min as f64,
                max: year_max as f64,
            });
        }

        let (engine_min, engine_max) = self.config.engine_size_range;
        if record.engine_size < engine_min || record.engine_size > engine_max {
            errors.push(ValidationError::OutOfRange {
                field: "Engine_Size",
                value: record.engine_size,
                min: engine_min,
                max: engine_max,
            });
        }

        if record.mileage < 0.0 {
            errors.push(ValidationError::Negative {
                field: "Mileage",
                value: record.mileage,
            });
        }

        let fuel_type = match FuelType::parse(&record.fuel_type) {
            Ok(f) => Some(f),
            Err(e) => {
                errors.push(e);
                None
            }
        };

        let transmission = match Transmission::parse(&record.transmission) {
            Ok(t) => Some(t),
            Err(e) => {
                errors.push(e);
                None
            }
        };

        match (fuel_type, transmission) {
            (Some(fuel_type), Some(transmission)) if errors.is_empty() => Ok(ValidatedCar {
                make: record.make.clone(),
                model: record.model.clone(),
                year: record.year,
                engine_size: record.engine_size,
                mileage: record.mileage,
                fuel_type,
                transmission,
            }),
            _ => {
                debug!(count = errors.len(), "record failed validation");
                Err(ValidationFailure::new(errors))
            }
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}
