//! Derived Column Computation

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Columns derived from a raw car record, matching the names the pipeline
/// was trained against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedFeatures {
    /// `Make_Model`: make and model joined by an underscore
    pub make_model: String,
    /// `Is_Automatic`: 1 if the transmission text contains "auto"
    pub is_automatic: u8,
    /// `Fuel_Type_Simple`: fuel type collapsed to the training-time top 3
    pub fuel_type_simple: String,
    /// `Car_Age`: reference year minus model year
    pub car_age: i32,
}

/// Pure feature deriver parameterized by the constants fixed at training
/// time.
#[derive(Debug)]
pub struct FeatureDeriver {
    reference_year: i32,
    top_fuel_types: Vec<String>,
}

impl FeatureDeriver {
    /// Create a deriver from training-time constants
    pub fn new(reference_year: i32, top_fuel_types: Vec<String>) -> Self {
        Self {
            reference_year,
            top_fuel_types,
        }
    }

    /// Reference year used for `Car_Age`
    pub fn reference_year(&self) -> i32 {
        self.reference_year
    }

    /// Compute the derived columns for a single record
    ///
    /// A missing transmission yields `is_automatic = 0` rather than an error,
    /// matching the training-time behavior for null values.
    pub fn derive(
        &self,
        make: &str,
        model: &str,
        year: i32,
        fuel_type: &str,
        transmission: Option<&str>,
    ) -> DerivedFeatures {
        let make_model = format!("{}_{}", make, model);

        let is_automatic = transmission
            .map(|t| t.to_lowercase().contains("auto"))
            .unwrap_or(false) as u8;

        let fuel_type_simple = if self.top_fuel_types.iter().any(|f| f == fuel_type) {
            fuel_type.to_string()
        } else {
            "Other".to_string()
        };

        let car_age = self.reference_year - year;

        debug!(
            make_model = %make_model,
            is_automatic,
            fuel_type_simple = %fuel_type_simple,
            car_age,
            "derived features"
        );

        DerivedFeatures {
            make_model,
            is_automatic,
            fuel_type_simple,
            car_age,
        }
    }
}
