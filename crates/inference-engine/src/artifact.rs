//! Serialized Pipeline Artifact Format
//!
//! The artifact is produced by the training job and never written by this
//! service. It carries the full preprocessing state alongside the fitted
//! regression so inference stays byte-for-byte consistent with training.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standardization parameters for one numeric feature
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Standardizer {
    pub mean: f64,
    pub std_dev: f64,
}

impl Standardizer {
    pub fn apply(&self, value: f64) -> f64 {
        if self.std_dev == 0.0 {
            0.0
        } else {
            (value - self.mean) / self.std_dev
        }
    }
}

/// Fitted category encoding for one categorical feature
///
/// Categories unseen at training time fall back to `default`, matching the
/// training job's handling of rare levels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryEncoder {
    pub mapping: HashMap<String, f64>,
    pub default: f64,
}

impl CategoryEncoder {
    pub fn encode(&self, category: &str) -> f64 {
        self.mapping.get(category).copied().unwrap_or(self.default)
    }
}

/// One term of the fitted linear model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coefficient {
    /// Derived feature name this weight applies to
    pub feature: String,
    pub weight: f64,
}

/// The complete serialized pipeline: preprocessing state plus fitted model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineArtifact {
    /// Training-time input column names, in order
    pub schema: Vec<String>,
    /// Reference year for the `Car_Age` derived column
    pub reference_year: i32,
    /// The 3 most frequent fuel types in the training distribution
    pub top_fuel_types: Vec<String>,
    /// Category encoders keyed by derived feature name
    pub encoders: HashMap<String, CategoryEncoder>,
    /// Standardizers keyed by numeric feature name
    pub scalers: HashMap<String, Standardizer>,
    /// Fitted regression terms
    pub coefficients: Vec<Coefficient>,
    pub intercept: f64,
}

impl PipelineArtifact {
    /// A small fitted artifact for tests and mock-pipeline injection
    pub fn demo() -> Self {
        let mut encoders = HashMap::new();
        encoders.insert(
            "Make_Model".to_string(),
            CategoryEncoder {
                mapping: HashMap::from([
                    ("Toyota_Corolla".to_string(), 1.12),
                    ("Ford_Focus".to_string(), 0.94),
                    ("BMW_320d".to_string(), 1.48),
                ]),
                default: 1.0,
            },
        );
        encoders.insert(
            "Fuel_Type_Simple".to_string(),
            CategoryEncoder {
                mapping: HashMap::from([
                    ("Petrol".to_string(), 1.05),
                    ("Diesel".to_string(), 1.10),
                    ("Hybrid".to_string(), 1.30),
                    ("Other".to_string(), 0.90),
                ]),
                default: 0.90,
            },
        );

        let mut scalers = HashMap::new();
        scalers.insert(
            "Engine Size".to_string(),
            Standardizer {
                mean: 2.0,
                std_dev: 1.0,
            },
        );
        scalers.insert(
            "Mileage".to_string(),
            Standardizer {
                mean: 60_000.0,
                std_dev: 40_000.0,
            },
        );
        scalers.insert(
            "Car_Age".to_string(),
            Standardizer {
                mean: 8.0,
                std_dev: 5.0,
            },
        );

        Self {
            schema: vec![
                "Make".to_string(),
                "Model".to_string(),
                "Year".to_string(),
                "Engine Size".to_string(),
                "Mileage".to_string(),
                "Fuel Type".to_string(),
                "Transmission".to_string(),
            ],
            reference_year: 2025,
            top_fuel_types: vec![
                "Petrol".to_string(),
                "Diesel".to_string(),
                "Hybrid".to_string(),
            ],
            encoders,
            scalers,
            coefficients: vec![
                Coefficient {
                    feature: "Engine Size".to_string(),
                    weight: 2600.0,
                },
                Coefficient {
                    feature: "Mileage".to_string(),
                    weight: -3100.0,
                },
                Coefficient {
                    feature: "Car_Age".to_string(),
                    weight: -2400.0,
                },
                Coefficient {
                    feature: "Is_Automatic".to_string(),
                    weight: 450.0,
                },
                Coefficient {
                    feature: "Make_Model".to_string(),
                    weight: 5200.0,
                },
                Coefficient {
                    feature: "Fuel_Type_Simple".to_string(),
                    weight: 900.0,
                },
            ],
            intercept: 16_500.0,
        }
    }
}
