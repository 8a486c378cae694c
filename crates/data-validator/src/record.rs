//! Input Record Types

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Raw prediction request body
///
/// Field keys match the public API exactly, underscores included. Enum
/// fields stay as text here so domain validation can report every bad
/// field in one pass instead of failing at deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarRecord {
    #[serde(rename = "Make")]
    pub make: String,
    #[serde(rename = "Model")]
    pub model: String,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Engine_Size")]
    pub engine_size: f64,
    #[serde(rename = "Mileage")]
    pub mileage: f64,
    #[serde(rename = "Fuel_Type")]
    pub fuel_type: String,
    #[serde(rename = "Transmission")]
    pub transmission: String,
}

/// Fuel types accepted by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FuelType {
    Petrol,
    Diesel,
    Hybrid,
    Electric,
}

impl FuelType {
    pub const ALLOWED: &'static [&'static str] = &["Petrol", "Diesel", "Hybrid", "Electric"];

    pub fn as_str(&self) -> &'static str {
        match self {
            FuelType::Petrol => "Petrol",
            FuelType::Diesel => "Diesel",
            FuelType::Hybrid => "Hybrid",
            FuelType::Electric => "Electric",
        }
    }

    /// Parse the exact canonical spelling, no coercion
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value {
            "Petrol" => Ok(FuelType::Petrol),
            "Diesel" => Ok(FuelType::Diesel),
            "Hybrid" => Ok(FuelType::Hybrid),
            "Electric" => Ok(FuelType::Electric),
            other => Err(ValidationError::NotAllowed {
                field: "Fuel_Type",
                value: other.to_string(),
                allowed: Self::ALLOWED,
            }),
        }
    }
}

/// Transmission types accepted by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transmission {
    Manual,
    Automatic,
}

impl Transmission {
    pub const ALLOWED: &'static [&'static str] = &["Manual", "Automatic"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Transmission::Manual => "Manual",
            Transmission::Automatic => "Automatic",
        }
    }

    /// Parse the exact canonical spelling, no coercion
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value {
            "Manual" => Ok(Transmission::Manual),
            "Automatic" => Ok(Transmission::Automatic),
            other => Err(ValidationError::NotAllowed {
                field: "Transmission",
                value: other.to_string(),
                allowed: Self::ALLOWED,
            }),
        }
    }
}

/// A record that has passed every domain check
#[derive(Debug, Clone)]
pub struct ValidatedCar {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub engine_size: f64,
    pub mileage: f64,
    pub fuel_type: FuelType,
    pub transmission: Transmission,
}
