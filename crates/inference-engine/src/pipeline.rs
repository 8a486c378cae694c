//! Pipeline Loading and Prediction

use crate::artifact::PipelineArtifact;
use crate::row::PipelineRow;
use crate::InferenceError;
use feature_engine::FeatureDeriver;
use std::path::Path;
use tracing::{debug, info};

/// Value of a derived feature before the fitted weights are applied
enum FeatureValue {
    Number(f64),
    Category(String),
}

/// A loaded, read-only price prediction pipeline
///
/// Constructed once at process start and shared across all requests; no
/// interior mutability, so concurrent predicts need no locking.
#[derive(Debug)]
pub struct PricePipeline {
    artifact: PipelineArtifact,
    deriver: FeatureDeriver,
}

impl PricePipeline {
    /// Load the artifact from disk
    ///
    /// Absence or corruption of the artifact is a fatal startup error; the
    /// service must not accept traffic without a loaded pipeline.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InferenceError> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading pipeline artifact");

        let raw = std::fs::read_to_string(path).map_err(|e| InferenceError::ArtifactLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let artifact: PipelineArtifact =
            serde_json::from_str(&raw).map_err(|e| InferenceError::ArtifactLoad {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self::from_artifact(artifact))
    }

    /// Build a pipeline from an already-deserialized artifact
    pub fn from_artifact(artifact: PipelineArtifact) -> Self {
        let deriver = FeatureDeriver::new(artifact.reference_year, artifact.top_fuel_types.clone());
        Self { artifact, deriver }
    }

    /// A pipeline over the demo artifact, for tests and mock injection
    pub fn demo() -> Self {
        Self::from_artifact(PipelineArtifact::demo())
    }

    /// Training-time input schema
    pub fn schema(&self) -> &[String] {
        &self.artifact.schema
    }

    /// Predict the price for a one-row input table
    ///
    /// The row's column names must equal the training schema exactly. Any
    /// mismatch fails before a single value is read.
    pub fn predict(&self, row: &PipelineRow) -> Result<f64, InferenceError> {
        let actual = row.column_names();
        if actual != self.artifact.schema {
            return Err(InferenceError::SchemaMismatch {
                expected: self.artifact.schema.clone(),
                actual,
            });
        }

        let make = row.text("Make")?;
        let model = row.text("Model")?;
        let year = row.int("Year")? as i32;
        let engine_size = row.number("Engine Size")?;
        let mileage = row.number("Mileage")?;
        let fuel_type = row.text("Fuel Type")?;
        let transmission = row.text("Transmission")?;

        let derived = self
            .deriver
            .derive(make, model, year, fuel_type, Some(transmission));

        let feature_value = |name: &str| -> Result<FeatureValue, InferenceError> {
            match name {
                "Engine Size" => Ok(FeatureValue::Number(engine_size)),
                "Mileage" => Ok(FeatureValue::Number(mileage)),
                "Year" => Ok(FeatureValue::Number(year as f64)),
                "Car_Age" => Ok(FeatureValue::Number(derived.car_age as f64)),
                "Is_Automatic" => Ok(FeatureValue::Number(derived.is_automatic as f64)),
                "Make_Model" => Ok(FeatureValue::Category(derived.make_model.clone())),
                "Fuel_Type_Simple" => {
                    Ok(FeatureValue::Category(derived.fuel_type_simple.clone()))
                }
                "Transmission" => Ok(FeatureValue::Category(transmission.to_string())),
                other => Err(InferenceError::InferenceFailed(format!(
                    "artifact references unknown feature {:?}",
                    other
                ))),
            }
        };

        let mut prediction = self.artifact.intercept;
        for term in &self.artifact.coefficients {
            let value = match feature_value(&term.feature)? {
                FeatureValue::Number(v) => match self.artifact.scalers.get(&term.feature) {
                    Some(scaler) => scaler.apply(v),
                    None => v,
                },
                FeatureValue::Category(category) => self
                    .artifact
                    .encoders
                    .get(&term.feature)
                    .ok_or_else(|| {
                        InferenceError::InferenceFailed(format!(
                            "no encoder for categorical feature {:?}",
                            term.feature
                        ))
                    })?
                    .encode(&category),
            };
            prediction += term.weight * value;
        }

        if !prediction.is_finite() {
            return Err(InferenceError::InferenceFailed(
                "prediction is not a finite number".to_string(),
            ));
        }

        debug!(prediction, "pipeline predict complete");
        Ok(prediction)
    }
}
