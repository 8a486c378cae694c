//! Prediction Route

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};

use crate::error::ApiError;
use crate::AppState;
use data_validator::{CarRecord, ValidatedCar};
use inference_engine::{CellValue, PipelineRow};

/// Response for a successful prediction
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub predicted_price: f64,
}

/// Handle `POST /predict` (and its versioned mount)
///
/// Validation errors are collected and reported together; the record only
/// reaches the pipeline once every field is in-domain.
pub async fn predict_price(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CarRecord>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let Json(record) = body?;
    let car = state.validator.validate(&record)?;

    let row = pipeline_row(&car);
    let price = state.pipeline.predict(&row).map_err(|e| {
        error!(error = %e, "prediction failed");
        e
    })?;

    let predicted_price = (price * 100.0).round() / 100.0;
    info!(
        make = %car.make,
        model = %car.model,
        predicted_price,
        "prediction successful"
    );

    Ok(Json(PredictResponse { predicted_price }))
}

/// Rename API fields to the training-time column names
///
/// "Engine Size" and "Fuel Type" are spelled with a space here; the
/// pipeline rejects the row outright if any name deviates.
fn pipeline_row(car: &ValidatedCar) -> PipelineRow {
    PipelineRow::new()
        .push("Make", CellValue::Text(car.make.clone()))
        .push("Model", CellValue::Text(car.model.clone()))
        .push("Year", CellValue::Int(car.year as i64))
        .push("Engine Size", CellValue::Float(car.engine_size))
        .push("Mileage", CellValue::Float(car.mileage))
        .push("Fuel Type", CellValue::Text(car.fuel_type.as_str().to_string()))
        .push(
            "Transmission",
            CellValue::Text(car.transmission.as_str().to_string()),
        )
}
