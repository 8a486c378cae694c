//! Car Price Inference Pipeline
//!
//! Loads a pre-fitted transform-and-predict artifact once at startup and
//! exposes a single `predict` operation over it. The artifact embeds its own
//! preprocessing (feature derivation, encoding, scaling), so callers only
//! supply a one-row table keyed by the training-time column names.

mod artifact;
mod pipeline;
mod row;

pub use artifact::{CategoryEncoder, Coefficient, PipelineArtifact, Standardizer};
pub use pipeline::PricePipeline;
pub use row::{CellValue, PipelineRow};

use thiserror::Error;

/// Errors during artifact loading or inference
#[derive(Debug, Error)]
pub enum InferenceError {
    /// Artifact missing or unreadable at startup, fatal
    #[error("failed to load pipeline artifact from {path}: {reason}")]
    ArtifactLoad { path: String, reason: String },

    /// Input columns do not match the training-time schema
    #[error("column mismatch: pipeline expects {expected:?}, got {actual:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    /// A column held a value of the wrong type
    #[error("column {column:?} has incompatible type: expected {expected}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
    },

    /// Artifact-internal failure while computing the prediction
    #[error("inference failed: {0}")]
    InferenceFailed(String),
}
