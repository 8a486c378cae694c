//! Feature Engineering Engine
//!
//! Derived-column computation for car price inference. The deriver must stay
//! consistent with the preprocessing used when the pipeline artifact was
//! fitted, so the training-time constants (reference year, top fuel types)
//! are passed in by the caller rather than hardcoded here.

mod features;

pub use features::{DerivedFeatures, FeatureDeriver};
