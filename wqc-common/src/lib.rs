//! # WQC Common Library
//!
//! Core of the wine quality classifier shared by the WQC services:
//! - Feature schema and feature vector builder
//! - Form input metadata (ranges, defaults, step sizes)
//! - Model artifact loading (fitted scaler and regressor)
//! - Prediction engine (scale, regress, threshold)
//! - Configuration resolution

pub mod artifacts;
pub mod config;
pub mod error;
pub mod features;
pub mod inputs;
pub mod predict;

pub use artifacts::ModelArtifacts;
pub use error::{Error, Result};
pub use features::{FeatureName, FeatureVector, RawInputs, ScaledFeatureVector, WineType};
pub use predict::{predict, Prediction, QualityClass};
