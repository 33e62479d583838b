//! Fitted feature scaler
//!
//! Two linear per-feature transforms are supported:
//!
//! ```json
//! { "kind": "standard", "feature_names": [...], "mean": [...], "scale": [...] }
//! { "kind": "min_max",  "feature_names": [...], "min":  [...], "scale": [...] }
//! ```
//!
//! `standard` computes `(x - mean) / scale`, `min_max` computes `x * scale + min`.

use serde::{Deserialize, Serialize};

use super::check_feature_names;
use crate::features::{FeatureVector, ScaledFeatureVector, FEATURE_COUNT};

/// Per-feature linear transform fitted on the training set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scaler {
    /// Column order the scaler was fitted on
    pub feature_names: Vec<String>,

    #[serde(flatten)]
    pub transform: ScalerTransform,
}

/// Fitted parameters, one entry per feature in canonical order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalerTransform {
    Standard {
        mean: [f64; FEATURE_COUNT],
        scale: [f64; FEATURE_COUNT],
    },
    MinMax {
        min: [f64; FEATURE_COUNT],
        scale: [f64; FEATURE_COUNT],
    },
}

impl Scaler {
    /// Check the fitted parameters are usable; returns the reason otherwise
    pub fn validate(&self) -> Result<(), String> {
        check_feature_names(&self.feature_names)?;

        let (offsets, scale) = match &self.transform {
            ScalerTransform::Standard { mean, scale } => (mean, scale),
            ScalerTransform::MinMax { min, scale } => (min, scale),
        };

        for (i, (offset, factor)) in offsets.iter().zip(scale.iter()).enumerate() {
            if !offset.is_finite() || !factor.is_finite() {
                return Err(format!(
                    "non-finite scaler parameter for feature '{}'",
                    self.feature_names[i]
                ));
            }
        }

        if let ScalerTransform::Standard { scale, .. } = &self.transform {
            if let Some(i) = scale.iter().position(|s| *s == 0.0) {
                return Err(format!(
                    "zero scale for feature '{}'",
                    self.feature_names[i]
                ));
            }
        }

        Ok(())
    }

    /// Apply the fitted transform to every field, preserving order
    pub fn transform(&self, vector: &FeatureVector) -> ScaledFeatureVector {
        let x = vector.as_array();
        let mut out = [0.0; FEATURE_COUNT];

        match &self.transform {
            ScalerTransform::Standard { mean, scale } => {
                for i in 0..FEATURE_COUNT {
                    out[i] = (x[i] - mean[i]) / scale[i];
                }
            }
            ScalerTransform::MinMax { min, scale } => {
                for i in 0..FEATURE_COUNT {
                    out[i] = x[i] * scale[i] + min[i];
                }
            }
        }

        ScaledFeatureVector::from_array(out)
    }
}
