//! Fitted quality regressor
//!
//! Supported representations:
//! - `adaboost`: boosted ensemble of regression trees. The ensemble output is
//!   the weighted median of the per-tree predictions.
//! - `linear`: `intercept + coefficients . x`.
//!
//! Trees are stored as flat node arrays rooted at index 0. A split sends the
//! sample left when `x[feature] <= threshold`. Child indices are always
//! greater than their parent index, so evaluation terminates.

use serde::{Deserialize, Serialize};

use super::check_feature_names;
use crate::features::{ScaledFeatureVector, FEATURE_COUNT};
use crate::{Error, Result};

/// Regressor producing the continuous quality score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Regressor {
    /// Column order the regressor was fitted on
    pub feature_names: Vec<String>,

    /// Descriptive information shown alongside predictions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ModelMetadata>,

    #[serde(flatten)]
    pub model: RegressorModel,
}

/// Descriptive information about the trained model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub name: String,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub accuracy: Option<f64>,
    #[serde(default)]
    pub f1_weighted: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegressorModel {
    #[serde(rename = "adaboost")]
    AdaBoost { estimators: Vec<WeightedTree> },
    Linear {
        coefficients: [f64; FEATURE_COUNT],
        intercept: f64,
    },
}

/// One boosting stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedTree {
    pub weight: f64,
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

impl WeightedTree {
    fn validate(&self, stage: usize) -> std::result::Result<(), String> {
        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(format!("estimator {}: invalid weight {}", stage, self.weight));
        }
        if self.nodes.is_empty() {
            return Err(format!("estimator {}: empty tree", stage));
        }

        for (idx, node) in self.nodes.iter().enumerate() {
            match *node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= FEATURE_COUNT {
                        return Err(format!(
                            "estimator {} node {}: feature index {} out of range",
                            stage, idx, feature
                        ));
                    }
                    if !threshold.is_finite() {
                        return Err(format!(
                            "estimator {} node {}: non-finite threshold",
                            stage, idx
                        ));
                    }
                    for child in [left, right] {
                        if child <= idx || child >= self.nodes.len() {
                            return Err(format!(
                                "estimator {} node {}: invalid child index {}",
                                stage, idx, child
                            ));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(format!(
                            "estimator {} node {}: non-finite leaf value",
                            stage, idx
                        ));
                    }
                }
            }
        }

        Ok(())
    }

    /// Walk the tree from the root to a leaf
    pub fn predict(&self, x: &[f64; FEATURE_COUNT]) -> Result<f64> {
        let mut idx = 0;
        loop {
            match self.nodes.get(idx) {
                Some(TreeNode::Leaf { value }) => return Ok(*value),
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = x.get(*feature).ok_or_else(|| {
                        Error::Prediction(format!("feature index {} out of range", feature))
                    })?;
                    let next = if *value <= *threshold { *left } else { *right };
                    if next <= idx {
                        return Err(Error::Prediction(format!(
                            "tree node {} points backwards to {}",
                            idx, next
                        )));
                    }
                    idx = next;
                }
                None => {
                    return Err(Error::Prediction(format!("tree node {} missing", idx)));
                }
            }
        }
    }
}

impl Regressor {
    /// Check the fitted model is usable; returns the reason otherwise
    pub fn validate(&self) -> std::result::Result<(), String> {
        check_feature_names(&self.feature_names)?;

        match &self.model {
            RegressorModel::AdaBoost { estimators } => {
                if estimators.is_empty() {
                    return Err("ensemble has no estimators".to_string());
                }
                for (stage, tree) in estimators.iter().enumerate() {
                    tree.validate(stage)?;
                }
                let total: f64 = estimators.iter().map(|t| t.weight).sum();
                if total <= 0.0 {
                    return Err("estimator weights sum to zero".to_string());
                }
            }
            RegressorModel::Linear {
                coefficients,
                intercept,
            } => {
                if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
                    return Err("non-finite linear coefficient".to_string());
                }
            }
        }

        Ok(())
    }

    /// Continuous score for one scaled feature row
    pub fn predict(&self, scaled: &ScaledFeatureVector) -> Result<f64> {
        let x = scaled.as_array();

        match &self.model {
            RegressorModel::AdaBoost { estimators } => {
                let mut stages = estimators
                    .iter()
                    .map(|tree| -> Result<(f64, f64)> { Ok((tree.predict(x)?, tree.weight)) })
                    .collect::<Result<Vec<(f64, f64)>>>()?;
                weighted_median(&mut stages)
                    .ok_or_else(|| Error::Prediction("empty ensemble".to_string()))
            }
            RegressorModel::Linear {
                coefficients,
                intercept,
            } => Ok(intercept
                + coefficients
                    .iter()
                    .zip(x.iter())
                    .map(|(c, v)| c * v)
                    .sum::<f64>()),
        }
    }
}

/// Smallest prediction whose cumulative weight reaches half the total weight
fn weighted_median(stages: &mut [(f64, f64)]) -> Option<f64> {
    stages.sort_by(|a, b| a.0.total_cmp(&b.0));

    let total: f64 = stages.iter().map(|(_, w)| w).sum();
    let half = 0.5 * total;

    let mut cumulative = 0.0;
    for (prediction, weight) in stages.iter() {
        cumulative += weight;
        if cumulative >= half {
            return Some(*prediction);
        }
    }
    stages.last().map(|(p, _)| *p)
}
