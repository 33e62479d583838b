//! Prediction engine
//!
//! scale -> regress -> threshold. The continuous score is bucketed into
//! three ordinal classes with fixed cut points:
//!
//! | score               | class   |
//! |---------------------|---------|
//! | `< 0.75`            | Bad     |
//! | `>= 0.95`           | Good    |
//! | `[0.75, 0.95)`      | Regular |

use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::artifacts::ModelArtifacts;
use crate::features::{FeatureName, FeatureVector};
use crate::{Error, Result};

/// Scores below this are Bad
pub const BAD_BELOW: f64 = 0.75;

/// Scores at or above this are Good
pub const GOOD_FROM: f64 = 0.95;

/// Three-class quality verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum QualityClass {
    Bad,
    Regular,
    Good,
}

impl QualityClass {
    pub const ALL: [QualityClass; 3] = [QualityClass::Bad, QualityClass::Regular, QualityClass::Good];

    /// Bucket a continuous score. The Bad check runs first, then Good.
    pub fn from_score(score: f64) -> Self {
        if score < BAD_BELOW {
            QualityClass::Bad
        } else if score >= GOOD_FROM {
            QualityClass::Good
        } else {
            QualityClass::Regular
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            QualityClass::Bad => "Bad",
            QualityClass::Regular => "Regular",
            QualityClass::Good => "Good",
        }
    }

    /// Sensory quality points grouped into this class
    pub const fn description(self) -> &'static str {
        match self {
            QualityClass::Bad => "quality score 3, 4, 5",
            QualityClass::Regular => "quality score 6",
            QualityClass::Good => "quality score 7, 8, 9",
        }
    }

    /// 1-3 star rating glyph
    pub const fn stars(self) -> &'static str {
        match self {
            QualityClass::Bad => "★☆☆",
            QualityClass::Regular => "★★☆",
            QualityClass::Good => "★★★",
        }
    }

    /// Background color of the result block
    pub const fn color_hex(self) -> &'static str {
        match self {
            QualityClass::Bad => "#dc3545",
            QualityClass::Regular => "#ffbf00ca",
            QualityClass::Good => "#28a745",
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            QualityClass::Bad => {
                "Consider reviewing the composition. The model classifies this wine as Bad."
            }
            QualityClass::Regular => {
                "Intermediate quality. The model classifies this wine as Regular."
            }
            QualityClass::Good => "Excellent news! The model classifies this wine as Good.",
        }
    }
}

impl fmt::Display for QualityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of one submission
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub class: QualityClass,
    /// Raw regressor output before thresholding
    pub score: f64,
}

impl Prediction {
    /// Score formatted to 4 decimal places
    pub fn score_display(&self) -> String {
        format!("{:.4}", self.score)
    }
}

/// Run the full pipeline on one feature row
///
/// Errors are per-submission: the caller reports them and keeps serving.
pub fn predict(vector: &FeatureVector, artifacts: &ModelArtifacts) -> Result<Prediction> {
    let scaled = artifacts.scaler().transform(vector);
    if let Some(feature) = FeatureName::ALL
        .into_iter()
        .find(|feature| !scaled.get(*feature).is_finite())
    {
        return Err(Error::Prediction(format!(
            "scaling produced a non-finite value for '{}'",
            feature
        )));
    }

    let score = artifacts.regressor().predict(&scaled)?;
    if !score.is_finite() {
        return Err(Error::Prediction(format!(
            "regressor produced a non-finite score ({})",
            score
        )));
    }

    let class = QualityClass::from_score(score);
    debug!(class = class.label(), score, "Prediction complete");

    Ok(Prediction { class, score })
}
