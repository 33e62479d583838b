//! Schema and model information endpoints
//!
//! Expose the feature order, form input ranges and the loaded model's
//! description so clients can build their own forms.

use axum::{extract::State, Json};
use serde::Serialize;
use wqc_common::artifacts::{RegressorModel, ScalerTransform};
use wqc_common::features::FEATURE_NAMES;
use wqc_common::inputs::{InputSpec, INPUT_SPECS, WINE_TYPE_CHOICES};
use wqc_common::predict::{BAD_BELOW, GOOD_FROM};
use wqc_common::{QualityClass, WineType};

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct WineTypeChoice {
    pub wine_type: WineType,
    pub type_white: f64,
}

/// Feature schema response
#[derive(Debug, Serialize)]
pub struct SchemaResponse {
    /// Column order the model was fitted on
    pub feature_order: Vec<&'static str>,
    pub inputs: Vec<InputSpec>,
    pub wine_types: Vec<WineTypeChoice>,
}

/// GET /api/schema
pub async fn get_schema() -> Json<SchemaResponse> {
    Json(SchemaResponse {
        feature_order: FEATURE_NAMES.to_vec(),
        inputs: INPUT_SPECS.to_vec(),
        wine_types: WINE_TYPE_CHOICES
            .iter()
            .map(|&wine_type| WineTypeChoice {
                wine_type,
                type_white: wine_type.type_white(),
            })
            .collect(),
    })
}

#[derive(Debug, Serialize)]
pub struct ClassDefinition {
    pub class: QualityClass,
    pub description: &'static str,
    pub stars: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Thresholds {
    pub bad_below: f64,
    pub good_from: f64,
}

/// Model information response
#[derive(Debug, Serialize)]
pub struct ModelInfoResponse {
    pub name: Option<String>,
    pub target: Option<String>,
    pub accuracy: Option<f64>,
    pub f1_weighted: Option<f64>,
    pub scaler: &'static str,
    pub regressor: &'static str,
    /// Number of boosting stages, 0 for non-ensemble regressors
    pub estimators: usize,
    pub thresholds: Thresholds,
    pub classes: Vec<ClassDefinition>,
}

/// GET /api/model
pub async fn get_model_info(State(state): State<AppState>) -> Json<ModelInfoResponse> {
    let artifacts = &state.artifacts;
    let metadata = artifacts.metadata();

    let scaler = match artifacts.scaler().transform {
        ScalerTransform::Standard { .. } => "standard",
        ScalerTransform::MinMax { .. } => "min_max",
    };
    let (regressor, estimators) = match &artifacts.regressor().model {
        RegressorModel::AdaBoost { estimators } => ("adaboost", estimators.len()),
        RegressorModel::Linear { .. } => ("linear", 0),
    };

    Json(ModelInfoResponse {
        name: metadata.map(|m| m.name.clone()),
        target: metadata.and_then(|m| m.target.clone()),
        accuracy: metadata.and_then(|m| m.accuracy),
        f1_weighted: metadata.and_then(|m| m.f1_weighted),
        scaler,
        regressor,
        estimators,
        thresholds: Thresholds {
            bad_below: BAD_BELOW,
            good_from: GOOD_FROM,
        },
        classes: QualityClass::ALL
            .iter()
            .map(|&class| ClassDefinition {
                class,
                description: class.description(),
                stars: class.stars(),
                color: class.color_hex(),
            })
            .collect(),
    })
}
