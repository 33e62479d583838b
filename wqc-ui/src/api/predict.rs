//! Prediction submission handlers
//!
//! Both handlers clamp the submitted values into their form ranges, build
//! the feature vector and run the pipeline exactly once. Pipeline errors
//! are reported to the caller; the service keeps running.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};
use wqc_common::features::build;
use wqc_common::{predict, FeatureName, FeatureVector, Prediction, QualityClass, RawInputs, WineType};

use crate::render::{self, Outcome};
use crate::AppState;

/// One feature of the vector sent to the model
#[derive(Debug, Serialize)]
pub struct NamedFeature {
    pub name: FeatureName,
    pub value: f64,
}

/// JSON prediction response
#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub class: QualityClass,
    pub label: String,
    pub description: String,
    pub stars: String,
    pub color: String,
    pub message: String,
    pub score: f64,
    pub score_display: String,
    pub wine_type: WineType,
    /// Feature vector in model column order
    pub features: Vec<NamedFeature>,
}

impl PredictionResponse {
    fn new(prediction: &Prediction, inputs: &RawInputs, vector: &FeatureVector) -> Self {
        let class = prediction.class;
        Self {
            class,
            label: class.label().to_string(),
            description: class.description().to_string(),
            stars: class.stars().to_string(),
            color: class.color_hex().to_string(),
            message: class.message().to_string(),
            score: prediction.score,
            score_display: prediction.score_display(),
            wine_type: inputs.wine_type,
            features: vector
                .iter_named()
                .map(|(name, value)| NamedFeature { name, value })
                .collect(),
        }
    }
}

/// Prediction API errors
#[derive(Debug)]
pub enum PredictError {
    PipelineFailed(String),
}

impl IntoResponse for PredictError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            PredictError::PipelineFailed(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

/// Clamp, build and predict for one submission
fn run_pipeline(
    state: &AppState,
    raw: RawInputs,
) -> (RawInputs, FeatureVector, wqc_common::Result<Prediction>) {
    let inputs = raw.clamped();
    if inputs != raw {
        info!("Submitted values clamped into form ranges");
    }

    let vector = build(&inputs);
    let result = predict(&vector, &state.artifacts);

    match &result {
        Ok(prediction) => info!(
            "Prediction: {} (score {}, wine type {})",
            prediction.class,
            prediction.score_display(),
            inputs.wine_type
        ),
        Err(e) => warn!("Prediction failed: {}", e),
    }

    (inputs, vector, result)
}

/// POST /predict
///
/// Form submission from the page. Re-renders the page with the submitted
/// values and either the result block or an inline error.
pub async fn submit_form(
    State(state): State<AppState>,
    Form(raw): Form<RawInputs>,
) -> Html<String> {
    let (inputs, _, result) = run_pipeline(&state, raw);

    let outcome = match result {
        Ok(prediction) => Outcome::Success(prediction),
        Err(e) => Outcome::Failure(e.to_string()),
    };

    Html(render::page(
        &inputs,
        Some(&outcome),
        state.artifacts.metadata(),
    ))
}

/// POST /api/predict
///
/// JSON body with any subset of the form fields; missing fields take the
/// form defaults.
pub async fn predict_json(
    State(state): State<AppState>,
    Json(raw): Json<RawInputs>,
) -> Result<Json<PredictionResponse>, PredictError> {
    let (inputs, vector, result) = run_pipeline(&state, raw);
    let prediction = result.map_err(|e| PredictError::PipelineFailed(e.to_string()))?;

    Ok(Json(PredictionResponse::new(&prediction, &inputs, &vector)))
}
