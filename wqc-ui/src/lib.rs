//! wqc-ui library - Wine quality classifier web form
//!
//! Serves a single-page form for the eleven physico-chemical measurements
//! and runs the prediction pipeline once per explicit submission.

use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use wqc_common::config::ServerConfig;
use wqc_common::ModelArtifacts;

pub mod api;
pub mod render;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Model artifacts loaded at startup, read-only afterwards
    pub artifacts: Arc<ModelArtifacts>,
}

impl AppState {
    /// Create new application state
    pub fn new(artifacts: ModelArtifacts) -> Self {
        Self {
            artifacts: Arc::new(artifacts),
        }
    }
}

/// Load the model artifacts named by `config`
///
/// Any failure here is fatal for the process: no state exists to serve
/// predictions from.
pub fn initialize(config: &ServerConfig) -> wqc_common::Result<AppState> {
    let artifacts = ModelArtifacts::load(&config.model_dir)?;
    if let Some(metadata) = artifacts.metadata() {
        info!("Model: {}", metadata.name);
    }
    Ok(AppState::new(artifacts))
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/", get(api::serve_index))
        .route("/predict", post(api::submit_form))
        .route("/api/predict", post(api::predict_json))
        .route("/api/schema", get(api::get_schema))
        .route("/api/model", get(api::get_model_info))
        .route("/api/buildinfo", get(api::get_build_info))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
