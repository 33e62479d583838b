//! UI serving routes

use axum::{extract::State, response::Html};
use wqc_common::RawInputs;

use crate::render;
use crate::AppState;

/// GET /
///
/// Serves the form with default values. No prediction runs until the form
/// is submitted.
pub async fn serve_index(State(state): State<AppState>) -> Html<String> {
    Html(render::page(
        &RawInputs::default(),
        None,
        state.artifacts.metadata(),
    ))
}
