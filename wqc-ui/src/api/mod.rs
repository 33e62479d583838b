//! HTTP API handlers for wqc-ui

pub mod buildinfo;
pub mod health;
pub mod predict;
pub mod schema;
pub mod ui;

pub use buildinfo::get_build_info;
pub use health::health_routes;
pub use predict::{predict_json, submit_form};
pub use schema::{get_model_info, get_schema};
pub use ui::serve_index;
