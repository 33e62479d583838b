//! Integration tests for artifact loading
//!
//! Tests cover:
//! - Missing artifact files fail with ArtifactNotFound naming the artifact
//! - Unparseable or invalid artifacts fail with ArtifactCorrupt
//! - Feature order mismatches are rejected at load time
//! - The shipped demo artifacts load cleanly

use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wqc_common::artifacts::{load_regressor, load_scaler, REGRESSOR_FILE, SCALER_FILE};
use wqc_common::features::FEATURE_NAMES;
use wqc_common::{Error, ModelArtifacts};

fn scaler_json() -> Value {
    let mean = [0.0; 12];
    let scale = [1.0; 12];
    json!({
        "kind": "standard",
        "feature_names": FEATURE_NAMES,
        "mean": mean,
        "scale": scale,
    })
}

fn regressor_json() -> Value {
    json!({
        "kind": "adaboost",
        "feature_names": FEATURE_NAMES,
        "metadata": { "name": "test ensemble", "accuracy": 0.73, "f1_weighted": 0.73 },
        "estimators": [
            {
                "weight": 1.0,
                "nodes": [
                    { "type": "split", "feature": 10, "threshold": 0.0, "left": 1, "right": 2 },
                    { "type": "leaf", "value": 0.5 },
                    { "type": "leaf", "value": 1.0 }
                ]
            }
        ]
    })
}

fn write_json(dir: &Path, file: &str, value: &Value) -> PathBuf {
    let path = dir.join(file);
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

fn demo_model_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../models")
}

#[test]
fn test_load_valid_artifacts() {
    let dir = TempDir::new().unwrap();
    write_json(dir.path(), SCALER_FILE, &scaler_json());
    write_json(dir.path(), REGRESSOR_FILE, &regressor_json());

    let artifacts = ModelArtifacts::load(dir.path()).expect("artifacts should load");
    let metadata = artifacts.metadata().expect("metadata present");
    assert_eq!(metadata.name, "test ensemble");
    assert_eq!(metadata.accuracy, Some(0.73));
}

#[test]
fn test_missing_regressor_is_not_found() {
    let dir = TempDir::new().unwrap();
    write_json(dir.path(), SCALER_FILE, &scaler_json());

    let err = ModelArtifacts::load(dir.path()).unwrap_err();
    match &err {
        Error::ArtifactNotFound { artifact, path } => {
            assert_eq!(artifact, "regressor");
            assert!(path.ends_with(REGRESSOR_FILE));
        }
        other => panic!("expected ArtifactNotFound, got {:?}", other),
    }
    assert!(err.to_string().contains(REGRESSOR_FILE));
}

#[test]
fn test_missing_scaler_is_not_found() {
    let dir = TempDir::new().unwrap();
    write_json(dir.path(), REGRESSOR_FILE, &regressor_json());

    let err = ModelArtifacts::load(dir.path()).unwrap_err();
    assert!(matches!(err, Error::ArtifactNotFound { .. }));
    assert_eq!(err.artifact(), Some("scaler"));
}

#[test]
fn test_garbage_scaler_is_corrupt() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(SCALER_FILE);
    fs::write(&path, b"\x80\x04\x95 not json").unwrap();

    let err = load_scaler(&path).unwrap_err();
    assert!(matches!(err, Error::ArtifactCorrupt { .. }), "got {:?}", err);
}

#[test]
fn test_unknown_regressor_kind_is_corrupt() {
    let dir = TempDir::new().unwrap();
    let mut value = regressor_json();
    value["kind"] = json!("random_forest");
    let path = write_json(dir.path(), REGRESSOR_FILE, &value);

    let err = load_regressor(&path).unwrap_err();
    assert!(matches!(err, Error::ArtifactCorrupt { .. }), "got {:?}", err);
}

#[test]
fn test_reordered_feature_names_rejected() {
    let dir = TempDir::new().unwrap();
    let mut names: Vec<&str> = FEATURE_NAMES.to_vec();
    names.swap(7, 8);
    let mut value = scaler_json();
    value["feature_names"] = json!(names);
    let path = write_json(dir.path(), SCALER_FILE, &value);

    match load_scaler(&path).unwrap_err() {
        Error::ArtifactCorrupt { artifact, reason, .. } => {
            assert_eq!(artifact, "scaler");
            assert_eq!(reason, "feature 7 is 'pH', expected 'density'");
        }
        other => panic!("expected ArtifactCorrupt, got {:?}", other),
    }
}

#[test]
fn test_cyclic_tree_rejected() {
    let dir = TempDir::new().unwrap();
    let mut value = regressor_json();
    value["estimators"][0]["nodes"][0]["right"] = json!(0);
    let path = write_json(dir.path(), REGRESSOR_FILE, &value);

    let err = load_regressor(&path).unwrap_err();
    assert!(err.to_string().contains("invalid child index 0"), "got {}", err);
}

#[test]
fn test_demo_artifacts_load() {
    let artifacts = ModelArtifacts::load(&demo_model_dir()).expect("demo artifacts should load");
    assert!(artifacts.metadata().is_some());
}
