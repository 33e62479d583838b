//! End-to-end tests for the prediction pipeline
//!
//! Tests cover:
//! - Default inputs build the canonical 12-value vector
//! - Wine type selection drives the type_white indicator
//! - Feature order is load-bearing for the scaled vector
//! - Threshold bucketing at the class boundaries
//! - Determinism of repeated predictions

use wqc_common::artifacts::{Regressor, RegressorModel, Scaler, ScalerTransform};
use wqc_common::features::{build, FeatureName, FEATURE_NAMES};
use wqc_common::{predict, Error, FeatureVector, ModelArtifacts, QualityClass, RawInputs, WineType};

fn names() -> Vec<String> {
    FEATURE_NAMES.iter().map(|s| s.to_string()).collect()
}

/// Scaler with distinct parameters per feature
fn uneven_scaler() -> Scaler {
    let mut mean = [0.0; 12];
    let mut scale = [1.0; 12];
    for i in 0..12 {
        mean[i] = i as f64 * 0.5;
        scale[i] = 1.0 + i as f64;
    }
    Scaler {
        feature_names: names(),
        transform: ScalerTransform::Standard { mean, scale },
    }
}

/// Linear regressor whose score is `intercept + x[TypeWhite]` after scaling
fn linear_regressor(intercept: f64) -> Regressor {
    let mut coefficients = [0.0; 12];
    coefficients[FeatureName::TypeWhite.index()] = 1.0;
    Regressor {
        feature_names: names(),
        metadata: None,
        model: RegressorModel::Linear {
            coefficients,
            intercept,
        },
    }
}

/// Identity scaler and constant regressor: the score is exactly `score`
fn constant_artifacts(score: f64) -> ModelArtifacts {
    let scaler = Scaler {
        feature_names: names(),
        transform: ScalerTransform::Standard {
            mean: [0.0; 12],
            scale: [1.0; 12],
        },
    };
    let regressor = Regressor {
        feature_names: names(),
        metadata: None,
        model: RegressorModel::Linear {
            coefficients: [0.0; 12],
            intercept: score,
        },
    };
    ModelArtifacts::new(scaler, regressor).unwrap()
}

fn demo_artifacts() -> ModelArtifacts {
    let dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../models");
    ModelArtifacts::load(&dir).expect("demo artifacts should load")
}

#[test]
fn test_default_inputs_vector() {
    let vector = build(&RawInputs::default());
    assert_eq!(
        vector.as_array(),
        &[7.0, 0.4, 0.3, 5.0, 0.05, 30.0, 100.0, 0.99, 3.2, 0.6, 10.0, 1.0]
    );
}

#[test]
fn test_threshold_boundaries() {
    let cases = [
        (0.0, QualityClass::Bad),
        (0.7499, QualityClass::Bad),
        (0.75, QualityClass::Regular),
        (0.9499999, QualityClass::Regular),
        (0.95, QualityClass::Good),
        (1.2, QualityClass::Good),
    ];

    let vector = build(&RawInputs::default());
    for (score, expected) in cases {
        let prediction = predict(&vector, &constant_artifacts(score)).unwrap();
        assert_eq!(prediction.class, expected, "score {}", score);
        assert_eq!(prediction.score, score);
    }
}

#[test]
fn test_wine_type_changes_scaled_vector() {
    let scaler = uneven_scaler();
    let white = build(&RawInputs::default());
    let red = build(&RawInputs {
        wine_type: WineType::Red,
        ..RawInputs::default()
    });

    let white_scaled = scaler.transform(&white);
    let red_scaled = scaler.transform(&red);
    assert_ne!(white_scaled, red_scaled);
    assert_eq!(white_scaled.as_array()[..11], red_scaled.as_array()[..11]);

    let artifacts = ModelArtifacts::new(scaler, linear_regressor(0.5)).unwrap();
    let white_score = predict(&white, &artifacts).unwrap().score;
    let red_score = predict(&red, &artifacts).unwrap().score;
    assert_ne!(white_score, red_score);
}

#[test]
fn test_reordered_vector_scales_differently() {
    let scaler = uneven_scaler();
    let canonical = build(&RawInputs::default());

    let mut swapped = *canonical.as_array();
    swapped.swap(
        FeatureName::FixedAcidity.index(),
        FeatureName::VolatileAcidity.index(),
    );
    let swapped = FeatureVector::from_array(swapped);

    assert_ne!(scaler.transform(&canonical), scaler.transform(&swapped));
}

#[test]
fn test_demo_model_classes() {
    let artifacts = demo_artifacts();

    let bad = predict(&build(&RawInputs::default()), &artifacts).unwrap();
    assert_eq!(bad.class, QualityClass::Bad);
    assert_eq!(bad.score, 0.6);

    let regular = RawInputs {
        alcohol: 10.6,
        volatile_acidity: 0.3,
        ..RawInputs::default()
    };
    let regular = predict(&build(&regular), &artifacts).unwrap();
    assert_eq!(regular.class, QualityClass::Regular);
    assert_eq!(regular.score_display(), "0.8500");

    let good = RawInputs {
        alcohol: 12.5,
        volatile_acidity: 0.25,
        ..RawInputs::default()
    };
    let good = predict(&build(&good), &artifacts).unwrap();
    assert_eq!(good.class, QualityClass::Good);
}

#[test]
fn test_prediction_is_deterministic() {
    let artifacts = demo_artifacts();
    let vector = build(&RawInputs::default());

    let first = predict(&vector, &artifacts).unwrap();
    for _ in 0..10 {
        assert_eq!(predict(&vector, &artifacts).unwrap(), first);
    }
}

#[test]
fn test_non_finite_input_is_prediction_error() {
    let artifacts = constant_artifacts(0.8);
    let mut values = *build(&RawInputs::default()).as_array();
    values[FeatureName::Density.index()] = f64::NAN;

    let err = predict(&FeatureVector::from_array(values), &artifacts).unwrap_err();
    match err {
        Error::Prediction(msg) => assert!(msg.contains("density"), "got {}", msg),
        other => panic!("expected Prediction error, got {:?}", other),
    }
}

#[test]
fn test_in_memory_artifacts_validated() {
    let mut scaler = uneven_scaler();
    scaler.feature_names.reverse();

    let err = ModelArtifacts::new(scaler, linear_regressor(0.0)).unwrap_err();
    assert_eq!(err.artifact(), Some("scaler"));
}
