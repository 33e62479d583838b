//! Model artifact loading
//!
//! Two JSON artifacts live in the model directory under fixed names:
//! - `feature_scaler.json` ([`Scaler`])
//! - `quality_regressor.json` ([`Regressor`])
//!
//! Both are loaded once at startup into an immutable [`ModelArtifacts`]
//! context. There is no fallback model: a missing or unusable artifact fails
//! the load with an error naming the artifact.

use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::features::FEATURE_NAMES;
use crate::{Error, Result};

mod regressor;
mod scaler;

pub use regressor::{ModelMetadata, Regressor, RegressorModel, TreeNode, WeightedTree};
pub use scaler::{Scaler, ScalerTransform};

/// File name of the fitted scaler inside the model directory
pub const SCALER_FILE: &str = "feature_scaler.json";

/// File name of the fitted regressor inside the model directory
pub const REGRESSOR_FILE: &str = "quality_regressor.json";

/// The two artifacts required for prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Scaler,
    Regressor,
}

impl ArtifactKind {
    pub const fn name(self) -> &'static str {
        match self {
            ArtifactKind::Scaler => "scaler",
            ArtifactKind::Regressor => "regressor",
        }
    }

    pub const fn file_name(self) -> &'static str {
        match self {
            ArtifactKind::Scaler => SCALER_FILE,
            ArtifactKind::Regressor => REGRESSOR_FILE,
        }
    }

    /// Fixed location of this artifact inside `model_dir`
    pub fn path_in(self, model_dir: &Path) -> PathBuf {
        model_dir.join(self.file_name())
    }

    fn corrupt(self, path: &Path, reason: impl Into<String>) -> Error {
        Error::ArtifactCorrupt {
            artifact: self.name().to_string(),
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

/// Fail when an artifact was fitted on a different column order
pub(crate) fn check_feature_names(names: &[String]) -> std::result::Result<(), String> {
    if names.len() != FEATURE_NAMES.len() {
        return Err(format!(
            "expected {} features, artifact declares {}",
            FEATURE_NAMES.len(),
            names.len()
        ));
    }
    for (i, (found, expected)) in names.iter().zip(FEATURE_NAMES.iter()).enumerate() {
        if found != expected {
            return Err(format!(
                "feature {} is '{}', expected '{}'",
                i, found, expected
            ));
        }
    }
    Ok(())
}

fn read_artifact<T: DeserializeOwned>(kind: ArtifactKind, path: &Path) -> Result<T> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(Error::ArtifactNotFound {
                artifact: kind.name().to_string(),
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(kind.corrupt(path, e.to_string())),
    };

    serde_json::from_str(&content).map_err(|e| kind.corrupt(path, e.to_string()))
}

/// Load and validate the fitted scaler at `path`
pub fn load_scaler(path: &Path) -> Result<Scaler> {
    let scaler: Scaler = read_artifact(ArtifactKind::Scaler, path)?;
    scaler
        .validate()
        .map_err(|reason| ArtifactKind::Scaler.corrupt(path, reason))?;
    Ok(scaler)
}

/// Load and validate the fitted regressor at `path`
pub fn load_regressor(path: &Path) -> Result<Regressor> {
    let regressor: Regressor = read_artifact(ArtifactKind::Regressor, path)?;
    regressor
        .validate()
        .map_err(|reason| ArtifactKind::Regressor.corrupt(path, reason))?;
    Ok(regressor)
}

/// Loaded scaler and regressor
///
/// Created once at startup and read-only afterwards; share it behind an
/// `Arc` between request handlers.
#[derive(Debug, Clone)]
pub struct ModelArtifacts {
    scaler: Scaler,
    regressor: Regressor,
}

impl ModelArtifacts {
    /// Build from in-memory artifacts, applying the same validation as [`load`](Self::load)
    pub fn new(scaler: Scaler, regressor: Regressor) -> Result<Self> {
        let in_memory = Path::new("<memory>");
        scaler
            .validate()
            .map_err(|reason| ArtifactKind::Scaler.corrupt(in_memory, reason))?;
        regressor
            .validate()
            .map_err(|reason| ArtifactKind::Regressor.corrupt(in_memory, reason))?;
        Ok(Self { scaler, regressor })
    }

    /// Load both artifacts from `model_dir`
    pub fn load(model_dir: &Path) -> Result<Self> {
        info!("Loading model artifacts from {}", model_dir.display());

        let regressor_path = ArtifactKind::Regressor.path_in(model_dir);
        let regressor = load_regressor(&regressor_path).inspect_err(|e| {
            error!("Failed to load regressor artifact: {}", e);
        })?;
        info!("✓ Loaded regressor: {}", regressor_path.display());

        let scaler_path = ArtifactKind::Scaler.path_in(model_dir);
        let scaler = load_scaler(&scaler_path).inspect_err(|e| {
            error!("Failed to load scaler artifact: {}", e);
        })?;
        info!("✓ Loaded scaler: {}", scaler_path.display());

        Ok(Self { scaler, regressor })
    }

    pub fn scaler(&self) -> &Scaler {
        &self.scaler
    }

    pub fn regressor(&self) -> &Regressor {
        &self.regressor
    }

    pub fn metadata(&self) -> Option<&ModelMetadata> {
        self.regressor.metadata.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        FEATURE_NAMES.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_check_feature_names_accepts_canonical() {
        assert!(check_feature_names(&names()).is_ok());
    }

    #[test]
    fn test_check_feature_names_detects_swap() {
        let mut swapped = names();
        swapped.swap(0, 1);
        let reason = check_feature_names(&swapped).unwrap_err();
        assert_eq!(
            reason,
            "feature 0 is 'volatile acidity', expected 'fixed acidity'"
        );
    }

    #[test]
    fn test_check_feature_names_detects_missing_column() {
        let mut short = names();
        short.pop();
        assert!(check_feature_names(&short)
            .unwrap_err()
            .contains("expected 12 features"));
    }

    #[test]
    fn test_artifact_paths() {
        let dir = Path::new("/opt/wqc/models");
        assert_eq!(
            ArtifactKind::Scaler.path_in(dir),
            PathBuf::from("/opt/wqc/models/feature_scaler.json")
        );
        assert_eq!(
            ArtifactKind::Regressor.path_in(dir),
            PathBuf::from("/opt/wqc/models/quality_regressor.json")
        );
    }
}
