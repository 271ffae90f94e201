//! Pretrained severity models and the capability interface the pipeline calls.
//!
//! Artifacts are plain JSON exports of the trained estimators: a random-forest
//! classifier producing an encoded class id, a label encoder mapping that id
//! back to a category string, and a linear regressor producing a magnitude.
//! They are loaded and validated once at startup and never mutated.

mod bundle;
mod forest;
mod label_encoder;
mod linear;

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

pub use bundle::ModelBundle;
pub use forest::{DecisionTree, ForestClassifier, TreeNode};
pub use label_encoder::LabelEncoder;
pub use linear::LinearRegressor;

use crate::params::FeatureVector;

/// Predict-category and predict-magnitude capabilities.
pub trait SeverityModel: Send + Sync {
    /// Classify and decode into a category label.
    fn predict_category(&self, features: &FeatureVector) -> Result<String, ModelError>;
    /// Estimate the magnitude, unrounded.
    fn predict_magnitude(&self, features: &FeatureVector) -> Result<f64, ModelError>;
}

/// Errors raised while loading or evaluating model artifacts.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Failed to read model artifact {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid model artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Model artifact {path} failed validation: {reason}")]
    Invalid { path: PathBuf, reason: String },
    #[error("Encoded label {0} is not known to the label encoder")]
    UnknownLabel(i64),
    #[error("Failed to write bundled model {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Models directory unavailable: {0}")]
    Dir(#[from] crate::app_dirs::AppDirError),
}

/// Structural checks run on every artifact after deserialization.
pub(crate) trait Artifact: DeserializeOwned {
    fn validate(&self) -> Result<(), String>;
}

pub(crate) fn parse_artifact<T: Artifact>(path: &Path, bytes: &[u8]) -> Result<T, ModelError> {
    let artifact: T = serde_json::from_slice(bytes).map_err(|source| ModelError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    artifact.validate().map_err(|reason| ModelError::Invalid {
        path: path.to_path_buf(),
        reason,
    })?;
    Ok(artifact)
}

pub(crate) fn load_artifact<T: Artifact>(path: &Path) -> Result<T, ModelError> {
    let bytes = std::fs::read(path).map_err(|source| ModelError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_artifact(path, &bytes)
}
