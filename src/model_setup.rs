//! Locating the model directory and seeding it with the bundled artifacts.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::app_dirs;
use crate::config::ModelSettings;
use crate::ml::{ModelBundle, ModelError};

/// Demo artifacts embedded in the binary as `(file name, JSON)`, in
/// classifier, label encoder, regressor order.
pub const BUNDLED_ARTIFACTS: [(&str, &str); 3] = [
    (
        "rf_classifier.json",
        include_str!("../assets/models/rf_classifier.json"),
    ),
    (
        "label_encoder.json",
        include_str!("../assets/models/label_encoder.json"),
    ),
    (
        "linear_regression.json",
        include_str!("../assets/models/linear_regression.json"),
    ),
];

/// Resolve the models directory from settings, defaulting to `.quakecast/models`.
pub fn resolve_models_dir(settings: &ModelSettings) -> Result<PathBuf, ModelError> {
    match &settings.dir {
        Some(dir) => {
            app_dirs::ensure_dir(dir)?;
            Ok(dir.clone())
        }
        None => Ok(app_dirs::models_dir()?),
    }
}

/// Seed an empty model directory with the bundled set.
///
/// Nothing is written once any configured artifact exists, so a partial set
/// fails to load instead of being completed with demo files. Returns the
/// number of files written.
pub fn sync_bundled_models(dir: &Path, settings: &ModelSettings) -> Result<usize, ModelError> {
    let [classifier, decoder, regressor] = BUNDLED_ARTIFACTS;
    let targets = [
        (dir.join(&settings.classifier_file), classifier.1),
        (dir.join(&settings.label_encoder_file), decoder.1),
        (dir.join(&settings.regressor_file), regressor.1),
    ];
    if targets.iter().any(|(target, _)| target.exists()) {
        return Ok(0);
    }
    for (target, contents) in &targets {
        fs::write(target, contents).map_err(|source| ModelError::Write {
            path: target.clone(),
            source,
        })?;
        tracing::info!("Installed bundled model artifact {}", target.display());
    }
    Ok(targets.len())
}

/// Resolve, seed and load the models. Any failure here is fatal to startup.
pub fn load_models(settings: &ModelSettings) -> Result<ModelBundle, ModelError> {
    let dir = resolve_models_dir(settings)?;
    sync_bundled_models(&dir, settings)?;
    ModelBundle::load(&dir, settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::SeverityModel;
    use crate::params::SourceParameters;
    use tempfile::tempdir;

    fn settings_in(dir: &Path) -> ModelSettings {
        ModelSettings {
            dir: Some(dir.to_path_buf()),
            ..ModelSettings::default()
        }
    }

    #[test]
    fn seeds_empty_dir_then_loads() {
        let dir = tempdir().unwrap();
        let settings = settings_in(&dir.path().join("models"));

        let bundle = load_models(&settings).unwrap();

        let features = SourceParameters::default().feature_vector();
        assert_eq!(bundle.predict_category(&features).unwrap(), "Moderate");
        assert!(dir.path().join("models").join("rf_classifier.json").is_file());
    }

    #[test]
    fn existing_artifacts_are_not_overwritten() {
        let dir = tempdir().unwrap();
        let settings = settings_in(dir.path());
        assert_eq!(sync_bundled_models(dir.path(), &settings).unwrap(), 3);
        let custom = r#"{"model_version":2,"coefficients":[0,0,0,0],"intercept":7.25}"#;
        fs::write(dir.path().join(&settings.regressor_file), custom).unwrap();

        assert_eq!(sync_bundled_models(dir.path(), &settings).unwrap(), 0);
        let bundle = load_models(&settings).unwrap();

        let features = SourceParameters::default().feature_vector();
        assert_eq!(bundle.predict_magnitude(&features).unwrap(), 7.25);
    }

    #[test]
    fn partial_custom_dir_is_not_completed_with_bundled_files() {
        let dir = tempdir().unwrap();
        let settings = settings_in(dir.path());
        let [classifier, decoder, _] = BUNDLED_ARTIFACTS;
        fs::write(dir.path().join(&settings.classifier_file), classifier.1).unwrap();
        fs::write(dir.path().join(&settings.label_encoder_file), decoder.1).unwrap();

        let err = load_models(&settings).unwrap_err();

        assert!(matches!(err, ModelError::Read { .. }));
        assert!(!dir.path().join(&settings.regressor_file).exists());
    }

    #[test]
    fn corrupt_artifact_fails_loading() {
        let dir = tempdir().unwrap();
        let settings = settings_in(dir.path());
        sync_bundled_models(dir.path(), &settings).unwrap();
        fs::write(dir.path().join(&settings.label_encoder_file), "{ not json").unwrap();

        let err = ModelBundle::load(dir.path(), &settings).unwrap_err();

        assert!(matches!(err, ModelError::Parse { .. }));
    }

    #[test]
    fn missing_artifact_fails_loading() {
        let dir = tempdir().unwrap();
        let err = ModelBundle::load(dir.path(), &settings_in(dir.path())).unwrap_err();
        assert!(matches!(err, ModelError::Read { .. }));
    }
}
