use std::path::Path;

use crate::config::ModelSettings;
use crate::params::FeatureVector;

use super::{
    Artifact, ForestClassifier, LabelEncoder, LinearRegressor, ModelError, SeverityModel,
    load_artifact, parse_artifact,
};

/// The three artifacts the app predicts with, validated against each other.
#[derive(Debug, Clone)]
pub struct ModelBundle {
    classifier: ForestClassifier,
    decoder: LabelEncoder,
    regressor: LinearRegressor,
}

impl ModelBundle {
    /// Assemble a bundle, checking every classifier output can be decoded.
    pub fn new(
        classifier: ForestClassifier,
        decoder: LabelEncoder,
        regressor: LinearRegressor,
    ) -> Result<Self, String> {
        classifier.validate()?;
        decoder.validate()?;
        regressor.validate()?;
        for encoded in &classifier.classes {
            decoder
                .inverse_transform(*encoded)
                .map_err(|err| format!("classifier output cannot be decoded: {err}"))?;
        }
        Ok(Self {
            classifier,
            decoder,
            regressor,
        })
    }

    /// Load the artifacts named in `settings` from `dir`.
    pub fn load(dir: &Path, settings: &ModelSettings) -> Result<Self, ModelError> {
        let classifier_path = dir.join(&settings.classifier_file);
        let classifier: ForestClassifier = load_artifact(&classifier_path)?;
        let decoder: LabelEncoder = load_artifact(&dir.join(&settings.label_encoder_file))?;
        let regressor: LinearRegressor = load_artifact(&dir.join(&settings.regressor_file))?;
        let bundle = Self::new(classifier, decoder, regressor).map_err(|reason| {
            ModelError::Invalid {
                path: classifier_path,
                reason,
            }
        })?;
        tracing::info!(
            "Loaded models from {} ({} trees, classes {:?})",
            dir.display(),
            bundle.classifier.trees.len(),
            bundle.decoder.classes
        );
        Ok(bundle)
    }

    /// Demo artifacts compiled into the binary.
    pub fn bundled() -> Result<Self, ModelError> {
        let [classifier, decoder, regressor] = crate::model_setup::BUNDLED_ARTIFACTS;
        let classifier: ForestClassifier =
            parse_artifact(Path::new(classifier.0), classifier.1.as_bytes())?;
        let decoder: LabelEncoder = parse_artifact(Path::new(decoder.0), decoder.1.as_bytes())?;
        let regressor: LinearRegressor =
            parse_artifact(Path::new(regressor.0), regressor.1.as_bytes())?;
        Self::new(classifier, decoder, regressor).map_err(|reason| ModelError::Invalid {
            path: "bundled".into(),
            reason,
        })
    }
}

impl SeverityModel for ModelBundle {
    fn predict_category(&self, features: &FeatureVector) -> Result<String, ModelError> {
        let encoded = self.classifier.predict(features);
        self.decoder.inverse_transform(encoded).map(str::to_string)
    }

    fn predict_magnitude(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        Ok(self.regressor.predict(features))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{DEPTH, DIP, RAKE, STRIKE, SourceParameters};

    #[test]
    fn bundled_models_predict_defaults() {
        let bundle = ModelBundle::bundled().unwrap();
        let features = SourceParameters::default().feature_vector();
        assert_eq!(bundle.predict_category(&features).unwrap(), "Moderate");
        let magnitude = bundle.predict_magnitude(&features).unwrap();
        assert!((magnitude - 5.47).abs() < 1e-9);
    }

    #[test]
    fn bundled_models_cover_every_tier() {
        let bundle = ModelBundle::bundled().unwrap();
        let category = |depth, strike, dip, rake| {
            let features = SourceParameters::clamped(depth, strike, dip, rake).feature_vector();
            bundle.predict_category(&features).unwrap()
        };
        assert_eq!(category(20, 180, 60, 90), "Strong");
        assert_eq!(category(400, 45, 30, -90), "Light");
    }

    #[test]
    fn every_domain_corner_yields_known_label_and_finite_magnitude() {
        let bundle = ModelBundle::bundled().unwrap();
        for depth in [DEPTH.min, DEPTH.default, DEPTH.max] {
            for strike in [STRIKE.min, STRIKE.max] {
                for dip in [DIP.min, DIP.max] {
                    for rake in [RAKE.min, 0, RAKE.max] {
                        let features = SourceParameters::clamped(depth, strike, dip, rake)
                            .feature_vector();
                        let category = bundle.predict_category(&features).unwrap();
                        assert!(["Light", "Moderate", "Strong"].contains(&category.as_str()));
                        assert!(bundle.predict_magnitude(&features).unwrap().is_finite());
                    }
                }
            }
        }
    }

    #[test]
    fn undecodable_classifier_output_is_rejected() {
        let bundle = ModelBundle::bundled().unwrap();
        let decoder = LabelEncoder {
            classes: vec!["Light".into(), "Moderate".into()],
        };
        let err = ModelBundle::new(bundle.classifier, decoder, bundle.regressor).unwrap_err();
        assert!(err.contains("cannot be decoded"));
    }
}
