//! The predict step: gate on coordinates, call the models, fill the result slot.

use std::fmt;

use crate::location::Coordinates;
use crate::ml::{ModelError, SeverityModel};
use crate::params::SourceParameters;

/// Severity tier decoded from the classifier.
///
/// Labels are matched exactly; anything else is kept verbatim as `Unrecognized`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Category {
    Light,
    Moderate,
    Strong,
    Unrecognized(String),
}

impl Category {
    pub fn from_label(label: &str) -> Self {
        match label {
            "Light" => Self::Light,
            "Moderate" => Self::Moderate,
            "Strong" => Self::Strong,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Light => "Light",
            Self::Moderate => "Moderate",
            Self::Strong => "Strong",
            Self::Unrecognized(label) => label,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One prediction plus the location it was made for.
#[derive(Clone, Debug, PartialEq)]
pub struct PredictionResult {
    pub category: Category,
    /// Unrounded regressor output.
    pub magnitude: f64,
    pub latitude: f64,
    pub longitude: f64,
}

/// Holds at most one prediction; storing replaces whatever was there.
#[derive(Debug, Default)]
pub struct ResultSlot {
    current: Option<PredictionResult>,
}

impl ResultSlot {
    pub fn store(&mut self, result: PredictionResult) -> &PredictionResult {
        self.current.insert(result)
    }

    pub fn current(&self) -> Option<&PredictionResult> {
        self.current.as_ref()
    }
}

/// Why the predict action produced no result.
#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error("Coordinates unavailable. Enter a valid location.")]
    CoordinatesUnavailable,
    #[error("Prediction failed: {0}")]
    Model(#[from] ModelError),
}

/// Run both models for `params` and store the result in `slot`.
///
/// Coordinates are required but never fed to the models; only depth, strike,
/// dip and rake are. On any error the slot keeps its previous result.
pub fn predict<'a>(
    model: &dyn SeverityModel,
    coordinates: Option<Coordinates>,
    params: &SourceParameters,
    slot: &'a mut ResultSlot,
) -> Result<&'a PredictionResult, PredictError> {
    let coordinates = coordinates.ok_or(PredictError::CoordinatesUnavailable)?;
    let features = params.feature_vector();
    let label = model.predict_category(&features)?;
    let magnitude = model.predict_magnitude(&features)?;
    let result = PredictionResult {
        category: Category::from_label(&label),
        magnitude,
        latitude: coordinates.latitude(),
        longitude: coordinates.longitude(),
    };
    tracing::info!(
        "Predicted {} M{magnitude:.2} at {coordinates} for {params:?}",
        result.category
    );
    Ok(slot.store(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::FeatureVector;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingModel {
        label: String,
        magnitude: f64,
        calls: Mutex<Vec<FeatureVector>>,
    }

    impl SeverityModel for RecordingModel {
        fn predict_category(&self, features: &FeatureVector) -> Result<String, ModelError> {
            self.calls.lock().unwrap().push(*features);
            Ok(self.label.clone())
        }

        fn predict_magnitude(&self, features: &FeatureVector) -> Result<f64, ModelError> {
            self.calls.lock().unwrap().push(*features);
            Ok(self.magnitude)
        }
    }

    fn model(label: &str, magnitude: f64) -> RecordingModel {
        RecordingModel {
            label: label.to_string(),
            magnitude,
            ..RecordingModel::default()
        }
    }

    fn jakarta() -> Option<Coordinates> {
        Coordinates::new(-6.2, 106.8).ok()
    }

    #[test]
    fn unresolved_coordinates_never_call_models() {
        let model = model("Strong", 7.0);
        let mut slot = ResultSlot::default();

        let err = predict(&model, None, &SourceParameters::default(), &mut slot).unwrap_err();

        assert!(matches!(err, PredictError::CoordinatesUnavailable));
        assert_eq!(err.to_string(), "Coordinates unavailable. Enter a valid location.");
        assert!(model.calls.lock().unwrap().is_empty());
        assert!(slot.current().is_none());
    }

    #[test]
    fn stores_unrounded_magnitude_and_location() {
        let model = model("Moderate", 5.4671);
        let mut slot = ResultSlot::default();

        let result = predict(&model, jakarta(), &SourceParameters::default(), &mut slot).unwrap();

        assert_eq!(
            *result,
            PredictionResult {
                category: Category::Moderate,
                magnitude: 5.4671,
                latitude: -6.2,
                longitude: 106.8,
            }
        );
    }

    #[test]
    fn models_receive_only_source_parameters() {
        let model = model("Light", 3.1);
        let mut slot = ResultSlot::default();
        let params = SourceParameters::clamped(10, 20, 30, -40);

        predict(&model, jakarta(), &params, &mut slot).unwrap();
        predict(&model, Coordinates::new(35.0, 139.0).ok(), &params, &mut slot).unwrap();

        let calls = model.calls.lock().unwrap();
        assert_eq!(calls.len(), 4);
        assert!(calls.iter().all(|f| f.0 == [10.0, 20.0, 30.0, -40.0]));
    }

    #[test]
    fn second_prediction_overwrites_first() {
        let mut slot = ResultSlot::default();
        predict(&model("Light", 3.0), jakarta(), &SourceParameters::default(), &mut slot).unwrap();
        predict(
            &model("Strong", 6.5),
            Coordinates::new(-0.9, 100.4).ok(),
            &SourceParameters::default(),
            &mut slot,
        )
        .unwrap();

        let current = slot.current().unwrap();
        assert_eq!(current.category, Category::Strong);
        assert_eq!(current.latitude, -0.9);
    }

    #[test]
    fn model_failure_keeps_previous_result() {
        struct Broken;
        impl SeverityModel for Broken {
            fn predict_category(&self, _: &FeatureVector) -> Result<String, ModelError> {
                Err(ModelError::UnknownLabel(9))
            }
            fn predict_magnitude(&self, _: &FeatureVector) -> Result<f64, ModelError> {
                Ok(1.0)
            }
        }
        let mut slot = ResultSlot::default();
        predict(&model("Light", 3.0), jakarta(), &SourceParameters::default(), &mut slot).unwrap();

        let err = predict(&Broken, jakarta(), &SourceParameters::default(), &mut slot).unwrap_err();

        assert!(matches!(err, PredictError::Model(ModelError::UnknownLabel(9))));
        assert_eq!(slot.current().unwrap().category, Category::Light);
    }

    #[test]
    fn category_matching_is_exact() {
        assert_eq!(Category::from_label("Strong"), Category::Strong);
        assert_eq!(
            Category::from_label("strong"),
            Category::Unrecognized("strong".into())
        );
        assert_eq!(Category::from_label("Severe").label(), "Severe");
    }
}
