use serde::{Deserialize, Serialize};

use crate::params::{FEATURE_COUNT, FeatureVector};

use super::Artifact;

/// Ordinary least-squares regressor: `intercept + coefficients · features`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegressor {
    pub model_version: i64,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearRegressor {
    pub fn predict(&self, features: &FeatureVector) -> f64 {
        self.coefficients
            .iter()
            .zip(features.as_slice())
            .fold(self.intercept, |acc, (coef, value)| acc + coef * value)
    }
}

impl Artifact for LinearRegressor {
    fn validate(&self) -> Result<(), String> {
        if self.coefficients.len() != FEATURE_COUNT {
            return Err(format!(
                "has {} coefficients but expected {FEATURE_COUNT}",
                self.coefficients.len()
            ));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err("coefficients must be finite".to_string());
        }
        Ok(())
    }
}
