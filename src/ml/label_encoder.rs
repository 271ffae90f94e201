use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{Artifact, ModelError};

/// Maps encoded class ids back to their category labels (id = position).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelEncoder {
    pub classes: Vec<String>,
}

impl LabelEncoder {
    pub fn inverse_transform(&self, encoded: i64) -> Result<&str, ModelError> {
        usize::try_from(encoded)
            .ok()
            .and_then(|index| self.classes.get(index))
            .map(String::as_str)
            .ok_or(ModelError::UnknownLabel(encoded))
    }
}

impl Artifact for LabelEncoder {
    fn validate(&self) -> Result<(), String> {
        if self.classes.is_empty() {
            return Err("no classes defined".to_string());
        }
        let mut seen = HashSet::new();
        for class in &self.classes {
            if !seen.insert(class.as_str()) {
                return Err(format!("duplicate class {class:?}"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder() -> LabelEncoder {
        LabelEncoder {
            classes: vec!["Light".into(), "Moderate".into(), "Strong".into()],
        }
    }

    #[test]
    fn decodes_by_position() {
        let encoder = encoder();
        assert_eq!(encoder.inverse_transform(0).unwrap(), "Light");
        assert_eq!(encoder.inverse_transform(2).unwrap(), "Strong");
    }

    #[test]
    fn unknown_ids_are_errors() {
        let encoder = encoder();
        assert!(matches!(
            encoder.inverse_transform(3),
            Err(ModelError::UnknownLabel(3))
        ));
        assert!(matches!(
            encoder.inverse_transform(-1),
            Err(ModelError::UnknownLabel(-1))
        ));
    }

    #[test]
    fn duplicate_classes_fail_validation() {
        let encoder = LabelEncoder {
            classes: vec!["Light".into(), "Light".into()],
        };
        assert!(encoder.validate().is_err());
    }
}
