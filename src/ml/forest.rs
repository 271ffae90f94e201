use serde::{Deserialize, Serialize};

use crate::params::{FEATURE_COUNT, FeatureVector};

use super::Artifact;

/// One node of a fitted decision tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    /// Go `left` when `feature <= threshold`, otherwise `right`.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Per-class sample weights at the leaf, in `classes` order.
    Leaf { distribution: Vec<f64> },
}

/// Flattened decision tree; node 0 is the root and children always follow their parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    fn leaf_distribution(&self, features: &[f64]) -> &[f64] {
        let mut index = 0usize;
        loop {
            match &self.nodes[index] {
                TreeNode::Leaf { distribution } => return distribution,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = features.get(*feature).copied().unwrap_or(0.0);
                    index = if value <= *threshold { *left } else { *right };
                }
            }
        }
    }

    fn validate(&self, n_features: usize, n_classes: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }
        for (index, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= n_features {
                        return Err(format!("node {index} splits on unknown feature {feature}"));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {index} has a non-finite threshold"));
                    }
                    for child in [*left, *right] {
                        if child <= index || child >= self.nodes.len() {
                            return Err(format!("node {index} has invalid child {child}"));
                        }
                    }
                }
                TreeNode::Leaf { distribution } => {
                    if distribution.len() != n_classes {
                        return Err(format!(
                            "leaf {index} has {} weights but expected {n_classes}",
                            distribution.len()
                        ));
                    }
                    if distribution.iter().any(|w| !w.is_finite() || *w < 0.0) {
                        return Err(format!("leaf {index} has a negative or non-finite weight"));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Random-forest classifier averaging per-tree class probabilities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestClassifier {
    pub model_version: i64,
    pub n_features: usize,
    /// Encoded class ids, in the column order of leaf distributions.
    pub classes: Vec<i64>,
    pub trees: Vec<DecisionTree>,
}

impl ForestClassifier {
    /// Mean class probabilities across all trees.
    pub fn predict_proba(&self, features: &FeatureVector) -> Vec<f64> {
        let mut totals = vec![0.0f64; self.classes.len()];
        for tree in &self.trees {
            let distribution = tree.leaf_distribution(features.as_slice());
            let sum: f64 = distribution.iter().sum();
            for (total, weight) in totals.iter_mut().zip(distribution) {
                *total += if sum > 0.0 {
                    weight / sum
                } else {
                    1.0 / distribution.len() as f64
                };
            }
        }
        let count = self.trees.len().max(1) as f64;
        totals.iter_mut().for_each(|total| *total /= count);
        totals
    }

    /// Encoded class id with the highest mean probability. Ties go to the earlier class.
    pub fn predict(&self, features: &FeatureVector) -> i64 {
        let proba = self.predict_proba(features);
        let mut best = 0usize;
        let mut best_val = f64::NEG_INFINITY;
        for (idx, &p) in proba.iter().enumerate() {
            if p > best_val {
                best_val = p;
                best = idx;
            }
        }
        self.classes[best]
    }
}

impl Artifact for ForestClassifier {
    fn validate(&self) -> Result<(), String> {
        if self.n_features != FEATURE_COUNT {
            return Err(format!(
                "expects {} features but the form provides {FEATURE_COUNT}",
                self.n_features
            ));
        }
        if self.classes.is_empty() {
            return Err("no classes defined".to_string());
        }
        if self.trees.is_empty() {
            return Err("forest has no trees".to_string());
        }
        for (tree_idx, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features, self.classes.len())
                .map_err(|reason| format!("tree {tree_idx}: {reason}"))?;
        }
        Ok(())
    }
}
