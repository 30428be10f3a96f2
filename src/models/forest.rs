//! Random forest classifier
//!
//! Trees use the flat array layout of CART implementations: node `i` is a
//! leaf when `children_left[i] == -1`, otherwise it splits on
//! `feature[i] <= threshold[i]` (left) vs. greater (right). `value[i]` holds
//! the class distribution (counts or fractions) at the node.

use serde::{Deserialize, Serialize};

use crate::error::ComputeError;
use crate::models::{argmax, check_width, Predictor};

/// Marker for "no child" in the flat tree layout
pub const TREE_LEAF: i64 = -1;

/// One fitted decision tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<Vec<f64>>,
}

impl DecisionTree {
    pub fn node_count(&self) -> usize {
        self.children_left.len()
    }

    /// Check the layout so traversal can never leave the arrays or loop
    pub fn validate(&self, n_features: usize, n_classes: usize) -> Result<(), ComputeError> {
        let n = self.node_count();
        if n == 0 {
            return Err(ComputeError::InvalidArtifact("tree has no nodes".to_string()));
        }
        if [
            self.children_right.len(),
            self.feature.len(),
            self.threshold.len(),
            self.value.len(),
        ]
        .iter()
        .any(|&len| len != n)
        {
            return Err(ComputeError::InvalidArtifact(
                "tree node arrays have different lengths".to_string(),
            ));
        }

        for node in 0..n {
            if self.value[node].len() != n_classes {
                return Err(ComputeError::InvalidArtifact(format!(
                    "tree node {node} has {} class values, expected {n_classes}",
                    self.value[node].len()
                )));
            }

            let (left, right) = (self.children_left[node], self.children_right[node]);
            if left == TREE_LEAF {
                if right != TREE_LEAF {
                    return Err(ComputeError::InvalidArtifact(format!(
                        "tree node {node} has only one child"
                    )));
                }
                continue;
            }

            // Children always follow their parent, which rules out cycles
            let in_range = |child: i64| child > node as i64 && (child as usize) < n;
            if !in_range(left) || !in_range(right) {
                return Err(ComputeError::InvalidArtifact(format!(
                    "tree node {node} has out-of-range children ({left}, {right})"
                )));
            }

            let feature = self.feature[node];
            if feature < 0 || feature as usize >= n_features {
                return Err(ComputeError::InvalidArtifact(format!(
                    "tree node {node} splits on feature {feature} of {n_features}"
                )));
            }
            if self.threshold[node].is_nan() {
                return Err(ComputeError::InvalidArtifact(format!(
                    "tree node {node} has a NaN threshold"
                )));
            }
        }
        Ok(())
    }

    /// Index of the leaf reached by `x`.
    ///
    /// Layouts that [`DecisionTree::validate`] would reject yield
    /// `InvalidArtifact`. Children must follow their parent.
    pub fn apply(&self, x: &[f64]) -> Result<usize, ComputeError> {
        let broken = |node: usize| {
            ComputeError::InvalidArtifact(format!("tree node {node} is malformed"))
        };

        let mut node = 0;
        loop {
            let left = *self.children_left.get(node).ok_or_else(|| broken(node))?;
            if left == TREE_LEAF {
                return Ok(node);
            }
            let right = *self.children_right.get(node).ok_or_else(|| broken(node))?;
            let threshold = *self.threshold.get(node).ok_or_else(|| broken(node))?;
            let feature = self
                .feature
                .get(node)
                .and_then(|&f| usize::try_from(f).ok())
                .ok_or_else(|| broken(node))?;
            let raw = *x.get(feature).ok_or_else(|| {
                ComputeError::InvalidArtifact(format!(
                    "tree node {node} splits on feature {feature} of {}",
                    x.len()
                ))
            })?;

            // Split thresholds were learned on single-precision inputs
            let value = raw as f32 as f64;
            let next = if value <= threshold { left } else { right };
            if next <= node as i64 {
                return Err(broken(node));
            }
            node = next as usize;
        }
    }

    /// Normalized class distribution at the leaf reached by `x`
    pub fn predict_proba(&self, x: &[f64]) -> Result<Vec<f64>, ComputeError> {
        let node = self.apply(x)?;
        let leaf = self.value.get(node).ok_or_else(|| {
            ComputeError::InvalidArtifact(format!("tree node {node} has no class values"))
        })?;
        let total: f64 = leaf.iter().sum();
        if total > 0.0 {
            Ok(leaf.iter().map(|v| v / total).collect())
        } else {
            Ok(vec![0.0; leaf.len()])
        }
    }
}

/// Fitted random forest classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForestClassifier {
    pub n_features: usize,
    pub classes: Vec<i64>,
    pub trees: Vec<DecisionTree>,
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
}

impl RandomForestClassifier {
    /// Mean of the per-tree class distributions, in `classes` order
    pub fn predict_proba(&self, x: &[f64]) -> Result<Vec<f64>, ComputeError> {
        check_width(self, x)?;
        if self.trees.is_empty() {
            return Err(ComputeError::InvalidArtifact(
                "random forest has no trees".to_string(),
            ));
        }

        let mut proba = vec![0.0; self.classes.len()];
        for (idx, tree) in self.trees.iter().enumerate() {
            let tree_proba = tree.predict_proba(x)?;
            if tree_proba.len() != proba.len() {
                return Err(ComputeError::InvalidArtifact(format!(
                    "tree {idx} leaf has {} class values, expected {}",
                    tree_proba.len(),
                    proba.len()
                )));
            }
            for (acc, p) in proba.iter_mut().zip(tree_proba) {
                *acc += p;
            }
        }
        let n_trees = self.trees.len() as f64;
        proba.iter_mut().for_each(|p| *p /= n_trees);
        Ok(proba)
    }
}

impl Predictor for RandomForestClassifier {
    type Output = i64;

    fn kind(&self) -> &'static str {
        "random_forest_classifier"
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn validate(&self) -> Result<(), ComputeError> {
        if self.classes.is_empty() {
            return Err(ComputeError::InvalidArtifact(
                "random forest has no classes".to_string(),
            ));
        }
        if self.trees.is_empty() {
            return Err(ComputeError::InvalidArtifact(
                "random forest has no trees".to_string(),
            ));
        }
        for (idx, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features, self.classes.len())
                .map_err(|e| match e {
                    ComputeError::InvalidArtifact(msg) => {
                        ComputeError::InvalidArtifact(format!("tree {idx}: {msg}"))
                    }
                    other => other,
                })?;
        }
        Ok(())
    }

    fn predict(&self, x: &[f64]) -> Result<i64, ComputeError> {
        let proba = self.predict_proba(x)?;
        argmax(&proba)
            .and_then(|idx| self.classes.get(idx).copied())
            .ok_or_else(|| ComputeError::InvalidArtifact("random forest has no classes".to_string()))
    }
}
