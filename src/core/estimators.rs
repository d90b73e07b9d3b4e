use serde::{Deserialize, Serialize};

/// Capability of an ensemble to expose the prediction of every member
/// for a single input row
///
/// The confidence estimator only depends on this trait, not on the
/// forest's internal layout.
pub trait MemberPredictions {
    fn member_predictions(&self, row: &[f64]) -> Vec<f64>;
}

/// One node of a fitted binary decision tree
///
/// Internal nodes route on `row[feature] <= threshold`; leaves are
/// marked with `feature < 0` and carry the prediction in `value`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    pub feature: i32,
    pub threshold: f64,
    pub left: u32,
    pub right: u32,
    pub value: f64,
}

/// A fitted regression tree stored as a flat node array rooted at 0
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Single-leaf tree that always predicts `value`
    pub fn leaf(value: f64) -> Self {
        Self {
            nodes: vec![TreeNode {
                feature: -1,
                threshold: 0.0,
                left: 0,
                right: 0,
                value,
            }],
        }
    }

    /// Depth-1 tree splitting on one feature
    pub fn stump(feature: usize, threshold: f64, left_value: f64, right_value: f64) -> Self {
        Self {
            nodes: vec![
                TreeNode {
                    feature: feature as i32,
                    threshold,
                    left: 1,
                    right: 2,
                    value: 0.0,
                },
                TreeNode {
                    feature: -1,
                    threshold: 0.0,
                    left: 0,
                    right: 0,
                    value: left_value,
                },
                TreeNode {
                    feature: -1,
                    threshold: 0.0,
                    left: 0,
                    right: 0,
                    value: right_value,
                },
            ],
        }
    }

    /// Walk the tree for one row of features
    pub fn predict(&self, row: &[f64]) -> f64 {
        let mut idx = 0usize;
        loop {
            let node = &self.nodes[idx];
            if node.feature < 0 {
                return node.value;
            }
            idx = if row[node.feature as usize] <= node.threshold {
                node.left as usize
            } else {
                node.right as usize
            };
        }
    }
}

/// Fitted random forest regressor
///
/// Predicts the mean of its trees and carries the per-feature
/// importance weights captured at training time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    pub trees: Vec<DecisionTree>,
    pub feature_importances: Vec<f64>,
}

impl RandomForest {
    pub fn predict(&self, row: &[f64]) -> f64 {
        let sum: f64 = self.trees.iter().map(|tree| tree.predict(row)).sum();
        sum / self.trees.len() as f64
    }

    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }
}

impl MemberPredictions for RandomForest {
    fn member_predictions(&self, row: &[f64]) -> Vec<f64> {
        self.trees.iter().map(|tree| tree.predict(row)).collect()
    }
}

/// Fitted gradient-boosted regressor
///
/// Leaf values already include the learning-rate shrinkage, so the
/// prediction is the base score plus the sum of all stage outputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradientBoosted {
    pub base_score: f64,
    pub trees: Vec<DecisionTree>,
}

impl GradientBoosted {
    pub fn predict(&self, row: &[f64]) -> f64 {
        self.base_score + self.trees.iter().map(|tree| tree.predict(row)).sum::<f64>()
    }
}

/// Fitted ridge regression model; expects a scaled input row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RidgeModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl RidgeModel {
    pub fn predict(&self, scaled_row: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(scaled_row.iter())
                .map(|(c, x)| c * x)
                .sum::<f64>()
    }
}

/// Standardizing scaler fitted on the training features
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    /// Identity transform for the given feature count
    pub fn identity(num_features: usize) -> Self {
        Self {
            mean: vec![0.0; num_features],
            scale: vec![1.0; num_features],
        }
    }

    pub fn transform(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.mean.iter())
            .zip(self.scale.iter())
            .map(|((x, m), s)| (x - m) / s)
            .collect()
    }
}
