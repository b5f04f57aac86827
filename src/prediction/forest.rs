//! Random-forest regressor artifact
//!
//! The artifact is the JSON export of a trained forest: the ordered feature
//! list, the imputer statistics used to fill unreported features, the trees
//! in flat node arrays, and the per-feature importances.
//!
//! ```json
//! {
//!   "features": ["PM2.5", "PM10"],
//!   "imputer": { "strategy": "median", "statistics": [55.0, 95.0] },
//!   "trees": [
//!     { "nodes": [
//!         { "kind": "split", "feature": 0, "threshold": 60.0, "left": 1, "right": 2 },
//!         { "kind": "leaf", "value": 80.0 },
//!         { "kind": "leaf", "value": 180.0 }
//!     ] }
//!   ],
//!   "feature_importances": [0.7, 0.3]
//! }
//! ```

use crate::aqi::AqiError;
use crate::models::aqi::FeatureImportances;
use crate::models::pollutant::Pollutant;
use crate::models::sample::Sample;
use crate::prediction::model::AqiModel;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestArtifact {
    pub features: Vec<Pollutant>,
    pub imputer: ImputerParams,
    pub trees: Vec<RegressionTree>,
    #[serde(default)]
    pub feature_importances: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImputerParams {
    #[serde(default = "default_strategy")]
    pub strategy: String,
    /// Fill value per feature, aligned with `features`
    pub statistics: Vec<f64>,
}

fn default_strategy() -> String {
    "median".to_string()
}

/// Strategies whose fitted statistics can be replayed as fixed fill values
const IMPUTER_STRATEGIES: [&str; 4] = ["median", "mean", "most_frequent", "constant"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

/// Split nodes send `x <= threshold` left. Children always sit after their
/// parent in the node array.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

impl RegressionTree {
    fn predict(&self, row: &[f64]) -> f64 {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                TreeNode::Leaf { value } => return *value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if row[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }

    fn validate(&self, tree: usize, feature_count: usize) -> Result<(), AqiError> {
        let broken = |reason: String| AqiError::model_unavailable(format!("tree {}: {}", tree, reason));
        if self.nodes.is_empty() {
            return Err(broken("no nodes".to_string()));
        }
        for (i, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Leaf { value } if !value.is_finite() => {
                    return Err(broken(format!("leaf {} is not finite", i)));
                }
                TreeNode::Leaf { .. } => {}
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= feature_count {
                        return Err(broken(format!("node {} splits on unknown feature {}", i, feature)));
                    }
                    if threshold.is_nan() {
                        return Err(broken(format!("node {} has a NaN threshold", i)));
                    }
                    for child in [left, right] {
                        if *child <= i || *child >= self.nodes.len() {
                            return Err(broken(format!("node {} has invalid child {}", i, child)));
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

/// Loaded, validated forest
#[derive(Debug, Clone)]
pub struct ForestModel {
    artifact: ForestArtifact,
}

impl ForestModel {
    pub fn from_artifact(artifact: ForestArtifact) -> Result<Self, AqiError> {
        let feature_count = artifact.features.len();
        if feature_count == 0 {
            return Err(AqiError::model_unavailable("artifact lists no features"));
        }
        if artifact.imputer.statistics.len() != feature_count {
            return Err(AqiError::model_unavailable(format!(
                "imputer has {} statistics for {} features",
                artifact.imputer.statistics.len(),
                feature_count
            )));
        }
        if !IMPUTER_STRATEGIES.contains(&artifact.imputer.strategy.as_str()) {
            return Err(AqiError::model_unavailable(format!(
                "unsupported imputer strategy '{}'",
                artifact.imputer.strategy
            )));
        }
        if artifact.imputer.statistics.iter().any(|s| !s.is_finite()) {
            return Err(AqiError::model_unavailable("imputer statistics must be finite"));
        }
        if artifact.trees.is_empty() {
            return Err(AqiError::model_unavailable("artifact contains no trees"));
        }
        for (i, tree) in artifact.trees.iter().enumerate() {
            tree.validate(i, feature_count)?;
        }
        let importances = &artifact.feature_importances;
        if !importances.is_empty() && importances.len() != feature_count {
            return Err(AqiError::model_unavailable(format!(
                "{} importances for {} features",
                importances.len(),
                feature_count
            )));
        }
        if importances.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(AqiError::model_unavailable("importances must be non-negative"));
        }
        Ok(Self { artifact })
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self, AqiError> {
        let artifact: ForestArtifact = serde_json::from_slice(bytes)
            .map_err(|e| AqiError::model_unavailable(format!("invalid model artifact: {}", e)))?;
        Self::from_artifact(artifact)
    }

    pub fn features(&self) -> &[Pollutant] {
        &self.artifact.features
    }

    pub fn tree_count(&self) -> usize {
        self.artifact.trees.len()
    }

    pub fn imputer_strategy(&self) -> &str {
        &self.artifact.imputer.strategy
    }

    /// Feature row in artifact order, imputing unreported features
    fn row(&self, sample: &Sample) -> Vec<f64> {
        self.artifact
            .features
            .iter()
            .zip(&self.artifact.imputer.statistics)
            .map(|(feature, fill)| sample.get(*feature).unwrap_or(*fill))
            .collect()
    }
}

impl AqiModel for ForestModel {
    fn predict(&self, sample: &Sample) -> Result<f64, AqiError> {
        let row = self.row(sample);
        let total: f64 = self.artifact.trees.iter().map(|tree| tree.predict(&row)).sum();
        let mean = total / self.artifact.trees.len() as f64;
        Ok((mean * 10_000.0).round() / 10_000.0)
    }

    /// Without stored importances every feature weighs the same
    fn feature_importances(&self) -> FeatureImportances {
        let features = self.artifact.features.iter().copied();
        if self.artifact.feature_importances.is_empty() {
            features.map(|f| (f, 1.0)).collect()
        } else {
            features
                .zip(self.artifact.feature_importances.iter().copied())
                .collect()
        }
    }
}
