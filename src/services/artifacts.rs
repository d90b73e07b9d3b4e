use crate::core::{
    CategoryVocabulary, DecisionTree, GradientBoosted, RandomForest, RidgeModel, StandardScaler,
};
use crate::models::{FeatureVector, SummaryStats, FEATURE_COUNT};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Artifact file names produced by the offline training job
const MODELS_FILE: &str = "models.json";
const PROPERTY_TYPES_FILE: &str = "property_types.json";
const LOCATIONS_FILE: &str = "locations.json";
const FEATURE_NAMES_FILE: &str = "feature_names.json";
const STATS_FILE: &str = "stats.json";

/// Errors that can occur while loading model artifacts
///
/// All of these are fatal at startup: the process must not enter the
/// serving state with a partial or inconsistent bank.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read artifact '{name}': {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse artifact '{name}': {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("inconsistent artifacts: {0}")]
    Inconsistent(String),
}

/// The fitted estimators bundled into a single artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelBundle {
    pub forest: RandomForest,
    pub boosted: GradientBoosted,
    pub linear: RidgeModel,
    pub scaler: StandardScaler,
}

/// All fitted state the engine needs, loaded once at startup
///
/// Immutable after construction; shared read-only across callers via
/// `Arc`. Replacing the models means restarting the process with a new
/// artifact set.
#[derive(Debug, Clone)]
pub struct ModelBank {
    pub forest: RandomForest,
    pub boosted: GradientBoosted,
    pub linear: RidgeModel,
    pub scaler: StandardScaler,
    pub property_types: CategoryVocabulary,
    pub locations: CategoryVocabulary,
    pub feature_names: Vec<String>,
    pub stats: SummaryStats,
}

impl ModelBank {
    /// Assemble a bank from already-deserialized parts, enforcing the
    /// cross-artifact consistency rules
    pub fn from_parts(
        bundle: ModelBundle,
        property_types: CategoryVocabulary,
        locations: CategoryVocabulary,
        feature_names: Vec<String>,
        stats: SummaryStats,
    ) -> Result<Self, ArtifactError> {
        if feature_names != FeatureVector::FEATURE_NAMES {
            return Err(ArtifactError::Inconsistent(format!(
                "feature names do not match the expected ordering: got {:?}",
                feature_names
            )));
        }
        if bundle.forest.trees.is_empty() {
            return Err(ArtifactError::Inconsistent(
                "random forest has no trees".to_string(),
            ));
        }
        if bundle.forest.feature_importances.len() != FEATURE_COUNT {
            return Err(ArtifactError::Inconsistent(format!(
                "expected {} feature importances, got {}",
                FEATURE_COUNT,
                bundle.forest.feature_importances.len()
            )));
        }
        if bundle
            .forest
            .feature_importances
            .iter()
            .any(|w| !w.is_finite() || *w < 0.0)
        {
            return Err(ArtifactError::Inconsistent(
                "feature importances must be finite and non-negative".to_string(),
            ));
        }
        if bundle.linear.coefficients.len() != FEATURE_COUNT {
            return Err(ArtifactError::Inconsistent(format!(
                "expected {} ridge coefficients, got {}",
                FEATURE_COUNT,
                bundle.linear.coefficients.len()
            )));
        }
        if bundle.scaler.mean.len() != FEATURE_COUNT || bundle.scaler.scale.len() != FEATURE_COUNT
        {
            return Err(ArtifactError::Inconsistent(
                "scaler dimensions do not match the feature count".to_string(),
            ));
        }
        if bundle.scaler.scale.iter().any(|s| !s.is_finite() || *s == 0.0) {
            return Err(ArtifactError::Inconsistent(
                "scaler scale entries must be finite and non-zero".to_string(),
            ));
        }
        if property_types.is_empty() || locations.is_empty() {
            return Err(ArtifactError::Inconsistent(
                "category vocabularies must not be empty".to_string(),
            ));
        }
        for tree in &bundle.forest.trees {
            validate_tree("random forest", tree)?;
        }
        for tree in &bundle.boosted.trees {
            validate_tree("gradient-boosted model", tree)?;
        }

        Ok(Self {
            forest: bundle.forest,
            boosted: bundle.boosted,
            linear: bundle.linear,
            scaler: bundle.scaler,
            property_types,
            locations,
            feature_names,
            stats,
        })
    }
}

/// Structural check of one fitted tree
///
/// A tree that splits on a feature outside the row width, or whose
/// child indices leave the node array or point backwards (a cycle),
/// would only blow up on the first prediction that reaches the bad
/// node. Children must point strictly forward; the root is node 0, so
/// forward-only edges guarantee every walk terminates.
fn validate_tree(context: &str, tree: &DecisionTree) -> Result<(), ArtifactError> {
    if tree.nodes.is_empty() {
        return Err(ArtifactError::Inconsistent(format!(
            "{} contains a tree with no nodes",
            context
        )));
    }
    for (idx, node) in tree.nodes.iter().enumerate() {
        if node.feature < 0 {
            continue;
        }
        if node.feature as usize >= FEATURE_COUNT {
            return Err(ArtifactError::Inconsistent(format!(
                "{} splits on feature {} but rows carry only {} features",
                context, node.feature, FEATURE_COUNT
            )));
        }
        let (left, right) = (node.left as usize, node.right as usize);
        if left >= tree.nodes.len() || right >= tree.nodes.len() {
            return Err(ArtifactError::Inconsistent(format!(
                "{} node {} has a child outside the node array",
                context, idx
            )));
        }
        if left <= idx || right <= idx {
            return Err(ArtifactError::Inconsistent(format!(
                "{} node {} has a child pointing backwards",
                context, idx
            )));
        }
    }
    Ok(())
}

/// Loads the five training artifacts from a directory
///
/// Any missing, corrupt or mutually inconsistent artifact fails the
/// whole load; there is no partial bank and no per-request retry.
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self) -> Result<ModelBank, ArtifactError> {
        let bundle: ModelBundle = self.read_json(MODELS_FILE)?;
        let property_types: CategoryVocabulary = self.read_json(PROPERTY_TYPES_FILE)?;
        let locations: CategoryVocabulary = self.read_json(LOCATIONS_FILE)?;
        let feature_names: Vec<String> = self.read_json(FEATURE_NAMES_FILE)?;
        let stats: SummaryStats = self.read_json(STATS_FILE)?;

        let bank = ModelBank::from_parts(bundle, property_types, locations, feature_names, stats)?;

        info!(
            trees = bank.forest.num_trees(),
            property_types = bank.property_types.len(),
            locations = bank.locations.len(),
            "model bank loaded from {}",
            self.dir.display()
        );

        Ok(bank)
    }

    fn read_json<T: serde::de::DeserializeOwned>(&self, name: &str) -> Result<T, ArtifactError> {
        let path = self.dir.join(name);
        let raw = fs::read_to_string(&path).map_err(|source| ArtifactError::Io {
            name: name.to_string(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ArtifactError::Parse {
            name: name.to_string(),
            source,
        })
    }
}

/// Stub banks for tests and benchmarks
pub mod test_support {
    use super::*;
    use crate::core::DecisionTree;
    use crate::models::ModelMetrics;
    use chrono::Utc;
    use std::collections::HashMap;

    /// Importance weights summing to 1 over the ten features
    fn stub_importances() -> Vec<f64> {
        vec![0.05, 0.30, 0.15, 0.05, 0.25, 0.05, 0.02, 0.08, 0.03, 0.02]
    }

    fn stub_stats() -> SummaryStats {
        let mut location_premium = HashMap::new();
        location_premium.insert("Kilimani".to_string(), 0.15);
        location_premium.insert("Karen".to_string(), 0.35);
        let mut property_premium = HashMap::new();
        property_premium.insert("Apartment".to_string(), -0.05);
        property_premium.insert("Townhouse".to_string(), 0.10);

        SummaryStats {
            location_premium,
            property_premium,
            median_house_size: 180.0,
            median_land_size: 500.0,
            metrics: ModelMetrics {
                model_version: "v1.0".to_string(),
                mae: 1.2e6,
                rmse: 2.4e6,
                r2_score: 0.87,
                mape: 11.5,
                trained_at: Utc::now(),
            },
        }
    }

    fn stub_vocabularies() -> (CategoryVocabulary, CategoryVocabulary) {
        let property_types = CategoryVocabulary::from_labels(vec![
            "Apartment".to_string(),
            "Townhouse".to_string(),
            "Vacant Land".to_string(),
            "Commercial Property".to_string(),
            "Industrial Property".to_string(),
        ]);
        let locations = CategoryVocabulary::from_labels(vec![
            "Karen".to_string(),
            "Kilimani".to_string(),
            "Lavington".to_string(),
            "Runda".to_string(),
            "Westlands".to_string(),
        ]);
        (property_types, locations)
    }

    /// Bank whose forest trees each vote one of `tree_values`, with
    /// fixed boosted and ridge outputs and an identity scaler
    pub fn stub_bank_with_trees(tree_values: &[f64], boosted: f64, ridge: f64) -> ModelBank {
        let bundle = ModelBundle {
            forest: RandomForest {
                trees: tree_values.iter().map(|v| DecisionTree::leaf(*v)).collect(),
                feature_importances: stub_importances(),
            },
            boosted: GradientBoosted {
                base_score: boosted,
                trees: vec![],
            },
            linear: RidgeModel {
                coefficients: vec![0.0; FEATURE_COUNT],
                intercept: ridge,
            },
            scaler: StandardScaler::identity(FEATURE_COUNT),
        };

        let (property_types, locations) = stub_vocabularies();
        ModelBank::from_parts(
            bundle,
            property_types,
            locations,
            FeatureVector::FEATURE_NAMES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            stub_stats(),
        )
        .expect("stub bank must be consistent")
    }

    /// Bank returning fixed predictions from all three members
    pub fn stub_bank(forest: f64, boosted: f64, ridge: f64) -> ModelBank {
        stub_bank_with_trees(&[forest; 10], boosted, ridge)
    }
}
