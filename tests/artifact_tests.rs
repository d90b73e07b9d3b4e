// Artifact loading round trips through real files

use bei_engine::core::{
    CategoryVocabulary, DecisionTree, GradientBoosted, PricePredictor, RandomForest, RidgeModel,
    StandardScaler,
};
use bei_engine::models::{FeatureVector, ModelMetrics, PropertyRequest, SummaryStats, FEATURE_COUNT};
use bei_engine::services::{ArtifactError, ArtifactStore, ModelBundle};
use chrono::Utc;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

fn bundle() -> ModelBundle {
    ModelBundle {
        forest: RandomForest {
            trees: vec![
                DecisionTree::leaf(1.9e7),
                DecisionTree::leaf(2.0e7),
                DecisionTree::leaf(2.1e7),
            ],
            feature_importances: vec![0.1; FEATURE_COUNT],
        },
        boosted: GradientBoosted {
            base_score: 2.1e7,
            trees: vec![],
        },
        linear: RidgeModel {
            coefficients: vec![0.0; FEATURE_COUNT],
            intercept: 1.9e7,
        },
        scaler: StandardScaler::identity(FEATURE_COUNT),
    }
}

fn stats() -> SummaryStats {
    let mut location_premium = HashMap::new();
    location_premium.insert("Kilimani".to_string(), 0.15);

    SummaryStats {
        location_premium,
        property_premium: HashMap::new(),
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

fn write_artifacts(dir: &Path) {
    let property_types =
        CategoryVocabulary::from_labels(vec!["Apartment".to_string(), "Townhouse".to_string()]);
    let locations =
        CategoryVocabulary::from_labels(vec!["Karen".to_string(), "Kilimani".to_string()]);
    let feature_names: Vec<String> = FeatureVector::FEATURE_NAMES
        .iter()
        .map(|s| s.to_string())
        .collect();

    fs::write(dir.join("models.json"), serde_json::to_string(&bundle()).unwrap()).unwrap();
    fs::write(
        dir.join("property_types.json"),
        serde_json::to_string(&property_types).unwrap(),
    )
    .unwrap();
    fs::write(dir.join("locations.json"), serde_json::to_string(&locations).unwrap()).unwrap();
    fs::write(
        dir.join("feature_names.json"),
        serde_json::to_string(&feature_names).unwrap(),
    )
    .unwrap();
    fs::write(dir.join("stats.json"), serde_json::to_string(&stats()).unwrap()).unwrap();
}

#[test]
fn test_load_and_predict_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(dir.path());

    let bank = ArtifactStore::new(dir.path()).load().unwrap();
    let predictor = PricePredictor::with_default_weights(Arc::new(bank));

    let request = PropertyRequest {
        property_type: "Apartment".to_string(),
        location: "Kilimani".to_string(),
        bedrooms: 3,
        bathrooms: 2,
        house_size: Some(150.0),
        land_size: Some(0.0),
    };

    let result = predictor.predict(&request).unwrap();
    // forest mean 2.0e7, boosted 2.1e7, ridge 1.9e7
    assert_eq!(result.predicted_price, 2.01e7);
    assert!(result.price_range_min <= result.predicted_price);
    assert!(result.predicted_price <= result.price_range_max);
}

#[test]
fn test_missing_artifact_refuses_to_load() {
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(dir.path());
    fs::remove_file(dir.path().join("stats.json")).unwrap();

    let err = ArtifactStore::new(dir.path()).load().unwrap_err();
    assert!(matches!(err, ArtifactError::Io { .. }));
}

#[test]
fn test_corrupt_artifact_refuses_to_load() {
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(dir.path());
    fs::write(dir.path().join("models.json"), "{not json").unwrap();

    let err = ArtifactStore::new(dir.path()).load().unwrap_err();
    assert!(matches!(err, ArtifactError::Parse { .. }));
}

#[test]
fn test_feature_name_mismatch_refuses_to_load() {
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(dir.path());
    fs::write(
        dir.path().join("feature_names.json"),
        serde_json::to_string(&vec!["wrong", "order"]).unwrap(),
    )
    .unwrap();

    let err = ArtifactStore::new(dir.path()).load().unwrap_err();
    assert!(matches!(err, ArtifactError::Inconsistent(_)));
}

#[test]
fn test_malformed_tree_refuses_to_load() {
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(dir.path());

    // parseable bundle whose first tree splits past the row width
    let mut bad = bundle();
    bad.forest.trees[0] = DecisionTree::stump(15, 100.0, 1.9e7, 2.1e7);
    fs::write(dir.path().join("models.json"), serde_json::to_string(&bad).unwrap()).unwrap();

    let err = ArtifactStore::new(dir.path()).load().unwrap_err();
    assert!(matches!(err, ArtifactError::Inconsistent(_)));
}

#[test]
fn test_empty_vocabulary_refuses_to_load() {
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(dir.path());
    fs::write(dir.path().join("locations.json"), "[]").unwrap();

    let err = ArtifactStore::new(dir.path()).load().unwrap_err();
    assert!(matches!(err, ArtifactError::Inconsistent(_)));
}
