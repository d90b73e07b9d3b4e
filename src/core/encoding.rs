use crate::core::PredictionError;
use serde::{Deserialize, Serialize};

/// Closed set of category labels a model was trained on
///
/// The code of a label is its index in the trained ordering. Labels
/// outside the set are rejected; the engine never guesses a fallback
/// code for unseen categories.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryVocabulary {
    labels: Vec<String>,
}

impl CategoryVocabulary {
    pub fn from_labels(labels: Vec<String>) -> Self {
        Self { labels }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Integer code for a trained label, if present
    pub fn code(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Encode a label, reporting the offending field on failure
    pub fn encode(&self, field: &str, label: &str) -> Result<usize, PredictionError> {
        self.code(label).ok_or_else(|| PredictionError::UnknownCategory {
            field: field.to_string(),
            value: label.to_string(),
        })
    }
}
