use crate::models::{PredictionResult, PropertyRequest};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use thiserror::Error;
use uuid::Uuid;

/// Errors a prediction sink can report
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A stored prediction: the request, the result summary and call metadata
///
/// This is the persistence contract only; the engine never writes
/// storage itself. The hosting system picks the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub id: Uuid,
    #[serde(rename = "recordedAt")]
    pub recorded_at: DateTime<Utc>,
    #[serde(rename = "clientIp", skip_serializing_if = "Option::is_none")]
    pub client_ip: Option<String>,
    #[serde(rename = "sessionId", skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub request: PropertyRequest,
    #[serde(rename = "predictedPrice")]
    pub predicted_price: f64,
    #[serde(rename = "confidenceScore")]
    pub confidence_score: f64,
    #[serde(rename = "priceRangeMin")]
    pub price_range_min: f64,
    #[serde(rename = "priceRangeMax")]
    pub price_range_max: f64,
}

impl PredictionRecord {
    pub fn new(request: PropertyRequest, result: &PredictionResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            recorded_at: Utc::now(),
            client_ip: None,
            session_id: None,
            request,
            predicted_price: result.predicted_price,
            confidence_score: result.confidence_score,
            price_range_min: result.price_range_min,
            price_range_max: result.price_range_max,
        }
    }

    pub fn with_client_ip(mut self, client_ip: impl Into<String>) -> Self {
        self.client_ip = Some(client_ip.into());
        self
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}

/// Destination for prediction records
pub trait PredictionSink {
    fn store(&self, record: PredictionRecord) -> Result<(), SinkError>;
}

/// In-memory sink used by tests and local runs
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<PredictionRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn records(&self) -> Vec<PredictionRecord> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl PredictionSink for MemorySink {
    fn store(&self, record: PredictionRecord) -> Result<(), SinkError> {
        self.records
            .lock()
            .map_err(|_| SinkError::Unavailable("record lock poisoned".to_string()))?
            .push(record);
        Ok(())
    }
}
