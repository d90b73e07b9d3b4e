// Service exports
pub mod artifacts;
pub mod sink;

pub use artifacts::{ArtifactError, ArtifactStore, ModelBank, ModelBundle};
pub use sink::{MemorySink, PredictionRecord, PredictionSink, SinkError};
