mod linear;

pub use linear::{LinearSeverityModel, ModelLoadError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{ClassProbabilities, FeatureRecord};

/// Pre-trained severity classifier consulted for every prediction.
///
/// Implementations are loaded once and shared read-only between requests.
pub trait ModelOracle: Send + Sync {
    /// Known class labels, in the model's own order.
    fn classes(&self) -> &[String];

    /// Single most likely label for the record.
    fn predict(&self, record: &FeatureRecord) -> Result<String, OracleError>;

    /// Full distribution over [`ModelOracle::classes`].
    fn predict_proba(&self, record: &FeatureRecord) -> Result<ClassProbabilities, OracleError>;

    fn metadata(&self) -> ModelMetadata;
}

/// Descriptive information about a loaded model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub name: String,
    pub version: String,
    pub source: String,
    pub classes: Vec<String>,
    pub loaded_at: DateTime<Utc>,
}

/// Failure raised by a model while scoring a record.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OracleError {
    #[error("model produced no score for any class")]
    NoClasses,
    #[error("model evaluation failed: {0}")]
    Evaluation(String),
}
