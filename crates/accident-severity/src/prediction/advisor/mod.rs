mod advice;
mod rules;

use super::domain::{ClassProbabilities, FeatureRecord, PredictionOutcome};
use tracing::debug;

pub(crate) use advice::advice_for;
pub use rules::{HIGH_SPEED_THRESHOLD_KMH, NO_RISK_FACTORS};

/// Allowed drift of a probability distribution's total from 1.0.
pub const PROBABILITY_SUM_TOLERANCE: f64 = 1e-6;

/// Stateless advisor turning a model prediction into confidence, explanations and advice.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeverityAdvisor;

impl SeverityAdvisor {
    pub fn new() -> Self {
        Self
    }

    pub fn advise(
        &self,
        record: &FeatureRecord,
        label: &str,
        probabilities: &ClassProbabilities,
    ) -> Result<PredictionOutcome, AdvisoryError> {
        let confidence = confidence(label, probabilities)?;
        let explanations = rules::explain(record);
        let advice = advice_for(label)
            .iter()
            .map(|line| line.to_string())
            .collect();

        debug!(label, confidence, factors = explanations.len(), "advised on prediction");

        Ok(PredictionOutcome {
            label: label.to_string(),
            class_probabilities: probabilities.clone(),
            confidence,
            explanations,
            advice,
        })
    }
}

/// Highest class probability as a percentage, after checking the distribution is coherent.
pub fn confidence(label: &str, probabilities: &ClassProbabilities) -> Result<f64, AdvisoryError> {
    if probabilities.is_empty() {
        return Err(AdvisoryError::EmptyDistribution);
    }

    for (class, probability) in probabilities {
        if !probability.is_finite() || !(0.0..=1.0).contains(probability) {
            return Err(AdvisoryError::ProbabilityOutOfRange {
                label: class.clone(),
                probability: *probability,
            });
        }
    }

    if !probabilities.contains_key(label) {
        return Err(AdvisoryError::LabelMissing {
            label: label.to_string(),
        });
    }

    let total: f64 = probabilities.values().sum();
    if (total - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
        return Err(AdvisoryError::NotNormalized { total });
    }

    let max = probabilities.values().copied().fold(0.0_f64, f64::max);
    Ok(max * 100.0)
}

/// Model output that cannot be presented as a prediction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AdvisoryError {
    #[error("inconsistent oracle output: empty probability distribution")]
    EmptyDistribution,
    #[error("inconsistent oracle output: predicted label '{label}' has no probability")]
    LabelMissing { label: String },
    #[error("inconsistent oracle output: probability {probability} for '{label}' is outside [0, 1]")]
    ProbabilityOutOfRange { label: String, probability: f64 },
    #[error("inconsistent oracle output: probabilities sum to {total}, expected 1.0")]
    NotNormalized { total: f64 },
    #[error("inconsistent oracle output: distribution classes {actual:?} differ from model classes {expected:?}")]
    ClassMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },
}
