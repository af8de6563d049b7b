use std::sync::Arc;

use tracing::{info, warn};

use super::advisor::{AdvisoryError, SeverityAdvisor};
use super::assembler::{InputAssembler, InputError};
use super::domain::{ClassProbabilities, DrivingConditions, ScenarioDefaults};
use super::oracle::{ModelMetadata, ModelOracle, OracleError};
use super::report::SeverityAssessment;

/// Service composing the input assembler, the injected model and the advisor.
pub struct SeverityPredictionService<O> {
    oracle: Arc<O>,
    assembler: InputAssembler,
    advisor: SeverityAdvisor,
}

impl<O> SeverityPredictionService<O>
where
    O: ModelOracle + 'static,
{
    pub fn new(oracle: Arc<O>, scenario: ScenarioDefaults) -> Self {
        Self {
            oracle,
            assembler: InputAssembler::new(scenario),
            advisor: SeverityAdvisor::new(),
        }
    }

    /// Predict the severity for the submitted conditions and assemble the display payload.
    pub fn assess(
        &self,
        conditions: DrivingConditions,
    ) -> Result<SeverityAssessment, PredictionServiceError> {
        let record = self
            .assembler
            .assemble_conditions(&conditions)
            .inspect_err(|error| {
                warn!(field = error.field(), %error, "rejected driving conditions")
            })?;

        let label = self.oracle.predict(&record)?;
        let probabilities = self.oracle.predict_proba(&record)?;
        let classes = self.oracle.classes();

        let outcome = ensure_known_classes(classes, &probabilities)
            .and_then(|()| self.advisor.advise(&record, &label, &probabilities))
            .inspect_err(|error| warn!(%label, %error, "inconsistent model output"))?;

        info!(
            label = %outcome.label,
            confidence = outcome.confidence,
            risk_factors = outcome.explanations.len(),
            conditions = %record,
            "severity assessed"
        );

        Ok(SeverityAssessment::new(record, outcome, classes))
    }

    pub fn model_summary(&self) -> ModelMetadata {
        self.oracle.metadata()
    }

    pub fn assembler(&self) -> &InputAssembler {
        &self.assembler
    }
}

/// The distribution must carry exactly one entry per model class.
fn ensure_known_classes(
    classes: &[String],
    probabilities: &ClassProbabilities,
) -> Result<(), AdvisoryError> {
    let matches = probabilities.len() == classes.len()
        && classes.iter().all(|class| probabilities.contains_key(class));

    if matches {
        Ok(())
    } else {
        Err(AdvisoryError::ClassMismatch {
            expected: classes.to_vec(),
            actual: probabilities.keys().cloned().collect(),
        })
    }
}

/// Error raised by the prediction service.
#[derive(Debug, thiserror::Error)]
pub enum PredictionServiceError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),
    #[error(transparent)]
    InconsistentOracleOutput(#[from] AdvisoryError),
    #[error(transparent)]
    Oracle(#[from] OracleError),
}
