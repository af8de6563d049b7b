//! Driving-condition intake, model inference and rule-based explanation.

pub mod advisor;
pub mod assembler;
pub mod domain;
pub mod options;
pub mod oracle;
pub mod report;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use advisor::{confidence, AdvisoryError, SeverityAdvisor, PROBABILITY_SUM_TOLERANCE};
pub use assembler::{InputAssembler, InputError};
pub use domain::{
    AreaType, ClassProbabilities, DayOfWeek, DrivingConditions, FeatureRecord, FeatureValue,
    Hour, LightCondition, PredictionOutcome, ScenarioDefaults, SpeedLimit, WeatherCondition,
    DEFAULT_ROAD_SURFACE, DEFAULT_ROAD_TYPE, DEFAULT_SCENARIO_MONTH, DEFAULT_SCENARIO_YEAR,
};
pub use options::{FormOptions, HourRange};
pub use oracle::{LinearSeverityModel, ModelLoadError, ModelMetadata, ModelOracle, OracleError};
pub use report::{ProbabilityBar, SeverityAssessment, SeverityBanner, SeverityTone, DISCLAIMER};
pub use router::prediction_router;
pub use service::{PredictionServiceError, SeverityPredictionService};
