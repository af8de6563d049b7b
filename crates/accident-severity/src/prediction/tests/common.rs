use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::response::Response;
use chrono::{TimeZone, Utc};
use serde_json::Value;

use crate::prediction::{
    ClassProbabilities, DrivingConditions, FeatureRecord, InputAssembler, ModelMetadata,
    ModelOracle, OracleError, ScenarioDefaults, SeverityPredictionService,
};

pub(super) fn conditions(
    day_of_week: &str,
    hour: i64,
    weather_conditions: &str,
    speed_limit: i64,
    urban_or_rural_area: &str,
) -> DrivingConditions {
    DrivingConditions {
        day_of_week: day_of_week.to_string(),
        hour,
        weather_conditions: weather_conditions.to_string(),
        speed_limit,
        urban_or_rural_area: urban_or_rural_area.to_string(),
    }
}

pub(super) fn risky_conditions() -> DrivingConditions {
    conditions("Saturday", 22, "Rain", 100, "Rural")
}

pub(super) fn calm_conditions() -> DrivingConditions {
    conditions("Wednesday", 12, "Fine", 30, "Urban")
}

pub(super) fn record_for(conditions: &DrivingConditions) -> FeatureRecord {
    InputAssembler::new(ScenarioDefaults::default())
        .assemble_conditions(conditions)
        .expect("fixture conditions are valid")
}

pub(super) fn distribution(entries: &[(&str, f64)]) -> ClassProbabilities {
    entries
        .iter()
        .map(|(label, probability)| (label.to_string(), *probability))
        .collect()
}

pub(super) fn standard_classes() -> Vec<String> {
    vec![
        "Fatal".to_string(),
        "Serious".to_string(),
        "Slight".to_string(),
    ]
}

/// Oracle double returning a fixed label and distribution.
pub(super) struct StubOracle {
    classes: Vec<String>,
    label: String,
    probabilities: ClassProbabilities,
    calls: AtomicUsize,
}

impl StubOracle {
    pub(super) fn new(label: &str, entries: &[(&str, f64)]) -> Self {
        Self::with_classes(standard_classes(), label, entries)
    }

    pub(super) fn with_classes(
        classes: Vec<String>,
        label: &str,
        entries: &[(&str, f64)],
    ) -> Self {
        Self {
            classes,
            label: label.to_string(),
            probabilities: distribution(entries),
            calls: AtomicUsize::new(0),
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ModelOracle for StubOracle {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn predict(&self, _record: &FeatureRecord) -> Result<String, OracleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.label.clone())
    }

    fn predict_proba(&self, _record: &FeatureRecord) -> Result<ClassProbabilities, OracleError> {
        Ok(self.probabilities.clone())
    }

    fn metadata(&self) -> ModelMetadata {
        ModelMetadata {
            name: "stub".to_string(),
            version: "test".to_string(),
            source: "<memory>".to_string(),
            classes: self.classes.clone(),
            loaded_at: Utc
                .with_ymd_and_hms(2024, 6, 1, 0, 0, 0)
                .single()
                .expect("valid timestamp"),
        }
    }
}

/// Oracle double whose evaluation always fails.
pub(super) struct FailingOracle {
    classes: Vec<String>,
}

impl Default for FailingOracle {
    fn default() -> Self {
        Self {
            classes: standard_classes(),
        }
    }
}

impl ModelOracle for FailingOracle {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn predict(&self, _record: &FeatureRecord) -> Result<String, OracleError> {
        Err(OracleError::Evaluation("weights unavailable".to_string()))
    }

    fn predict_proba(&self, _record: &FeatureRecord) -> Result<ClassProbabilities, OracleError> {
        Err(OracleError::Evaluation("weights unavailable".to_string()))
    }

    fn metadata(&self) -> ModelMetadata {
        ModelMetadata {
            name: "failing".to_string(),
            version: "test".to_string(),
            source: "<memory>".to_string(),
            classes: self.classes.clone(),
            loaded_at: Utc::now(),
        }
    }
}

pub(super) fn slight_oracle() -> StubOracle {
    StubOracle::new("Slight", &[("Slight", 0.6), ("Serious", 0.3), ("Fatal", 0.1)])
}

pub(super) fn build_service<O: ModelOracle + 'static>(oracle: O) -> SeverityPredictionService<O> {
    SeverityPredictionService::new(Arc::new(oracle), ScenarioDefaults::default())
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
