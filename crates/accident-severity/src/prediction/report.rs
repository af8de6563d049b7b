use serde::{Deserialize, Serialize};

use super::domain::{ClassProbabilities, FeatureRecord, PredictionOutcome};

pub const DISCLAIMER: &str = "This system is intended for academic and decision-support purposes only and does not guarantee accident prevention.";

const UNKNOWN_CLASS_COLOR: &str = "#6b7280";

/// Visual emphasis for the predicted severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityTone {
    Success,
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityBanner {
    pub tone: SeverityTone,
    pub headline: String,
}

impl SeverityBanner {
    /// Anything that is not `Slight` or `Serious` is presented as fatal.
    pub fn for_label(label: &str) -> Self {
        let (tone, headline) = match label {
            "Slight" => (SeverityTone::Success, "SLIGHT Accident Severity"),
            "Serious" => (SeverityTone::Warning, "SERIOUS Accident Severity"),
            _ => (SeverityTone::Critical, "FATAL Accident Severity"),
        };

        Self {
            tone,
            headline: headline.to_string(),
        }
    }
}

/// One bar of the class probability chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityBar {
    pub label: String,
    pub percent: f64,
    pub color: String,
}

pub fn class_color(label: &str) -> &'static str {
    match label {
        "Slight" => "#22c55e",
        "Serious" => "#f59e0b",
        "Fatal" => "#dc2626",
        _ => UNKNOWN_CLASS_COLOR,
    }
}

/// Chart bars following the model's class order.
pub fn probability_chart(
    classes: &[String],
    probabilities: &ClassProbabilities,
) -> Vec<ProbabilityBar> {
    classes
        .iter()
        .map(|class| ProbabilityBar {
            label: class.clone(),
            percent: probabilities.get(class).copied().unwrap_or(0.0) * 100.0,
            color: class_color(class).to_string(),
        })
        .collect()
}

/// Everything the form displays for a single prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityAssessment {
    pub record: FeatureRecord,
    pub outcome: PredictionOutcome,
    pub banner: SeverityBanner,
    pub confidence_display: String,
    pub chart: Vec<ProbabilityBar>,
    pub disclaimer: String,
}

impl SeverityAssessment {
    pub fn new(record: FeatureRecord, outcome: PredictionOutcome, classes: &[String]) -> Self {
        let banner = SeverityBanner::for_label(&outcome.label);
        let confidence_display = format!("{:.1}%", outcome.confidence);
        let chart = probability_chart(classes, &outcome.class_probabilities);

        Self {
            record,
            outcome,
            banner,
            confidence_display,
            chart,
            disclaimer: DISCLAIMER.to_string(),
        }
    }
}
