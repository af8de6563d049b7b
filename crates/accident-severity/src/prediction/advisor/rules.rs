use super::super::domain::{AreaType, FeatureRecord};

pub const HIGH_SPEED_THRESHOLD_KMH: u16 = 80;
pub const NO_RISK_FACTORS: &str = "No major risk factors detected";

/// Heuristic risk factor checked against the driver's inputs.
struct RiskRule {
    explanation: &'static str,
    applies: fn(&FeatureRecord) -> bool,
}

// Evaluated independently, in priority order.
const RISK_RULES: [RiskRule; 4] = [
    RiskRule {
        explanation: "High driving speed",
        applies: |record| record.speed_limit.kmh() >= HIGH_SPEED_THRESHOLD_KMH,
    },
    RiskRule {
        explanation: "Night-time driving",
        applies: |record| record.hour.is_night(),
    },
    RiskRule {
        explanation: "Adverse weather conditions",
        applies: |record| record.weather_conditions.is_adverse(),
    },
    RiskRule {
        explanation: "Rural road environment",
        applies: |record| record.urban_or_rural_area == AreaType::Rural,
    },
];

/// Risk explanations for the record. Never consults the model output.
pub(crate) fn explain(record: &FeatureRecord) -> Vec<String> {
    let reasons: Vec<String> = RISK_RULES
        .iter()
        .filter(|rule| (rule.applies)(record))
        .map(|rule| rule.explanation.to_string())
        .collect();

    if reasons.is_empty() {
        vec![NO_RISK_FACTORS.to_string()]
    } else {
        reasons
    }
}
