const SLIGHT_ADVICE: [&str; 2] = [
    "Maintain safe driving behaviour",
    "Continue to follow traffic regulations",
];

const SERIOUS_ADVICE: [&str; 3] = [
    "Reduce speed",
    "Increase attention while driving",
    "Maintain a safe distance from other vehicles",
];

const FATAL_ADVICE: [&str; 3] = [
    "Avoid unnecessary travel if possible",
    "Drive at reduced speed with extreme caution",
    "Follow all traffic safety guidelines",
];

/// Safety recommendations for a predicted label.
///
/// Any label other than `Slight` or `Serious` receives the fatal guidance, including labels
/// the model was not expected to produce.
pub(crate) fn advice_for(label: &str) -> &'static [&'static str] {
    match label {
        "Slight" => &SLIGHT_ADVICE,
        "Serious" => &SERIOUS_ADVICE,
        _ => &FATAL_ADVICE,
    }
}
