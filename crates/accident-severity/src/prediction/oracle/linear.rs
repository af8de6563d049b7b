use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;

use super::{ModelMetadata, ModelOracle, OracleError};
use crate::prediction::domain::{
    AreaType, ClassProbabilities, DayOfWeek, FeatureRecord, FeatureValue, LightCondition,
    WeatherCondition,
};

/// Serialized form of the multinomial logistic model.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ModelArtifact {
    #[serde(default = "default_model_name")]
    name: String,
    #[serde(default)]
    version: String,
    classes: Vec<String>,
    #[serde(default)]
    intercepts: BTreeMap<String, f64>,
    /// feature -> class -> weight per unit of the feature value
    #[serde(default)]
    numeric: BTreeMap<String, BTreeMap<String, f64>>,
    /// feature -> level -> class -> weight added when the record has that level
    #[serde(default)]
    categorical: BTreeMap<String, BTreeMap<String, BTreeMap<String, f64>>>,
}

fn default_model_name() -> String {
    "accident-severity".to_string()
}

/// Multinomial logistic classifier over the feature record, loaded from a JSON artifact.
#[derive(Debug, Clone)]
pub struct LinearSeverityModel {
    name: String,
    version: String,
    source: String,
    loaded_at: DateTime<Utc>,
    classes: Vec<String>,
    intercepts: Vec<f64>,
    numeric: HashMap<String, Vec<f64>>,
    categorical: HashMap<String, HashMap<String, Vec<f64>>>,
}

impl LinearSeverityModel {
    /// Load the artifact from disk. A missing file is reported as [`ModelLoadError::NotFound`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ModelLoadError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ModelLoadError::NotFound {
                path: path.to_path_buf(),
            });
        }

        // Directories and unreadable files fail here, not as malformed JSON.
        let raw = fs::read_to_string(path).map_err(|source| ModelLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let model = Self::from_reader(raw.as_bytes(), path.display().to_string())?;
        info!(
            model = %model.name,
            version = %model.version,
            path = %path.display(),
            "severity model loaded"
        );
        Ok(model)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        source: impl Into<String>,
    ) -> Result<Self, ModelLoadError> {
        let source = source.into();
        let artifact: ModelArtifact =
            serde_json::from_reader(reader).map_err(|error| ModelLoadError::Malformed {
                origin: source.clone(),
                error,
            })?;
        Self::from_artifact(artifact, source)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ModelLoadError> {
        Self::from_reader(raw.as_bytes(), "<inline>")
    }

    fn from_artifact(artifact: ModelArtifact, source: String) -> Result<Self, ModelLoadError> {
        let ModelArtifact {
            name,
            version,
            classes,
            intercepts,
            numeric,
            categorical,
        } = artifact;

        if classes.is_empty() {
            return Err(ModelLoadError::Invalid(
                "artifact declares no classes".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for class in &classes {
            if !seen.insert(class.as_str()) {
                return Err(ModelLoadError::Invalid(format!(
                    "class '{class}' is declared more than once"
                )));
            }
        }

        let intercepts = class_vector(&classes, &intercepts, "intercepts")?;

        let mut numeric_weights = HashMap::new();
        for (feature, weights) in &numeric {
            if !FeatureRecord::NUMERIC_FEATURES.contains(&feature.as_str()) {
                return Err(ModelLoadError::Invalid(format!(
                    "'{feature}' is not a numeric feature"
                )));
            }
            let context = format!("numeric.{feature}");
            numeric_weights.insert(feature.clone(), class_vector(&classes, weights, &context)?);
        }

        let mut categorical_weights = HashMap::new();
        for (feature, levels) in &categorical {
            if !FeatureRecord::CATEGORICAL_FEATURES.contains(&feature.as_str()) {
                return Err(ModelLoadError::Invalid(format!(
                    "'{feature}' is not a categorical feature"
                )));
            }
            let known = known_levels(feature);
            let mut level_weights = HashMap::new();
            for (level, weights) in levels {
                if let Some(known) = &known {
                    if !known.contains(&level.as_str()) {
                        return Err(ModelLoadError::Invalid(format!(
                            "'{level}' is not a level of {feature}, expected one of {}",
                            known.join(", ")
                        )));
                    }
                }
                let context = format!("categorical.{feature}.{level}");
                level_weights.insert(level.clone(), class_vector(&classes, weights, &context)?);
            }
            categorical_weights.insert(feature.clone(), level_weights);
        }

        Ok(Self {
            name,
            version,
            source,
            loaded_at: Utc::now(),
            classes,
            intercepts,
            numeric: numeric_weights,
            categorical: categorical_weights,
        })
    }

    fn logits(&self, record: &FeatureRecord) -> Vec<f64> {
        let mut logits = self.intercepts.clone();

        for (feature, value) in record.features() {
            let weights = match value {
                FeatureValue::Numeric(amount) => self
                    .numeric
                    .get(feature)
                    .map(|weights| (weights, amount)),
                FeatureValue::Categorical(level) => self
                    .categorical
                    .get(feature)
                    .and_then(|levels| levels.get(level))
                    .map(|weights| (weights, 1.0)),
            };

            if let Some((weights, scale)) = weights {
                for (logit, weight) in logits.iter_mut().zip(weights) {
                    *logit += weight * scale;
                }
            }
        }

        logits
    }

    fn probabilities(&self, record: &FeatureRecord) -> Result<Vec<f64>, OracleError> {
        let logits = self.logits(record);
        if logits.iter().any(|logit| !logit.is_finite()) {
            return Err(OracleError::Evaluation(
                "non-finite logit produced".to_string(),
            ));
        }

        let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exps: Vec<f64> = logits.iter().map(|logit| (logit - max).exp()).collect();
        let total: f64 = exps.iter().sum();

        Ok(exps.into_iter().map(|value| value / total).collect())
    }
}

impl ModelOracle for LinearSeverityModel {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn predict(&self, record: &FeatureRecord) -> Result<String, OracleError> {
        let probabilities = self.probabilities(record)?;

        let mut best: Option<(usize, f64)> = None;
        for (index, probability) in probabilities.into_iter().enumerate() {
            match best {
                Some((_, current)) if probability <= current => {}
                _ => best = Some((index, probability)),
            }
        }

        best.map(|(index, _)| self.classes[index].clone())
            .ok_or(OracleError::NoClasses)
    }

    fn predict_proba(&self, record: &FeatureRecord) -> Result<ClassProbabilities, OracleError> {
        let probabilities = self.probabilities(record)?;
        Ok(self
            .classes
            .iter()
            .cloned()
            .zip(probabilities)
            .collect())
    }

    fn metadata(&self) -> ModelMetadata {
        ModelMetadata {
            name: self.name.clone(),
            version: self.version.clone(),
            source: self.source.clone(),
            classes: self.classes.clone(),
            loaded_at: self.loaded_at,
        }
    }
}

/// Levels a record can carry for enum-backed columns; `None` for free-text scenario columns.
fn known_levels(feature: &str) -> Option<Vec<&'static str>> {
    match feature {
        "day_of_week" => Some(DayOfWeek::ALL.iter().map(DayOfWeek::label).collect()),
        "weather_conditions" => Some(
            WeatherCondition::ALL
                .iter()
                .map(WeatherCondition::label)
                .collect(),
        ),
        "light_conditions" => Some(
            [LightCondition::Daylight, LightCondition::Darkness]
                .iter()
                .map(LightCondition::label)
                .collect(),
        ),
        "urban_or_rural_area" => Some(AreaType::ALL.iter().map(AreaType::label).collect()),
        _ => None,
    }
}

/// Reorder per-class weights to the model's class order; missing classes weigh zero.
fn class_vector(
    classes: &[String],
    weights: &BTreeMap<String, f64>,
    context: &str,
) -> Result<Vec<f64>, ModelLoadError> {
    if let Some(unknown) = weights.keys().find(|key| !classes.contains(*key)) {
        return Err(ModelLoadError::Invalid(format!(
            "{context} references unknown class '{unknown}'"
        )));
    }
    if let Some((class, _)) = weights.iter().find(|(_, weight)| !weight.is_finite()) {
        return Err(ModelLoadError::Invalid(format!(
            "{context} has a non-finite weight for '{class}'"
        )));
    }

    Ok(classes
        .iter()
        .map(|class| weights.get(class).copied().unwrap_or(0.0))
        .collect())
}

/// Failure to bring the severity model online.
#[derive(Debug, thiserror::Error)]
pub enum ModelLoadError {
    #[error("model artifact not found at {}", .path.display())]
    NotFound { path: PathBuf },
    #[error("unable to read model artifact {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("model artifact {origin} is not valid JSON: {error}")]
    Malformed {
        origin: String,
        #[source]
        error: serde_json::Error,
    },
    #[error("model artifact is invalid: {0}")]
    Invalid(String),
}
