use accident_severity::config::AppConfig;
use accident_severity::error::AppError;
use accident_severity::prediction::{LinearSeverityModel, ModelOracle, SeverityPredictionService};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Load the severity model once and wire it into the prediction service.
///
/// A missing or unreadable artifact is fatal; nothing is served without a model.
pub(crate) fn prediction_service(
    config: &AppConfig,
    model_override: Option<PathBuf>,
) -> Result<SeverityPredictionService<LinearSeverityModel>, AppError> {
    let path = model_override.unwrap_or_else(|| config.model.artifact_path.clone());
    let model = LinearSeverityModel::from_path(&path)?;

    info!(
        path = %path.display(),
        classes = ?model.metadata().classes,
        "severity model ready"
    );

    Ok(SeverityPredictionService::new(
        Arc::new(model),
        config.scenario.clone(),
    ))
}
