use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use super::domain::DrivingConditions;
use super::oracle::ModelOracle;
use super::options::FormOptions;
use super::service::{PredictionServiceError, SeverityPredictionService};

/// Router builder exposing the prediction form endpoints.
pub fn prediction_router<O>(service: Arc<SeverityPredictionService<O>>) -> Router
where
    O: ModelOracle + 'static,
{
    Router::new()
        .route("/api/v1/severity/options", get(options_handler))
        .route("/api/v1/severity/model", get(model_handler::<O>))
        .route("/api/v1/severity/predictions", post(predict_handler::<O>))
        .with_state(service)
}

pub(crate) async fn options_handler() -> Json<FormOptions> {
    Json(FormOptions::standard())
}

pub(crate) async fn model_handler<O>(
    State(service): State<Arc<SeverityPredictionService<O>>>,
) -> Response
where
    O: ModelOracle + 'static,
{
    (StatusCode::OK, Json(service.model_summary())).into_response()
}

pub(crate) async fn predict_handler<O>(
    State(service): State<Arc<SeverityPredictionService<O>>>,
    Json(conditions): Json<DrivingConditions>,
) -> Response
where
    O: ModelOracle + 'static,
{
    match service.assess(conditions) {
        Ok(assessment) => (StatusCode::OK, Json(assessment)).into_response(),
        Err(PredictionServiceError::InvalidInput(error)) => {
            let payload = json!({
                "error": error.to_string(),
                "field": error.field(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::BAD_GATEWAY, Json(payload)).into_response()
        }
    }
}
