use crate::error::AppError;
use crate::request::{self, PredictRequest};
use crate::response::{HealthResponse, PredictResponse};
use crate::AppState;
use analytics::ForecastEngine;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;

/// # POST /predict
/// Projects the requested capital forward using the historical return sample.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, AppError> {
    let Json(request) = payload?;
    let input = request::validate(request, &state.forecast)?;

    let output = ForecastEngine::forecast(&input, state.model)?;
    tracing::info!(
        capital = input.capital(),
        months = input.months(),
        samples = input.historical_returns().len(),
        predicted_value = output.predicted_value,
        "Wealth projection generated."
    );

    Ok(Json(PredictResponse::from(&output)))
}

/// # GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}
