use core_types::ForecastOutput;
use rust_decimal::prelude::*;
use serde::Serialize;

pub const SUCCESS_MESSAGE: &str = "Protocol optimization successful. Wealth projection generated.";
pub const HEALTH_STATUS: &str = "Quantum Core Online";
pub const API_VERSION: &str = "1.0.0";

/// The body of a successful `POST /predict`. All amounts are rounded to cents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictResponse {
    pub predicted_value: f64,
    pub annual_yield_percent: f64,
    pub confidence_low: f64,
    pub confidence_high: f64,
    pub message: &'static str,
}

impl From<&ForecastOutput> for PredictResponse {
    fn from(output: &ForecastOutput) -> Self {
        Self {
            predicted_value: round_cents(output.predicted_value),
            annual_yield_percent: round_cents(output.estimated_yield_pa),
            confidence_low: round_cents(output.confidence_interval.low()),
            confidence_high: round_cents(output.confidence_interval.high()),
            message: SUCCESS_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: HEALTH_STATUS,
            version: API_VERSION,
        }
    }
}

/// Rounds to two decimal places, ties to even, on the exact binary value.
///
/// Values outside the `Decimal` range are returned unchanged.
pub fn round_cents(value: f64) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}
