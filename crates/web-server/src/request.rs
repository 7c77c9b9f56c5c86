use configuration::ForecastSettings;
use core_types::{CoreError, ForecastInput};
use serde::{Deserialize, Deserializer};
use serde_json::Number;

/// The raw body of `POST /predict`, before any range checks.
///
/// `months` is kept as a raw JSON number so that integral floats (`12.0`),
/// zero and negative horizons all reach [`validate`] instead of failing as a
/// type mismatch. Optional fields may be omitted but not set to `null`.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictRequest {
    pub capital: f64,
    #[serde(default, deserialize_with = "non_null")]
    pub months: Option<Number>,
    #[serde(default, deserialize_with = "non_null")]
    pub historical_returns: Option<Vec<f64>>,
}

/// Only reached when the field is present, so `null` fails like any other
/// value of the wrong type.
fn non_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Applies the configured defaults and turns a raw request into a `ForecastInput`.
pub fn validate(
    request: PredictRequest,
    defaults: &ForecastSettings,
) -> Result<ForecastInput, CoreError> {
    let months = match &request.months {
        Some(months) => whole_months(months)?,
        None => i64::from(defaults.default_months),
    };
    if months <= 0 {
        return Err(CoreError::invalid(
            "months",
            format!("must be at least 1, got {months}"),
        ));
    }
    let months = u32::try_from(months)
        .map_err(|_| CoreError::invalid("months", format!("{months} is too large")))?;

    let historical_returns = request
        .historical_returns
        .unwrap_or_else(|| defaults.default_historical_returns.clone());

    ForecastInput::new(request.capital, months, historical_returns)
}

/// Accepts JSON integers and floats with no fractional part.
fn whole_months(months: &Number) -> Result<i64, CoreError> {
    if let Some(months) = months.as_i64() {
        return Ok(months);
    }
    match months.as_f64() {
        // Out-of-range values saturate and are caught by the u32 conversion.
        Some(months) if months.fract() == 0.0 => Ok(months as i64),
        _ => Err(CoreError::invalid(
            "months",
            format!("must be a whole number, got {months}"),
        )),
    }
}
