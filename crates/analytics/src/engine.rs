use crate::error::AnalyticsError;
use crate::model::ForecastModel;
use core_types::{validate_returns, ConfidenceInterval, CoreError, ForecastInput, ForecastOutput};

/// A stateless calculator that projects capital forward from a sample of
/// historical periodic returns.
///
/// The sample statistics are computed once at construction; predictions never
/// mutate the engine.
#[derive(Debug, Clone)]
pub struct ForecastEngine {
    model: ForecastModel,
    samples: usize,
    mean_return: f64,
    std_dev: f64,
}

impl ForecastEngine {
    /// Builds an engine with the default model (annual returns, ~95% interval).
    pub fn new(historical_returns: &[f64]) -> Result<Self, AnalyticsError> {
        Self::with_model(historical_returns, ForecastModel::default())
    }

    /// Builds an engine from a return sample and explicit model parameters.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::InvalidInput` if the sample is empty or contains
    /// a non-finite value.
    pub fn with_model(
        historical_returns: &[f64],
        model: ForecastModel,
    ) -> Result<Self, AnalyticsError> {
        validate_returns(historical_returns)?;

        let mean_return = mean(historical_returns);
        let std_dev = sample_std_dev(historical_returns, mean_return);
        if !mean_return.is_finite() || !std_dev.is_finite() {
            return Err(AnalyticsError::Computation(
                "return sample statistics overflowed".to_string(),
            ));
        }

        tracing::debug!(
            samples = historical_returns.len(),
            mean_return,
            std_dev,
            "Computed historical return statistics."
        );

        Ok(Self {
            model,
            samples: historical_returns.len(),
            mean_return,
            std_dev,
        })
    }

    /// Convenience entry point for an already validated request.
    pub fn forecast(
        input: &ForecastInput,
        model: ForecastModel,
    ) -> Result<ForecastOutput, AnalyticsError> {
        Self::with_model(input.historical_returns(), model)?
            .predict_future_value(input.capital(), input.months())
    }

    pub fn model(&self) -> &ForecastModel {
        &self.model
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Arithmetic mean of the historical periodic returns.
    pub fn mean_return(&self) -> f64 {
        self.mean_return
    }

    /// Bessel-corrected standard deviation of the historical periodic returns.
    /// A single-element sample has a standard deviation of zero.
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Projects `capital` forward by `months`.
    ///
    /// The mean periodic return is compounded over `months / period_months`
    /// periods. The interval applies `confidence_z` standard deviations of the
    /// growth factor, scaled by the square root of the horizon, to the point
    /// estimate. The low bound is floored at zero.
    ///
    /// # Errors
    ///
    /// * `AnalyticsError::InvalidInput` if `capital` is not a positive finite
    ///   number or `months` is zero.
    /// * `AnalyticsError::Computation` if the mean return is -100% or worse, or
    ///   the projection overflows.
    pub fn predict_future_value(
        &self,
        capital: f64,
        months: u32,
    ) -> Result<ForecastOutput, AnalyticsError> {
        if !capital.is_finite() || capital <= 0.0 {
            return Err(CoreError::invalid(
                "capital",
                format!("must be a finite number greater than 0, got {capital}"),
            )
            .into());
        }
        if months == 0 {
            return Err(CoreError::invalid("months", "must be at least 1").into());
        }

        let growth_base = 1.0 + self.mean_return;
        if growth_base <= 0.0 {
            return Err(AnalyticsError::Computation(format!(
                "mean periodic return of {} leaves no capital to compound",
                self.mean_return
            )));
        }

        let periods = self.model.periods_in(months);
        let predicted_value = capital * growth_base.powf(periods);
        let estimated_yield_pa = (growth_base.powf(self.model.periods_per_year()) - 1.0) * 100.0;

        let relative_spread = self.model.confidence_z * self.std_dev * periods.sqrt() / growth_base;
        let low = (predicted_value * (1.0 - relative_spread)).max(0.0);
        let high = predicted_value * (1.0 + relative_spread);

        if !predicted_value.is_finite() || !estimated_yield_pa.is_finite() || !high.is_finite() {
            return Err(AnalyticsError::Computation(format!(
                "projection of {capital} over {months} months is not representable"
            )));
        }

        let confidence_interval = ConfidenceInterval::new(low, high)
            .map_err(|e| AnalyticsError::Computation(e.to_string()))?;

        tracing::debug!(
            capital,
            months,
            predicted_value,
            low,
            high,
            "Generated wealth projection."
        );

        Ok(ForecastOutput {
            predicted_value,
            estimated_yield_pa,
            confidence_interval,
        })
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn sample_std_dev(values: &[f64], mean: f64) -> f64 {
    // Identical values have no spread; skip the arithmetic so rounding noise in
    // the mean cannot leak into the interval.
    if values.len() < 2 || values.iter().all(|v| *v == values[0]) {
        return 0.0;
    }
    let sum_sq: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}
