use crate::error::CoreError;
use serde::Serialize;

/// A validated forecast request.
///
/// Instances can only be built through [`ForecastInput::new`], so holding one
/// guarantees a positive finite capital, a horizon of at least one month and a
/// non-empty sample of finite returns.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastInput {
    capital: f64,
    months: u32,
    historical_returns: Vec<f64>,
}

impl ForecastInput {
    pub fn new(capital: f64, months: u32, historical_returns: Vec<f64>) -> Result<Self, CoreError> {
        if !capital.is_finite() {
            return Err(CoreError::invalid("capital", "must be a finite number"));
        }
        if capital <= 0.0 {
            return Err(CoreError::invalid("capital", format!("must be greater than 0, got {capital}")));
        }
        if months == 0 {
            return Err(CoreError::invalid("months", "must be at least 1"));
        }
        validate_returns(&historical_returns)?;

        Ok(Self {
            capital,
            months,
            historical_returns,
        })
    }

    pub fn capital(&self) -> f64 {
        self.capital
    }

    pub fn months(&self) -> u32 {
        self.months
    }

    pub fn historical_returns(&self) -> &[f64] {
        &self.historical_returns
    }
}

/// Checks that a return sample is non-empty and contains only finite values.
pub fn validate_returns(returns: &[f64]) -> Result<(), CoreError> {
    if returns.is_empty() {
        return Err(CoreError::invalid(
            "historical_returns",
            "at least one historical return is required",
        ));
    }
    if let Some(index) = returns.iter().position(|r| !r.is_finite()) {
        return Err(CoreError::invalid(
            "historical_returns",
            format!("value at index {index} is not a finite number"),
        ));
    }
    Ok(())
}

/// A `(low, high)` range around a point estimate.
///
/// Only [`ConfidenceInterval::new`] builds one, so `low <= high` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfidenceInterval {
    low: f64,
    high: f64,
}

impl ConfidenceInterval {
    /// Builds an interval, rejecting inverted or non-finite bounds.
    pub fn new(low: f64, high: f64) -> Result<Self, CoreError> {
        if !low.is_finite() || !high.is_finite() {
            return Err(CoreError::invalid("confidence_interval", "bounds must be finite"));
        }
        if low > high {
            return Err(CoreError::invalid(
                "confidence_interval",
                format!("low bound {low} exceeds high bound {high}"),
            ));
        }
        Ok(Self { low, high })
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn width(&self) -> f64 {
        self.high - self.low
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }
}

/// The result of projecting a capital amount forward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastOutput {
    /// Capital compounded over the requested horizon.
    pub predicted_value: f64,
    /// Annualized equivalent of the mean periodic return, in percent.
    pub estimated_yield_pa: f64,
    pub confidence_interval: ConfidenceInterval,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_input_is_accepted() {
        let input = ForecastInput::new(10_000.0, 12, vec![0.12, 0.15]).unwrap();
        assert_eq!(input.capital(), 10_000.0);
        assert_eq!(input.months(), 12);
        assert_eq!(input.historical_returns(), &[0.12, 0.15]);
    }

    #[test]
    fn test_zero_capital_is_rejected() {
        let err = ForecastInput::new(0.0, 12, vec![0.1]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(ref field, _) if field == "capital"));
    }

    #[test]
    fn test_nan_capital_is_rejected() {
        assert!(ForecastInput::new(f64::NAN, 12, vec![0.1]).is_err());
    }

    #[test]
    fn test_zero_months_is_rejected() {
        let err = ForecastInput::new(100.0, 0, vec![0.1]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(ref field, _) if field == "months"));
    }

    #[test]
    fn test_empty_returns_are_rejected() {
        let err = ForecastInput::new(100.0, 12, vec![]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(ref field, _) if field == "historical_returns"));
    }

    #[test]
    fn test_infinite_return_is_rejected() {
        let err = validate_returns(&[0.1, f64::INFINITY]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid input for historical_returns: value at index 1 is not a finite number"
        );
    }

    #[test]
    fn test_interval_helpers() {
        let ci = ConfidenceInterval::new(90.0, 110.0).unwrap();
        assert_eq!(ci.low(), 90.0);
        assert_eq!(ci.high(), 110.0);
        assert_eq!(ci.width(), 20.0);
        assert!(ci.contains(100.0));
        assert!(ci.contains(90.0));
        assert!(!ci.contains(110.5));
    }

    #[test]
    fn test_inverted_interval_is_rejected() {
        assert!(ConfidenceInterval::new(2.0, 1.0).is_err());
    }

    #[test]
    fn test_output_serializes_with_snake_case_fields() {
        let output = ForecastOutput {
            predicted_value: 1.0,
            estimated_yield_pa: 2.0,
            confidence_interval: ConfidenceInterval::new(0.5, 1.5).unwrap(),
        };
        let json = serde_json::to_value(output).unwrap();
        assert_eq!(json["confidence_interval"]["low"], 0.5);
        assert_eq!(json["estimated_yield_pa"], 2.0);
    }
}
