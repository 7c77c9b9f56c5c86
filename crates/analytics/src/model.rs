use crate::error::AnalyticsError;
use core_types::CoreError;

/// Number of months in a calendar year.
pub const MONTHS_PER_YEAR: u32 = 12;

/// Parameters that fix the compounding convention and the interval width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastModel {
    /// Length in months of one historical measurement period.
    /// `12` means each historical return is an annual return.
    pub period_months: u32,
    /// Two-sided z-score applied to the propagated standard deviation.
    /// `1.96` corresponds to a ~95% interval under a normal approximation.
    pub confidence_z: f64,
}

impl ForecastModel {
    pub const DEFAULT_PERIOD_MONTHS: u32 = MONTHS_PER_YEAR;
    pub const DEFAULT_CONFIDENCE_Z: f64 = 1.96;

    pub fn new(period_months: u32, confidence_z: f64) -> Result<Self, AnalyticsError> {
        if period_months == 0 {
            return Err(CoreError::invalid("period_months", "must be at least 1").into());
        }
        if !confidence_z.is_finite() || confidence_z < 0.0 {
            return Err(CoreError::invalid(
                "confidence_z",
                format!("must be a finite, non-negative number, got {confidence_z}"),
            )
            .into());
        }
        Ok(Self {
            period_months,
            confidence_z,
        })
    }

    /// Converts a horizon in months into a (possibly fractional) number of periods.
    pub fn periods_in(&self, months: u32) -> f64 {
        f64::from(months) / f64::from(self.period_months)
    }

    /// Number of historical periods that make up one year.
    pub fn periods_per_year(&self) -> f64 {
        self.periods_in(MONTHS_PER_YEAR)
    }
}

impl Default for ForecastModel {
    fn default() -> Self {
        Self {
            period_months: Self::DEFAULT_PERIOD_MONTHS,
            confidence_z: Self::DEFAULT_CONFIDENCE_Z,
        }
    }
}
