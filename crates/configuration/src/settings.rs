use crate::error::ConfigError;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section is optional in `config.toml`; missing values fall back to the
/// defaults below.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub forecast: ForecastSettings,
    pub logging: LoggingSettings,
}

/// Where and how the HTTP server listens.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: IpAddr,
    pub port: u16,
    /// Maximum accepted request body size.
    pub body_limit_bytes: usize,
}

/// Request defaults and forecast model parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ForecastSettings {
    /// Horizon used when a request omits `months`.
    pub default_months: u32,
    /// Return sample used when a request omits `historical_returns`.
    /// The default is the "Growth Plan" history.
    pub default_historical_returns: Vec<f64>,
    /// Length in months of one historical period (12 = annual returns).
    pub period_months: u32,
    /// Two-sided z-score of the confidence interval.
    pub confidence_z: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// An `EnvFilter` directive. `RUST_LOG` takes precedence when set.
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8000,
            body_limit_bytes: 64 * 1024,
        }
    }
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            default_months: 12,
            default_historical_returns: vec![0.12, 0.15, 0.18, 0.14, 0.16],
            period_months: 12,
            confidence_z: 1.96,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

impl ServerSettings {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Settings {
    /// Checks the cross-field rules that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let forecast = &self.forecast;
        if forecast.default_months == 0 {
            return Err(ConfigError::ValidationError(
                "forecast.default_months must be at least 1".to_string(),
            ));
        }
        if forecast.default_historical_returns.is_empty() {
            return Err(ConfigError::ValidationError(
                "forecast.default_historical_returns must not be empty".to_string(),
            ));
        }
        if forecast.default_historical_returns.iter().any(|r| !r.is_finite()) {
            return Err(ConfigError::ValidationError(
                "forecast.default_historical_returns must only contain finite numbers".to_string(),
            ));
        }
        if forecast.period_months == 0 {
            return Err(ConfigError::ValidationError(
                "forecast.period_months must be at least 1".to_string(),
            ));
        }
        if !forecast.confidence_z.is_finite() || forecast.confidence_z < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "forecast.confidence_z must be a non-negative number, got {}",
                forecast.confidence_z
            )));
        }
        if self.server.body_limit_bytes == 0 {
            return Err(ConfigError::ValidationError(
                "server.body_limit_bytes must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
