use crate::error::ConfigError;
use crate::settings::Settings;
use config::{Environment, File, Source};
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_logging;
pub use settings::{ForecastSettings, LoggingSettings, ServerSettings};

/// Default location of the settings file, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Prefix of environment variable overrides, e.g. `PROPHET__SERVER__PORT=9000`.
pub const ENV_PREFIX: &str = "PROPHET";

/// Loads the application settings.
///
/// Values are layered: built-in defaults, then the TOML file, then `PROPHET__*`
/// environment variables. The result is validated before being returned.
///
/// An explicit `path` must exist. When `path` is `None`, `config.toml` is read
/// if present and skipped otherwise.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let file = match path {
        Some(path) => File::from(path).required(true),
        None => File::from(Path::new(DEFAULT_CONFIG_FILE)).required(false),
    };
    build_settings(file, environment())
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("forecast.default_historical_returns")
}

fn build_settings<S>(file: S, env: Environment) -> Result<Settings, ConfigError>
where
    S: Source + Send + Sync + 'static,
{
    let builder = config::Config::builder()
        .add_source(file)
        .add_source(env)
        .build()?;

    // Attempt to deserialize the entire configuration into our `Settings` struct
    let settings = builder.try_deserialize::<Settings>()?;
    settings.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;
    use std::collections::HashMap;

    fn toml(contents: &str) -> File<config::FileSourceString, FileFormat> {
        File::from_str(contents, FileFormat::Toml)
    }

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        environment().source(Some(map))
    }

    #[test]
    fn test_empty_sources_yield_defaults() {
        let settings = build_settings(toml(""), env(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.server.port, 8000);
        assert_eq!(
            settings.forecast.default_historical_returns,
            vec![0.12, 0.15, 0.18, 0.14, 0.16]
        );
    }

    #[test]
    fn test_file_values_override_defaults() {
        let file = toml(
            r#"
            [server]
            host = "127.0.0.1"
            port = 9100

            [forecast]
            period_months = 1
            confidence_z = 2.58
            "#,
        );
        let settings = build_settings(file, env(&[])).unwrap();
        assert_eq!(settings.server.socket_addr().to_string(), "127.0.0.1:9100");
        assert_eq!(settings.forecast.period_months, 1);
        assert_eq!(settings.forecast.confidence_z, 2.58);
        assert_eq!(settings.forecast.default_months, 12);
    }

    #[test]
    fn test_environment_overrides_file() {
        let file = toml("[server]\nport = 9100\n");
        let vars = env(&[
            ("PROPHET__SERVER__PORT", "9200"),
            ("PROPHET__LOGGING__LEVEL", "debug"),
        ]);
        let settings = build_settings(file, vars).unwrap();
        assert_eq!(settings.server.port, 9200);
        assert_eq!(settings.logging.level, "debug");
    }

    #[test]
    fn test_environment_list_of_returns() {
        let vars = env(&[(
            "PROPHET__FORECAST__DEFAULT_HISTORICAL_RETURNS",
            "0.05,0.07",
        )]);
        let settings = build_settings(toml(""), vars).unwrap();
        assert_eq!(settings.forecast.default_historical_returns, vec![0.05, 0.07]);
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let file = toml("[forecast]\nperiod_months = 0\n");
        let err = build_settings(file, env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));

        let file = toml("[forecast]\ndefault_historical_returns = []\n");
        let err = build_settings(file, env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_malformed_file_is_a_load_error() {
        let err = build_settings(toml("[server]\nport = \"not a port\"\n"), env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(_)));
    }

    #[test]
    fn test_default_file_is_optional() {
        // The crate directory has no config.toml of its own.
        assert!(!Path::new(DEFAULT_CONFIG_FILE).exists());
        assert!(load_settings(None).is_ok());
    }

    #[test]
    fn test_explicit_missing_file_is_a_load_error() {
        let err = load_settings(Some(Path::new("/nonexistent/prod.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(_)));
    }
}
