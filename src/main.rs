use analytics::{ForecastEngine, ForecastModel};
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Table};
use configuration::settings::Settings;
use core_types::ForecastInput;
use std::net::IpAddr;
use std::path::PathBuf;

/// The main entry point for the Matrix Prophet application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file, if present
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let mut settings = configuration::load_settings(cli.config.as_deref())?;
    let _log_guard = configuration::init_logging(&settings.logging)?;
    tracing::debug!(?settings, "Configuration loaded.");
    tracing::info!("Matrix Prophet {} starting...", env!("CARGO_PKG_VERSION"));

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(args) => {
            if let Some(host) = args.host {
                settings.server.host = host;
            }
            if let Some(port) = args.port {
                settings.server.port = port;
            }
            web_server::run_server(settings).await?;
        }
        Commands::Forecast(args) => handle_forecast(args, &settings)?,
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Projects capital forward from historical returns, over HTTP or from the terminal.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the settings file. Defaults to `config.toml` in the working directory.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP prediction service.
    Serve(ServeArgs),
    /// Compute a single projection and print it.
    Forecast(ForecastArgs),
}

#[derive(Parser)]
struct ServeArgs {
    /// Address to bind, overriding `server.host`.
    #[arg(long)]
    host: Option<IpAddr>,

    /// Port to bind, overriding `server.port`.
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Parser)]
struct ForecastArgs {
    /// The amount to project forward.
    #[arg(long)]
    capital: f64,

    /// Horizon in months. Defaults to `forecast.default_months`.
    #[arg(long)]
    months: Option<u32>,

    /// Comma-separated historical periodic returns (e.g. "0.12,0.15,0.18").
    /// Defaults to `forecast.default_historical_returns`.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    returns: Option<Vec<f64>>,
}

// ==============================================================================
// Forecast Command Logic
// ==============================================================================

fn handle_forecast(args: ForecastArgs, settings: &Settings) -> anyhow::Result<()> {
    let rows = forecast_rows(args, settings)?;
    println!("{}", render_forecast(&rows));
    Ok(())
}

/// Runs the projection, falling back to the configured defaults for any
/// argument left out, and returns the `(metric, value)` pairs to display.
fn forecast_rows(
    args: ForecastArgs,
    settings: &Settings,
) -> anyhow::Result<Vec<(&'static str, String)>> {
    let forecast = &settings.forecast;
    let input = ForecastInput::new(
        args.capital,
        args.months.unwrap_or(forecast.default_months),
        args.returns
            .unwrap_or_else(|| forecast.default_historical_returns.clone()),
    )?;
    let model = ForecastModel::new(forecast.period_months, forecast.confidence_z)?;

    let engine = ForecastEngine::with_model(input.historical_returns(), model)?;
    let output = engine.predict_future_value(input.capital(), input.months())?;

    Ok(vec![
        ("Capital", format!("{:.2}", input.capital())),
        ("Horizon (months)", input.months().to_string()),
        ("Return samples", engine.samples().to_string()),
        ("Mean periodic return", format!("{:.4}", engine.mean_return())),
        ("Std. deviation", format!("{:.4}", engine.std_dev())),
        ("Predicted value", format!("{:.2}", output.predicted_value)),
        ("Annual yield (%)", format!("{:.2}", output.estimated_yield_pa)),
        ("Confidence low", format!("{:.2}", output.confidence_interval.low())),
        ("Confidence high", format!("{:.2}", output.confidence_interval.high())),
    ])
}

fn render_forecast(rows: &[(&'static str, String)]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Metric", "Value"]);
    for (metric, value) in rows {
        table.add_row(vec![
            Cell::new(metric),
            Cell::new(value).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forecast_args(argv: &[&str]) -> ForecastArgs {
        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.command {
            Commands::Forecast(args) => args,
            Commands::Serve(_) => panic!("expected the forecast command"),
        }
    }

    fn value<'a>(rows: &'a [(&'static str, String)], metric: &str) -> &'a str {
        rows.iter()
            .find(|(name, _)| *name == metric)
            .map(|(_, value)| value.as_str())
            .unwrap()
    }

    #[test]
    fn test_forecast_uses_configured_defaults() {
        let args = forecast_args(&["matrix-prophet", "forecast", "--capital", "10000"]);
        let rows = forecast_rows(args, &Settings::default()).unwrap();
        assert_eq!(value(&rows, "Horizon (months)"), "12");
        assert_eq!(value(&rows, "Return samples"), "5");
        assert_eq!(value(&rows, "Mean periodic return"), "0.1500");
        assert_eq!(value(&rows, "Predicted value"), "11500.00");
        assert_eq!(value(&rows, "Annual yield (%)"), "15.00");
    }

    #[test]
    fn test_forecast_parses_months_and_negative_returns() {
        let args = forecast_args(&[
            "matrix-prophet",
            "forecast",
            "--capital",
            "200",
            "--months",
            "24",
            "--returns",
            "-0.1,0.3",
        ]);
        assert_eq!(args.returns.as_deref(), Some(&[-0.1, 0.3][..]));

        let rows = forecast_rows(args, &Settings::default()).unwrap();
        assert_eq!(value(&rows, "Horizon (months)"), "24");
        assert_eq!(value(&rows, "Return samples"), "2");
        assert_eq!(value(&rows, "Mean periodic return"), "0.1000");
        // 200 * 1.1^2
        assert_eq!(value(&rows, "Predicted value"), "242.00");
    }

    #[test]
    fn test_forecast_rejects_invalid_capital() {
        let args = forecast_args(&["matrix-prophet", "forecast", "--capital", "0"]);
        assert!(forecast_rows(args, &Settings::default()).is_err());
    }

    #[test]
    fn test_forecast_is_rendered_as_a_table() {
        let args = forecast_args(&["matrix-prophet", "forecast", "--capital", "10000"]);
        let rows = forecast_rows(args, &Settings::default()).unwrap();
        let rendered = render_forecast(&rows).to_string();
        assert!(rendered.contains("Metric"));
        assert!(rendered.contains("Predicted value"));
        assert!(rendered.contains("11500.00"));
        assert!(rendered.contains('│'));
    }

    #[test]
    fn test_global_config_flag_is_parsed() {
        let cli = Cli::try_parse_from([
            "matrix-prophet",
            "serve",
            "--config",
            "prod.toml",
            "--port",
            "9000",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("prod.toml")));
        assert!(matches!(cli.command, Commands::Serve(ServeArgs { port: Some(9000), .. })));
    }
}
