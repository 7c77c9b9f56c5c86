use analytics::ForecastModel;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use configuration::{settings::Settings, ForecastSettings};
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
// Note: Tracing is handled by the binary's logging configuration.

pub mod error;
pub mod handlers;
pub mod request;
pub mod response;

/// The shared application state that all handlers can access.
///
/// It is read-only; every request computes its forecast from scratch.
#[derive(Debug, Clone)]
pub struct AppState {
    pub forecast: ForecastSettings,
    pub model: ForecastModel,
}

impl AppState {
    pub fn new(forecast: ForecastSettings) -> anyhow::Result<Self> {
        let model = ForecastModel::new(forecast.period_months, forecast.confidence_z)?;
        Ok(Self { forecast, model })
    }
}

/// Builds the application router with its middleware stack.
pub fn router(state: AppState, body_limit_bytes: usize) -> Router {
    // Credentials are allowed, so origins, methods and headers are mirrored
    // from the request instead of answered with `*`.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    // --- DEFINE THE APPLICATION ROUTES ---
    Router::new()
        .route("/predict", post(handlers::predict))
        .route("/health", get(handlers::health))
        .with_state(Arc::new(state))
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(body_limit_bytes))
}

/// The main function to configure and run the web server.
pub async fn run_server(settings: Settings) -> anyhow::Result<()> {
    // Note: Tracing is already initialized by the caller, so we don't initialize it again here.
    let addr = settings.server.socket_addr();
    let state = AppState::new(settings.forecast)?;
    let app = router(state, settings.server.body_limit_bytes);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server started and listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Web server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for the shutdown signal.");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received.");
}
