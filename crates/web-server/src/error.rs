use analytics::AnalyticsError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use core_types::CoreError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed request: {0}")]
    Rejection(#[from] JsonRejection),
    #[error(transparent)]
    InvalidInput(#[from] CoreError),
    #[error(transparent)]
    Forecast(#[from] AnalyticsError),
}

/// Converts our custom `AppError` into an HTTP response with a `{"detail": ...}` body.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::Rejection(rejection) => {
                tracing::warn!(error = %rejection, "Rejected request body.");
                (rejection.status(), rejection.body_text())
            }
            AppError::InvalidInput(core_err) => {
                tracing::warn!(error = %core_err, "Invalid forecast request.");
                (StatusCode::UNPROCESSABLE_ENTITY, core_err.to_string())
            }
            // Any engine failure is reported as a server error carrying its message.
            AppError::Forecast(analytics_err) => {
                tracing::error!(error = ?analytics_err, "Forecast engine error.");
                (StatusCode::INTERNAL_SERVER_ERROR, analytics_err.to_string())
            }
        };

        let body = Json(json!({ "detail": detail }));
        (status, body).into_response()
    }
}
