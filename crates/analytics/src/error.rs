use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error(transparent)]
    InvalidInput(#[from] CoreError),

    #[error("Computation error: {0}")]
    Computation(String),
}
