use common_errors::AppError;
use thiserror::Error;

/// Failures raised by the view recorder and the aggregator. All of them are
/// store failures; malformed input is rejected at the HTTP layer before a
/// query is ever built.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("Database error: {0}")]
    Database(#[from] sql_connection::PgError),
    #[error("Connection error: {0}")]
    Connection(#[from] sql_connection::PoolError),
}

impl From<AnalyticsError> for AppError {
    fn from(err: AnalyticsError) -> Self {
        tracing::error!("Analytics store failure: {}", err);
        AppError::internal_server_error("Analytics operation failed")
    }
}
