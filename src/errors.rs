use crate::domain::PipelineError;
use astra::Response;
use thiserror::Error;

/// Errors originating from either the server logic
/// (routing, bad parameters, etc.) or downstream layers (store, export).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Database Error: {0}")]
    DbError(String),
    #[error("Spreadsheet Error: {0}")]
    XlsxError(String),
    #[error("Data Unavailable: {0}")]
    Unavailable(String),
    #[error("Internal Server Error")]
    InternalError,
}

impl From<PipelineError> for ServerError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Storage(msg) => ServerError::DbError(msg),
            other => ServerError::Unavailable(other.to_string()),
        }
    }
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;
