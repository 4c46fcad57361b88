//! Error types for the node graph API

use axum::http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("{0}")]
    MalformedPayload(#[from] serde_json::Error),

    #[error("Title and Content cannot be empty")]
    EmptyField,

    #[error("Not found")]
    NotFound,

    #[error("{0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Store has been closed")]
    StoreClosed,

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Outcome class a [`GraphError`] is reported as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    NotFound,
    Internal,
}

impl GraphError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GraphError::MalformedPayload(_) | GraphError::EmptyField => ErrorKind::BadRequest,
            GraphError::NotFound => ErrorKind::NotFound,
            GraphError::Database(_)
            | GraphError::Storage(_)
            | GraphError::StoreClosed
            | GraphError::Serialization(_) => ErrorKind::Internal,
        }
    }

    /// Get error code for logs and structured consumers
    pub fn code(&self) -> &'static str {
        match self.kind() {
            ErrorKind::BadRequest => "BAD_REQUEST",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Internal => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
