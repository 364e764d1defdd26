//! Gateway error taxonomy and logging helpers for route handlers

use axum::{extract::rejection::BytesRejection, http::StatusCode};
use thiserror::Error;

use crate::storage::StoreError;

/// Every failure an operation can report back in an error envelope.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Sheet '{0}' not found")]
    TableNotFound(String),

    #[error("Required columns not found: {}. Ensure you have: {}", .missing.join(", "), .required.join(", "))]
    MissingColumns {
        missing: Vec<String>,
        required: &'static [&'static str],
    },

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingRequiredField(&'static [&'static str]),

    #[error("Tweet with ID {0} not found")]
    RecordNotFound(String),

    #[error("{0} method not supported")]
    UnsupportedOperation(String),

    #[error("Invalid request body: {0}")]
    MalformedRequest(String),

    #[error("Invalid request body: {0}")]
    BodyTooLarge(String),

    #[error("No route for {0}")]
    UnknownPath(String),

    #[error("{context}: {source}")]
    StoreFailure {
        context: &'static str,
        #[source]
        source: StoreError,
    },
}

impl GatewayError {
    pub fn malformed(e: impl std::fmt::Display) -> Self {
        GatewayError::MalformedRequest(e.to_string())
    }

    /// A body the extractor refused to buffer, most often one over the size limit
    pub fn from_body_rejection(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            GatewayError::BodyTooLarge(rejection.body_text())
        } else {
            GatewayError::MalformedRequest(rejection.body_text())
        }
    }

    /// Lift a store error into the taxonomy, keeping "sheet missing" distinct
    /// from generic store failures.
    pub fn from_store(context: &'static str) -> impl FnOnce(StoreError) -> GatewayError {
        move |e| match e {
            StoreError::SheetNotFound(name) => GatewayError::TableNotFound(name),
            source => GatewayError::StoreFailure { context, source },
        }
    }

    /// Transport status used when strict status codes are enabled
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::TableNotFound(_)
            | GatewayError::RecordNotFound(_)
            | GatewayError::UnknownPath(_) => StatusCode::NOT_FOUND,
            GatewayError::MissingRequiredField(_) | GatewayError::MalformedRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            GatewayError::BodyTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            GatewayError::UnsupportedOperation(_) => StatusCode::METHOD_NOT_ALLOWED,
            GatewayError::MissingColumns { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::StoreFailure { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    fn is_server_side(&self) -> bool {
        matches!(
            self,
            GatewayError::MissingColumns { .. } | GatewayError::StoreFailure { .. }
        )
    }
}

/// Extension trait for logging gateway errors with handler context
pub trait LogErr<T> {
    /// Log the error (if any) and pass the result through unchanged
    fn log_err(self, context: &str) -> Result<T, GatewayError>;
}

impl<T> LogErr<T> for Result<T, GatewayError> {
    fn log_err(self, context: &str) -> Result<T, GatewayError> {
        self.inspect_err(|e| {
            if e.is_server_side() {
                tracing::error!(error = %e, "{}", context);
            } else {
                tracing::warn!(error = %e, "{}", context);
            }
        })
    }
}
