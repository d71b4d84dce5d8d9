//! Error types raised at the HTTP boundary and their JSON rendering
//!
//! Handlers and extractors return [`AppError`]. Rendering to the wire
//! envelope happens once, in [`crate::middleware::translate_errors`], which
//! knows the deployment environment.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mongodb::error::{ErrorKind, WriteFailure};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error as StdError;
use std::sync::Arc;
use thiserror::Error;

use crate::config::Environment;

pub type Result<T> = std::result::Result<T, AppError>;

/// MongoDB server code for a document rejected by collection validation
const DOCUMENT_VALIDATION_FAILURE: i32 = 121;

pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// An error that already knows its status, code and client-facing message
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub code: String,
    pub message: String,
    pub details: Option<Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    /// 400 `VALIDATION_ERROR` carrying one entry per violated constraint
    pub fn validation(message: impl Into<String>, errors: Vec<FieldError>) -> Self {
        let details = serde_json::to_value(errors).unwrap_or(Value::Null);
        Self::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message).with_details(details)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The database rejected a document against its schema
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid resource ID: {0}")]
    InvalidId(#[from] mongodb::bson::oid::Error),

    #[error("{0}")]
    Unexpected(Box<dyn StdError + Send + Sync>),
}

impl AppError {
    pub fn unexpected(err: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        AppError::Unexpected(err.into())
    }

    pub fn is_unexpected(&self) -> bool {
        matches!(self, AppError::Unexpected(_))
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        let rejected = match err.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(write))
                if write.code == DOCUMENT_VALIDATION_FAILURE =>
            {
                Some(write.message.clone())
            }
            ErrorKind::Command(command) if command.code == DOCUMENT_VALIDATION_FAILURE => {
                Some(command.message.clone())
            }
            _ => None,
        };

        match rejected {
            Some(message) => AppError::Validation(message),
            None => AppError::Unexpected(Box::new(err)),
        }
    }
}

/// Wire shape of every error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: ErrorBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl ErrorEnvelope {
    fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
                details: None,
                stack: None,
            },
        }
    }
}

/// Map any [`AppError`] to its status and envelope
pub fn translate(err: &AppError, environment: Environment) -> (StatusCode, ErrorEnvelope) {
    match err {
        AppError::Api(api) => {
            let mut envelope = ErrorEnvelope::new(api.code.clone(), api.message.clone());
            envelope.error.details = api.details.clone().filter(|details| !details.is_null());
            (api.status, envelope)
        }
        AppError::Validation(message) => {
            let mut envelope = ErrorEnvelope::new("VALIDATION_ERROR", "Validation failed");
            envelope.error.details = Some(Value::String(message.clone()));
            (StatusCode::BAD_REQUEST, envelope)
        }
        AppError::InvalidId(_) => (
            StatusCode::BAD_REQUEST,
            ErrorEnvelope::new("INVALID_ID", "Invalid resource ID"),
        ),
        AppError::Unexpected(inner) => {
            if environment.is_production() {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorEnvelope::new("INTERNAL_ERROR", GENERIC_ERROR_MESSAGE),
                );
            }
            let mut envelope = ErrorEnvelope::new("INTERNAL_ERROR", inner.to_string());
            envelope.error.stack = Some(error_trace(inner.as_ref()));
            (StatusCode::INTERNAL_SERVER_ERROR, envelope)
        }
    }
}

/// Debug rendering of an error followed by its source chain
pub fn error_trace(err: &(dyn StdError + 'static)) -> String {
    let mut trace = format!("{:?}", err);
    let mut source = err.source();
    while let Some(cause) = source {
        trace.push_str("\nCaused by: ");
        trace.push_str(&cause.to_string());
        source = cause.source();
    }
    trace
}

/// Response extension carrying the raised error to the translator layer
#[derive(Debug, Clone)]
pub struct RaisedError(pub Arc<AppError>);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Rendered without detail until the translator layer replaces it
        let (status, envelope) = translate(&self, Environment::Production);
        let mut response = (status, Json(envelope)).into_response();
        response.extensions_mut().insert(RaisedError(Arc::new(self)));
        response
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        AppError::Api(self).into_response()
    }
}
