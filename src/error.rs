//! Application error type and its HTTP mapping.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use validator::ValidationErrors;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload returned to API clients.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Every outcome an operation can fail with.
///
/// All variants are reported to the caller as distinct outcomes except
/// [`AppError::Storage`], whose details are logged and replaced with a generic
/// message before leaving the service.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid URL: {reason}")]
    InvalidUrl { reason: String },

    #[error("Code must be 6-8 alphanumeric characters")]
    InvalidCodeFormat { code: String },

    #[error("Code already exists")]
    CodeAlreadyExists { code: String },

    #[error("Failed to generate unique code after {attempts} attempts")]
    GenerationExhausted { attempts: usize },

    #[error("Link not found")]
    NotFound { code: String },

    #[error("Storage operation timed out")]
    Timeout,

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl AppError {
    pub fn invalid_url(reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            reason: reason.into(),
        }
    }
    pub fn invalid_code_format(code: impl Into<String>) -> Self {
        Self::InvalidCodeFormat { code: code.into() }
    }
    pub fn code_already_exists(code: impl Into<String>) -> Self {
        Self::CodeAlreadyExists { code: code.into() }
    }
    pub fn not_found(code: impl Into<String>) -> Self {
        Self::NotFound { code: code.into() }
    }
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidUrl { .. } | Self::InvalidCodeFormat { .. } => StatusCode::BAD_REQUEST,
            Self::CodeAlreadyExists { .. } => StatusCode::CONFLICT,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Timeout => StatusCode::GATEWAY_TIMEOUT,
            Self::GenerationExhausted { .. } | Self::Storage { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Converts the error into the payload sent to clients.
    ///
    /// Storage details never leave the process; they are logged here instead.
    pub fn to_error_info(&self) -> ErrorInfo {
        match self {
            Self::InvalidUrl { reason } => ErrorInfo {
                code: "invalid_url",
                message: "Invalid URL provided".to_string(),
                details: json!({ "reason": reason }),
            },
            Self::InvalidCodeFormat { code } => ErrorInfo {
                code: "invalid_code_format",
                message: self.to_string(),
                details: json!({ "code": code }),
            },
            Self::CodeAlreadyExists { code } => ErrorInfo {
                code: "code_already_exists",
                message: self.to_string(),
                details: json!({ "code": code }),
            },
            Self::GenerationExhausted { attempts } => ErrorInfo {
                code: "generation_exhausted",
                message: "Failed to generate unique code".to_string(),
                details: json!({ "attempts": attempts }),
            },
            Self::NotFound { code } => ErrorInfo {
                code: "not_found",
                message: self.to_string(),
                details: json!({ "code": code }),
            },
            Self::Timeout => {
                tracing::warn!("Storage deadline exceeded");
                ErrorInfo {
                    code: "timeout",
                    message: "The request timed out".to_string(),
                    details: json!({}),
                }
            }
            Self::Storage { message } => {
                tracing::error!(error = %message, "Storage failure");
                ErrorInfo {
                    code: "internal_error",
                    message: "Internal server error".to_string(),
                    details: json!({}),
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::storage(e.to_string())
    }
}

/// A body that is not a JSON object of the expected shape cannot carry a
/// usable target URL.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::invalid_url(rejection.body_text())
    }
}

/// Maps request validation failures onto the caller-visible taxonomy.
///
/// A bad target URL wins over a bad custom code when both are present.
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let fields = errors.field_errors();

        if fields.contains_key("target_url") || fields.contains_key("targetUrl") {
            return AppError::invalid_url(errors.to_string());
        }

        if let Some(code_errors) = fields
            .get("custom_code")
            .or_else(|| fields.get("customCode"))
        {
            let code = code_errors
                .iter()
                .find_map(|e| e.params.get("value"))
                .and_then(Value::as_str)
                .unwrap_or_default();
            return AppError::invalid_code_format(code);
        }

        AppError::invalid_url(errors.to_string())
    }
}
