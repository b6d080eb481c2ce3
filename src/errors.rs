use std::fmt;

use actix_web::{
    HttpResponse,
    error::ResponseError,
    http::{StatusCode, header::ContentType},
};
use serde::Serialize;
use validator::ValidationErrors;

use crate::normalize::NormalizeError;

#[derive(Debug)]
pub enum AppError {
    ValidationError(Vec<FieldError>),
    NotFound(String),
    BadGateway(String),
    MalformedContent(String),
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError(errors) => {
                let messages = errors
                    .iter()
                    .map(|e| format!("{}:{}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "validation error: {}", messages)
            }
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadGateway(msg) => write!(f, "Upstream failure: {}", msg),
            AppError::MalformedContent(msg) => write!(f, "Malformed content record: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal server error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::ValidationError(errors) => {
                serde_json::json!({
                    "error": "Validation failed",
                    "details": errors
                })
            }
            _ => {
                serde_json::json!({"error": self.to_string()})
            }
        };
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            AppError::MalformedContent(_) => StatusCode::BAD_GATEWAY,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let field_errors = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(|e| FieldError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "Invalid value".to_string()),
                })
            })
            .collect();

        AppError::ValidationError(field_errors)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::BadGateway("Upstream request timed out".to_string())
        } else if err.is_connect() {
            AppError::BadGateway(format!("Upstream connection failed: {}", err))
        } else {
            AppError::BadGateway(format!("Upstream request failed: {}", err))
        }
    }
}

impl From<NormalizeError> for AppError {
    fn from(err: NormalizeError) -> Self {
        AppError::MalformedContent(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalError(err.to_string())
    }
}

#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}
