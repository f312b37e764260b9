use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum ConsoleError {
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("Authentication error: {message}")]
    Authentication { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Upstream error: {service} - {message}")]
    Upstream { service: String, message: String },

    #[error("Malformed document: {message}")]
    MalformedDocument { message: String },

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Export error: {message}")]
    Export { message: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl ConsoleError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn upstream(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Upstream {
            service: service.into(),
            message: message.into(),
        }
    }

    pub fn malformed_document(message: impl Into<String>) -> Self {
        Self::MalformedDocument {
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn export(message: impl Into<String>) -> Self {
        Self::Export {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Authentication { .. } => "AUTHENTICATION_ERROR",
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
            Self::Upstream { .. } => "UPSTREAM_ERROR",
            Self::MalformedDocument { .. } => "MALFORMED_DOCUMENT",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Export { .. } => "EXPORT_ERROR",
            Self::Internal { .. } => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::Validation { .. } => 400,
            Self::Authentication { .. } => 502,
            Self::Configuration { .. } => 500,
            Self::Upstream { .. } => 502,
            Self::MalformedDocument { .. } => 422,
            Self::NotFound { .. } => 404,
            Self::Export { .. } => 502,
            Self::Internal { .. } => 500,
        }
    }
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl From<ConsoleError> for ErrorResponse {
    fn from(error: ConsoleError) -> Self {
        Self {
            error: error.to_string(),
            code: error.error_code().to_string(),
            message: error.to_string(),
            details: None,
        }
    }
}

// Conversion from common error types
impl From<reqwest::Error> for ConsoleError {
    fn from(error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) if status == reqwest::StatusCode::NOT_FOUND => {
                Self::not_found(error.url().map(|u| u.path().to_string()).unwrap_or_default())
            }
            _ => Self::upstream("CPQ API", error.to_string()),
        }
    }
}

impl From<serde_json::Error> for ConsoleError {
    fn from(error: serde_json::Error) -> Self {
        Self::malformed_document(error.to_string())
    }
}

impl From<csv::Error> for ConsoleError {
    fn from(error: csv::Error) -> Self {
        Self::export(error.to_string())
    }
}

impl From<std::io::Error> for ConsoleError {
    fn from(error: std::io::Error) -> Self {
        Self::internal(error.to_string())
    }
}
