use reqwest::StatusCode;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server responded {status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Session storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Not signed in")]
    NotAuthenticated,

    #[error("{0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::Http(_) | AppError::Storage(_) | AppError::Decode(_) => true,
            AppError::Api { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }

    pub fn toast(&self, title: impl Into<String>) -> Toast {
        let message = match self {
            AppError::Http(e) => {
                error!("network error: {}", e);
                "Unable to reach the server. Please try again.".to_string()
            }
            AppError::Api { message, .. } if !message.is_empty() => message.clone(),
            AppError::Api { status, .. } => status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string(),
            AppError::Decode(e) => {
                error!("decode error: {}", e);
                "The server sent an unexpected response.".to_string()
            }
            other => other.to_string(),
        };

        Toast {
            title: title.into(),
            message,
            variant: ToastVariant::Destructive,
            retryable: self.is_retryable(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastVariant {
    Default,
    Destructive,
}

#[derive(Debug, Clone, Serialize)]
pub struct Toast {
    pub title: String,
    pub message: String,
    pub variant: ToastVariant,
    pub retryable: bool,
}

impl Toast {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            variant: ToastVariant::Default,
            retryable: false,
        }
    }
}

impl std::fmt::Display for Toast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.message)?;
        if self.retryable {
            write!(f, " (retry)")?;
        }
        Ok(())
    }
}
