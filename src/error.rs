//! Error types for page rendering and response helpers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Result type alias for page-responder operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The template engine failed to render a template.
    #[error("Template render failed: {0}")]
    Render(String),

    /// The template engine does not know the requested template.
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// Filesystem error (client view listing).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization of a response body or template context failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A header name or value is not valid HTTP.
    #[error("Invalid header: {name}")]
    InvalidHeader { name: String },

    /// An error carrying an HTTP status, handed to the framework's error path.
    #[error("{message}")]
    Http { status: StatusCode, message: String },
}

impl Error {
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Http {
            status: StatusCode::FORBIDDEN,
            message: message.into(),
        }
    }

    pub fn invalid_header(name: impl Into<String>) -> Self {
        Self::InvalidHeader { name: name.into() }
    }

    /// Returns the HTTP status code that should be returned to the client.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Http { status, .. } => *status,
            Self::InvalidHeader { .. } => StatusCode::BAD_REQUEST,
            Self::Render(_) | Self::TemplateNotFound(_) | Self::Io(_) | Self::Json(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to show to clients. Internal details stay in the logs.
    pub fn user_message(&self) -> &str {
        match self {
            Self::Http { message, .. } => message,
            Self::InvalidHeader { .. } => "Bad request",
            _ => "Internal server error",
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        (status, self.user_message().to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::forbidden("no").status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            Error::Render("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(Error::invalid_header("vary").status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_user_message_hides_internals() {
        assert_eq!(Error::forbidden("Verboten").user_message(), "Verboten");
        assert_eq!(
            Error::TemplateNotFound("secret/path".into()).user_message(),
            "Internal server error"
        );
    }

    #[test]
    fn test_into_response_status() {
        let response = Error::forbidden("Forbidden").into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
