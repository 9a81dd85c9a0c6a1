//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (port non-zero, addresses parse)
//! - Reject template names and extensions that can never match
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>

use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::config::schema::AppConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.app.port == 0 {
        errors.push(ValidationError::new("app.port", "must be non-zero"));
    }

    if config.app.env.trim().is_empty() {
        errors.push(ValidationError::new("app.env", "must not be empty"));
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    if config.views.meta_template.trim().is_empty() {
        errors.push(ValidationError::new("views.meta_template", "must not be empty"));
    }

    if config.views.message_template.trim().is_empty() {
        errors.push(ValidationError::new("views.message_template", "must not be empty"));
    }

    let ext = &config.views.client_view_extension;
    if ext.is_empty() || ext.starts_with('.') {
        errors.push(ValidationError::new(
            "views.client_view_extension",
            "must be non-empty and given without a leading dot",
        ));
    }

    for proxy in &config.client_ip.trusted_proxies {
        if proxy.parse::<IpAddr>().is_err() {
            errors.push(ValidationError::new(
                "client_ip.trusted_proxies",
                format!("'{}' is not an IP address", proxy),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
