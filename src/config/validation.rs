//! Configuration validation.
//!
//! Serde handles syntax; this module checks values. Validation is a pure
//! function `GatewayConfig -> Result<(), Vec<ValidationError>>` and reports
//! every problem, not just the first one. File existence is checked later,
//! when the TLS material is loaded.

use crate::config::schema::GatewayConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("LISTEN_HOST must not be empty")]
    EmptyHost,

    #[error("MAX_BATCH_SIZE must be at least 1")]
    ZeroBatchSize,

    #[error("MAX_BODY_BYTES must be at least 1")]
    ZeroBodyLimit,

    #[error("LOG_FORMAT must be `pretty` or `json`, got `{0}`")]
    UnknownLogFormat(String),
}

/// Check a loaded configuration.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listen_host.trim().is_empty() {
        errors.push(ValidationError::EmptyHost);
    }

    if config.max_batch_size == Some(0) {
        errors.push(ValidationError::ZeroBatchSize);
    }

    if config.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if !matches!(config.log_format.as_str(), "pretty" | "json") {
        errors.push(ValidationError::UnknownLogFormat(config.log_format.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
