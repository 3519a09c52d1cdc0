//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, limits ≥ 1)
//! - Check the upstream origin is a usable http(s) URL
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use url::Url;

use crate::config::schema::GatewayConfig;

/// One semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Upstream origin is not a usable URL.
    InvalidOrigin { origin: String, reason: String },
    /// Related-posts limit must be at least 1.
    ZeroRelatedLimit,
    /// Internal prefixes are matched against absolute paths.
    RelativeInternalPrefix { prefix: String },
    /// Request timeout must be at least 1 second.
    ZeroRequestTimeout,
    /// Content index path must not be empty.
    EmptyIndexPath,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidOrigin { origin, reason } => {
                write!(f, "invalid upstream origin '{origin}': {reason}")
            }
            ValidationError::ZeroRelatedLimit => {
                write!(f, "content.related_limit must be at least 1")
            }
            ValidationError::RelativeInternalPrefix { prefix } => {
                write!(f, "redirects.internal_prefixes entry '{prefix}' must start with '/'")
            }
            ValidationError::ZeroRequestTimeout => {
                write!(f, "timeouts.request_secs must be at least 1")
            }
            ValidationError::EmptyIndexPath => {
                write!(f, "content.index_path must not be empty")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a deserialized configuration, collecting every problem.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match Url::parse(&config.upstream.origin) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                errors.push(ValidationError::InvalidOrigin {
                    origin: config.upstream.origin.clone(),
                    reason: format!("unsupported scheme '{}'", url.scheme()),
                });
            } else if url.host_str().is_none() {
                errors.push(ValidationError::InvalidOrigin {
                    origin: config.upstream.origin.clone(),
                    reason: "missing host".to_string(),
                });
            }
        }
        Err(e) => errors.push(ValidationError::InvalidOrigin {
            origin: config.upstream.origin.clone(),
            reason: e.to_string(),
        }),
    }

    if config.content.related_limit == 0 {
        errors.push(ValidationError::ZeroRelatedLimit);
    }
    if config.content.index_path.trim().is_empty() {
        errors.push(ValidationError::EmptyIndexPath);
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }
    for prefix in &config.redirects.internal_prefixes {
        if !prefix.starts_with('/') {
            errors.push(ValidationError::RelativeInternalPrefix {
                prefix: prefix.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
