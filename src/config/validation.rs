//! Configuration validation.
//!
//! Serde handles syntax; this module checks values. Every problem is
//! reported, not just the first one.

use thiserror::Error;

use crate::config::schema::ServiceConfig;

/// A single semantic problem with a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("files.mode {mode:#o} is not a valid permission mode")]
    InvalidMode { mode: u32 },

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,

    #[error("observability.log_format must be \"text\" or \"json\", got {0:?}")]
    InvalidLogFormat(String),
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let paths = [
        ("ignition.bootstrap", &config.ignition.bootstrap),
        ("ignition.master", &config.ignition.master),
        ("ignition.worker", &config.ignition.worker),
        ("templates.dir", &config.templates.dir),
    ];
    for (field, path) in paths {
        if path.as_os_str().is_empty() {
            errors.push(ValidationError::Empty { field });
        }
    }

    if config.listener.host.trim().is_empty() {
        errors.push(ValidationError::Empty { field: "listener.host" });
    }
    if config.files.owner.trim().is_empty() {
        errors.push(ValidationError::Empty { field: "files.owner" });
    }
    if config.files.filesystem.trim().is_empty() {
        errors.push(ValidationError::Empty { field: "files.filesystem" });
    }
    if config.files.mode > 0o7777 {
        errors.push(ValidationError::InvalidMode { mode: config.files.mode });
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
    match config.observability.log_format.as_str() {
        "text" | "json" => {}
        other => errors.push(ValidationError::InvalidLogFormat(other.to_string())),
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
