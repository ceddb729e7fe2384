//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, limits > 0)
//! - Check addresses and static mounts are usable
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServerConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("limits.max_body_size must be greater than zero")]
    ZeroBodyLimit,

    #[error("observability.log_level '{0}' is not one of trace, debug, info, warn, error")]
    LogLevel(String),

    #[error("templates.glob must not be empty")]
    EmptyTemplateGlob,

    #[error("static prefix '{0}' must start with '/'")]
    StaticPrefix(String),

    #[error("static mount '{0}' has an empty root directory")]
    StaticRoot(String),
}

/// Check `config`, collecting every problem found.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }
    if config.limits.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::LogLevel(config.observability.log_level.clone()));
    }

    if matches!(&config.templates.glob, Some(glob) if glob.trim().is_empty()) {
        errors.push(ValidationError::EmptyTemplateGlob);
    }

    for mount in &config.statics {
        if !mount.prefix.starts_with('/') {
            errors.push(ValidationError::StaticPrefix(mount.prefix.clone()));
        }
        if mount.root.trim().is_empty() {
            errors.push(ValidationError::StaticRoot(mount.prefix.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::StaticConfig;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(validate_config(&ServerConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ServerConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.timeouts.request_secs = 0;
        config.limits.max_body_size = 0;
        config.observability.log_level = "loud".into();
        config.statics.push(StaticConfig {
            prefix: "assets".into(),
            root: " ".into(),
        });

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::BindAddress("not-an-address".into()),
                ValidationError::ZeroRequestTimeout,
                ValidationError::ZeroBodyLimit,
                ValidationError::LogLevel("loud".into()),
                ValidationError::StaticPrefix("assets".into()),
                ValidationError::StaticRoot("assets".into()),
            ]
        );
    }

    #[test]
    fn test_empty_template_glob() {
        let mut config = ServerConfig::default();
        config.templates.glob = Some(String::new());
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::EmptyTemplateGlob])
        );

        config.templates.glob = Some("templates/*.html".into());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_log_level_is_case_insensitive() {
        let mut config = ServerConfig::default();
        config.observability.log_level = "DEBUG".into();
        assert!(validate_config(&config).is_ok());
    }
}
