//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, connection limits > 0)
//! - Check the bind address parses as a socket address
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Pure function: `ServerConfig → Result<(), Vec<ValidationError>>`
//! - Runs before a config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::ServerConfig;

/// A single semantic defect in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// `listener.bind_address` is not a valid socket address.
    InvalidBindAddress(String),
    /// `listener.max_connections` is zero; the server could accept nothing.
    ZeroMaxConnections,
    /// `timeouts.read_idle_ms` is zero; every connection would close
    /// before reading anything.
    ZeroReadIdleTimeout,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidBindAddress(addr) => {
                write!(f, "invalid bind address: {}", addr)
            }
            ValidationError::ZeroMaxConnections => write!(f, "max_connections must be > 0"),
            ValidationError::ZeroReadIdleTimeout => write!(f, "read_idle_ms must be > 0"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a configuration, collecting every defect.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.listener.max_connections == 0 {
        errors.push(ValidationError::ZeroMaxConnections);
    }

    if config.timeouts.read_idle_ms == 0 {
        errors.push(ValidationError::ZeroReadIdleTimeout);
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

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&ServerConfig::default()).is_ok());
    }

    #[test]
    fn all_defects_are_reported_together() {
        let mut config = ServerConfig::default();
        config.listener.bind_address = "not-an-address".to_string();
        config.listener.max_connections = 0;
        config.timeouts.read_idle_ms = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::ZeroMaxConnections));
        assert!(errors.contains(&ValidationError::ZeroReadIdleTimeout));
    }

    #[test]
    fn bind_address_must_include_port() {
        let mut config = ServerConfig::default();
        config.listener.bind_address = "127.0.0.1".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::InvalidBindAddress("127.0.0.1".to_string())]
        );
    }
}
