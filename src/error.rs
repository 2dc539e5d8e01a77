//! Error types for the dbroker provisioning system.
//!
//! This module provides the error hierarchy for all operations in the
//! provisioning lifecycle: configuration, parameter validation, scenario
//! resolution, and deployment-engine invocation.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the dbroker provisioning system.
#[derive(Debug, Error)]
pub enum BrokerError {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Provisioning errors.
    #[error("Provisioning error: {0}")]
    Provision(#[from] ProvisionError),

    /// Deployment-engine errors.
    #[error("Deployment error: {0}")]
    Deployment(#[from] DeploymentError),

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file was not found.
    #[error("Configuration file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// The configuration file could not be parsed.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// Validation failed.
    #[error("Configuration validation failed: {message}")]
    ValidationError {
        /// Description of the validation error.
        message: String,
        /// Field that failed validation.
        field: Option<String>,
    },

    /// The named cloud environment is not known.
    #[error("Unknown cloud environment: {name}")]
    UnknownEnvironment {
        /// The unrecognized environment name.
        name: String,
    },
}

/// Provisioning errors.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// A user-supplied provisioning parameter failed validation.
    ///
    /// Field-scoped and user-correctable; surfaced verbatim at request
    /// admission, never raised mid-pipeline.
    #[error("Invalid value for {field}: {message}")]
    InvalidParameter {
        /// The parameter field that failed validation.
        field: String,
        /// Human-readable description of the problem.
        message: String,
    },

    /// The requested server name is absent from the server registry.
    #[error("Can't find server \"{server_name}\" in the server registry")]
    ServerNotFound {
        /// The missing server name.
        server_name: String,
    },

    /// A registry entry that passed validation and resolution disappeared
    /// before deployment. Treated as an invariant violation.
    #[error("Server \"{server_name}\" vanished from the registry after resolution")]
    RegistryInvariant {
        /// The server name that can no longer be resolved.
        server_name: String,
    },

    /// The deployment engine returned an outcome without a required output.
    #[error("Deployment outcome is missing required output: {key}")]
    MissingDeploymentOutput {
        /// The absent or wrongly-shaped output key.
        key: String,
    },

    /// A step was invoked without the context a prior step must produce.
    #[error("Step {step} requires a provisioning context from a prior step")]
    MissingContext {
        /// Name of the step that was invoked.
        step: String,
    },
}

/// Deployment-engine errors.
#[derive(Debug, Error)]
pub enum DeploymentError {
    /// The engine rejected the deployment request.
    #[error("Deployment {deployment_name} rejected: {message}")]
    Rejected {
        /// Name of the deployment.
        deployment_name: String,
        /// Error message from the engine.
        message: String,
    },

    /// The engine failed while applying the template.
    #[error("Deployment {deployment_name} failed: {message}")]
    Failed {
        /// Name of the deployment.
        deployment_name: String,
        /// Description of the failure.
        message: String,
    },

    /// The engine returned a response that could not be interpreted.
    #[error("Invalid response from deployment engine: {message}")]
    InvalidResponse {
        /// Description of the response issue.
        message: String,
    },
}

/// Result type alias for dbroker operations.
pub type Result<T> = std::result::Result<T, BrokerError>;

impl BrokerError {
    /// Creates a new internal error with the given message.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true if this error is correctable by the requesting user.
    ///
    /// User errors are surfaced synchronously at request time; everything
    /// else aborts the provisioning operation.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Provision(
                ProvisionError::InvalidParameter { .. }
                    | ProvisionError::ServerNotFound { .. }
            )
        )
    }

    /// Returns the offending field name for field-scoped validation errors.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Provision(ProvisionError::InvalidParameter { field, .. }) => {
                Some(field.as_str())
            }
            Self::Config(ConfigError::ValidationError { field, .. }) => field.as_deref(),
            _ => None,
        }
    }
}

impl ConfigError {
    /// Creates a validation error for a specific field.
    #[must_use]
    pub fn validation(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Creates a parse error with the given message.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
        }
    }
}

impl ProvisionError {
    /// Creates a field-scoped parameter validation error.
    #[must_use]
    pub fn invalid_parameter(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a server-not-found error.
    #[must_use]
    pub fn server_not_found(server_name: impl Into<String>) -> Self {
        Self::ServerNotFound {
            server_name: server_name.into(),
        }
    }
}

impl DeploymentError {
    /// Creates a deployment failure error.
    #[must_use]
    pub fn failed(deployment_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed {
            deployment_name: deployment_name.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid-response error.
    #[must_use]
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_user_errors() {
        let err = BrokerError::Provision(ProvisionError::invalid_parameter(
            "firewallStartIPAddress",
            "invalid value",
        ));
        assert!(err.is_user_error());
        assert_eq!(err.field(), Some("firewallStartIPAddress"));
    }

    #[test]
    fn test_internal_errors_are_not_user_errors() {
        let err = BrokerError::Provision(ProvisionError::MissingDeploymentOutput {
            key: String::from("fullyQualifiedDomainName"),
        });
        assert!(!err.is_user_error());
        assert_eq!(err.field(), None);
    }
}
