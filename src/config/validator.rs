//! Broker configuration validation.
//!
//! Validates the server registry before the broker starts serving
//! provisioning requests, ensuring every entry is complete and internally
//! consistent.

use crate::error::{BrokerError, ConfigError, Result};
use tracing::debug;

use super::spec::{BrokerConfig, ServerRegistryEntry};

/// Validator for broker configurations.
#[derive(Debug, Default)]
pub struct ConfigValidator;

/// Validation result containing all problems found.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of warnings (non-fatal issues).
    pub warnings: Vec<String>,
}

/// A single validation error.
#[derive(Debug)]
pub struct ValidationError {
    /// The field path that failed validation.
    pub field: String,
    /// The error message.
    pub message: String,
}

impl ConfigValidator {
    /// Creates a new validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates a broker configuration.
    ///
    /// # Errors
    ///
    /// Returns an error carrying the first validation failure.
    pub fn validate(&self, config: &BrokerConfig) -> Result<ValidationResult> {
        let mut result = ValidationResult::default();

        Self::validate_environment(config, &mut result);
        Self::validate_registry(config, &mut result);

        if result.errors.is_empty() {
            debug!("Broker configuration validation passed");
            Ok(result)
        } else {
            let first_error = &result.errors[0];
            Err(BrokerError::Config(ConfigError::ValidationError {
                message: first_error.message.clone(),
                field: Some(first_error.field.clone()),
            }))
        }
    }

    /// Validates the environment name is present.
    fn validate_environment(config: &BrokerConfig, result: &mut ValidationResult) {
        if config.environment.is_empty() {
            result.errors.push(ValidationError {
                field: String::from("environment"),
                message: String::from("Cloud environment name cannot be empty"),
            });
        } else if crate::cloud::environment_from_name(&config.environment).is_err() {
            result.warnings.push(format!(
                "environment: '{}' is not a known cloud environment",
                config.environment
            ));
        }
    }

    /// Validates all registry entries.
    fn validate_registry(config: &BrokerConfig, result: &mut ValidationResult) {
        if config.servers.is_empty() {
            result
                .warnings
                .push(String::from("No servers registered; only the new-server scenario is usable"));
            return;
        }

        for (key, entry) in &config.servers {
            let prefix = format!("servers.{key}");

            if entry.server_name != *key {
                result.errors.push(ValidationError {
                    field: format!("{prefix}.serverName"),
                    message: format!(
                        "Registry key '{key}' does not match serverName '{}'",
                        entry.server_name
                    ),
                });
            }

            Self::validate_entry(entry, &prefix, result);
        }
    }

    /// Validates a single registry entry.
    fn validate_entry(
        entry: &ServerRegistryEntry,
        prefix: &str,
        result: &mut ValidationResult,
    ) {
        let required: &[(&str, &str)] = &[
            ("serverName", &entry.server_name),
            ("resourceGroup", &entry.resource_group),
            ("location", &entry.location),
            ("administratorLogin", &entry.administrator_login),
            (
                "administratorLoginPassword",
                &entry.administrator_login_password,
            ),
        ];

        for (field, value) in required {
            if value.is_empty() {
                result.errors.push(ValidationError {
                    field: format!("{prefix}.{field}"),
                    message: format!("{field} cannot be empty"),
                });
            }
        }
    }
}

impl ValidationResult {
    /// Returns true if validation passed (no errors).
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of errors.
    #[must_use]
    pub const fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Returns the number of warnings.
    #[must_use]
    pub const fn warning_count(&self) -> usize {
        self.warnings.len()
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}
