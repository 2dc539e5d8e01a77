//! Scenario resolution for provisioning operations.
//!
//! Decides between the new-server and existing-server scenarios, allocates
//! or looks up identifying values, and produces the provisioning context
//! the deployment driver consumes. Re-running resolution regenerates all
//! identifiers together, so a partially failed prior attempt never leaks
//! stale values into the new context.

use std::sync::Arc;
use tracing::{debug, info};

use crate::cloud;
use crate::config::BrokerConfig;
use crate::error::{BrokerError, ProvisionError, Result};
use crate::generate;

use super::types::{ProvisioningContext, ProvisioningRequest, ServerScenario};

/// Resolves a provisioning request into a scenario-specific context.
#[derive(Debug)]
pub struct ScenarioResolver {
    /// Broker configuration holding the server registry.
    config: Arc<BrokerConfig>,
}

impl ScenarioResolver {
    /// Creates a new scenario resolver.
    #[must_use]
    pub const fn new(config: Arc<BrokerConfig>) -> Self {
        Self { config }
    }

    /// Resolves the request into a fully-populated provisioning context.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError::ServerNotFound`] if the request names a
    /// server absent from the registry, or a configuration error if the
    /// cloud environment cannot be resolved.
    pub fn resolve(&self, request: &ProvisioningRequest) -> Result<ProvisioningContext> {
        if request.is_new_server() {
            Ok(Self::resolve_new_server())
        } else {
            self.resolve_existing_server(&request.server_name)
        }
    }

    /// Builds a context for the new-server scenario with freshly generated
    /// identifiers and credentials.
    fn resolve_new_server() -> ProvisioningContext {
        let context = ProvisioningContext {
            deployment_name: generate::new_deployment_name(),
            database_name: generate::new_identifier(),
            scenario: ServerScenario::New {
                server_name: generate::new_server_name(),
                administrator_login: generate::new_identifier(),
                administrator_login_password: generate::new_password(),
                // Not known until the deployment completes.
                fully_qualified_domain_name: None,
            },
        };

        info!(
            deployment = %context.deployment_name,
            server = %context.server_name(),
            "Resolved new-server scenario"
        );
        context
    }

    /// Builds a context for the existing-server scenario from the registry
    /// entry, computing the domain name immediately.
    fn resolve_existing_server(&self, server_name: &str) -> Result<ProvisioningContext> {
        let server = self.config.server(server_name).ok_or_else(|| {
            BrokerError::Provision(ProvisionError::server_not_found(server_name))
        })?;

        let environment = cloud::environment_from_name(&self.config.environment)?;
        debug!(
            environment = environment.name,
            suffix = environment.sql_database_dns_suffix,
            "Resolved cloud environment"
        );

        let context = ProvisioningContext {
            deployment_name: generate::new_deployment_name(),
            database_name: generate::new_identifier(),
            scenario: ServerScenario::Existing {
                server_name: server.server_name.clone(),
                administrator_login: server.administrator_login.clone(),
                administrator_login_password: server.administrator_login_password.clone(),
                fully_qualified_domain_name: environment
                    .qualified_server_name(&server.server_name),
            },
        };

        info!(
            deployment = %context.deployment_name,
            server = %context.server_name(),
            "Resolved existing-server scenario"
        );
        Ok(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerRegistryEntry;
    use std::collections::HashMap;

    fn registry_config() -> Arc<BrokerConfig> {
        Arc::new(BrokerConfig {
            environment: String::from("AzurePublicCloud"),
            servers: HashMap::from([(
                String::from("prod-1"),
                ServerRegistryEntry {
                    server_name: String::from("prod-1"),
                    resource_group: String::from("rg-prod"),
                    location: String::from("eastus"),
                    administrator_login: String::from("dbadmin"),
                    administrator_login_password: String::from("s3cr3tS3cr3t"),
                },
            )]),
        })
    }

    #[test]
    fn test_new_server_generates_everything() {
        let resolver = ScenarioResolver::new(Arc::new(BrokerConfig::default()));
        let context = resolver.resolve(&ProvisioningRequest::new_server()).unwrap();

        assert!(context.is_new_server());
        assert!(!context.deployment_name.is_empty());
        assert!(!context.database_name.is_empty());
        assert!(!context.server_name().is_empty());
        assert!(!context.administrator_login().is_empty());
        assert!(!context.administrator_login_password().is_empty());
        assert_eq!(context.fully_qualified_domain_name(), None);
    }

    #[test]
    fn test_new_server_identifiers_are_distinct_across_calls() {
        let resolver = ScenarioResolver::new(Arc::new(BrokerConfig::default()));
        let first = resolver.resolve(&ProvisioningRequest::new_server()).unwrap();
        let second = resolver.resolve(&ProvisioningRequest::new_server()).unwrap();

        assert_ne!(first.deployment_name, second.deployment_name);
        assert_ne!(first.server_name(), second.server_name());
        assert_ne!(first.administrator_login(), second.administrator_login());
        assert_ne!(
            first.administrator_login_password(),
            second.administrator_login_password()
        );
        assert_ne!(first.database_name, second.database_name);
    }

    #[test]
    fn test_existing_server_copies_registry_credentials() {
        let resolver = ScenarioResolver::new(registry_config());
        let context = resolver
            .resolve(&ProvisioningRequest::existing_server("prod-1"))
            .unwrap();

        assert!(!context.is_new_server());
        assert_eq!(context.server_name(), "prod-1");
        assert_eq!(context.administrator_login(), "dbadmin");
        assert_eq!(context.administrator_login_password(), "s3cr3tS3cr3t");
        assert_eq!(
            context.fully_qualified_domain_name(),
            Some("prod-1.database.windows.net")
        );
        assert!(!context.database_name.is_empty());
    }

    #[test]
    fn test_existing_server_miss_is_not_found() {
        let resolver = ScenarioResolver::new(registry_config());
        let err = resolver
            .resolve(&ProvisioningRequest::existing_server("prod-2"))
            .unwrap_err();

        assert!(matches!(
            err,
            BrokerError::Provision(ProvisionError::ServerNotFound { ref server_name })
                if server_name == "prod-2"
        ));
    }

    #[test]
    fn test_unknown_environment_fails_resolution() {
        let mut config = (*registry_config()).clone();
        config.environment = String::from("AzureMoonCloud");
        let resolver = ScenarioResolver::new(Arc::new(config));

        let err = resolver
            .resolve(&ProvisioningRequest::existing_server("prod-1"))
            .unwrap_err();
        assert!(matches!(err, BrokerError::Config(_)));
    }
}
