//! Deployment driver.
//!
//! Drives the deployment engine with the scenario-appropriate template,
//! target resource group, and location, then folds the engine's outputs
//! back into the provisioning context. One engine invocation per attempt;
//! retry policy belongs to the pipeline runner.

use std::sync::Arc;
use tracing::info;

use crate::config::BrokerConfig;
use crate::error::{BrokerError, ProvisionError, Result};

use super::engine::DeploymentEngine;
use super::params::{build_existing_server_parameters, build_template_parameters};
use super::templates::{EXISTING_SERVER_TEMPLATE, NEW_SERVER_TEMPLATE};
use super::types::{
    InstanceMetadata, OUTPUT_FULLY_QUALIFIED_DOMAIN_NAME, PlanMetadata, ProvisioningContext,
    ServerScenario,
};

/// Drives the deployment engine for one provisioning operation.
pub struct DeploymentDriver {
    /// The external deployment engine.
    engine: Arc<dyn DeploymentEngine>,
    /// Broker configuration holding the server registry.
    config: Arc<BrokerConfig>,
}

impl DeploymentDriver {
    /// Creates a new deployment driver.
    #[must_use]
    pub fn new(engine: Arc<dyn DeploymentEngine>, config: Arc<BrokerConfig>) -> Self {
        Self { engine, config }
    }

    /// Deploys the resolved scenario and returns the completed context.
    ///
    /// # Errors
    ///
    /// Returns a deployment error if the engine fails, or a provisioning
    /// error if the registry or the engine outputs violate the invariants
    /// established during resolution.
    pub async fn deploy(
        &self,
        context: ProvisioningContext,
        instance: &InstanceMetadata,
        plan: &PlanMetadata,
    ) -> Result<ProvisioningContext> {
        if context.is_new_server() {
            self.deploy_new_server(context, instance, plan).await
        } else {
            self.deploy_existing_server(context, instance, plan).await
        }
    }

    /// Deploys the new-server template into the request's target resource
    /// group and location, then extracts the server's domain name from the
    /// engine outputs.
    async fn deploy_new_server(
        &self,
        context: ProvisioningContext,
        instance: &InstanceMetadata,
        plan: &PlanMetadata,
    ) -> Result<ProvisioningContext> {
        let parameters = build_template_parameters(plan, &context, &instance.request);

        info!(
            deployment = %context.deployment_name,
            resource_group = %instance.resource_group,
            location = %instance.location,
            "Deploying new-server template"
        );

        let outputs = self
            .engine
            .deploy(
                &context.deployment_name,
                &instance.resource_group,
                &instance.location,
                NEW_SERVER_TEMPLATE,
                &parameters,
                &instance.tags,
            )
            .await?;

        let domain_name = outputs
            .get(OUTPUT_FULLY_QUALIFIED_DOMAIN_NAME)
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| {
                BrokerError::Provision(ProvisionError::MissingDeploymentOutput {
                    key: String::from(OUTPUT_FULLY_QUALIFIED_DOMAIN_NAME),
                })
            })?
            .to_string();

        info!(
            deployment = %context.deployment_name,
            domain = %domain_name,
            "New-server deployment completed"
        );

        let ServerScenario::New {
            server_name,
            administrator_login,
            administrator_login_password,
            ..
        } = context.scenario
        else {
            // deploy_new_server is only reached for the new scenario.
            return Err(BrokerError::internal(
                "new-server deployment invoked with an existing-server context",
            ));
        };

        Ok(ProvisioningContext {
            deployment_name: context.deployment_name,
            database_name: context.database_name,
            scenario: ServerScenario::New {
                server_name,
                administrator_login,
                administrator_login_password,
                fully_qualified_domain_name: Some(domain_name),
            },
        })
    }

    /// Deploys the existing-server template into the registry entry's
    /// resource group and location. The domain name was already computed
    /// during resolution and is left untouched.
    async fn deploy_existing_server(
        &self,
        context: ProvisioningContext,
        instance: &InstanceMetadata,
        plan: &PlanMetadata,
    ) -> Result<ProvisioningContext> {
        // Validation and resolution both saw this entry; a miss here is an
        // invariant violation, not a user error.
        let server = self.config.server(context.server_name()).ok_or_else(|| {
            BrokerError::Provision(ProvisionError::RegistryInvariant {
                server_name: context.server_name().to_string(),
            })
        })?;

        let parameters = build_existing_server_parameters(plan, &context);

        info!(
            deployment = %context.deployment_name,
            server = %context.server_name(),
            resource_group = %server.resource_group,
            location = %server.location,
            "Deploying existing-server template"
        );

        self.engine
            .deploy(
                &context.deployment_name,
                &server.resource_group,
                &server.location,
                EXISTING_SERVER_TEMPLATE,
                &parameters,
                &instance.tags,
            )
            .await?;

        info!(
            deployment = %context.deployment_name,
            "Existing-server deployment completed"
        );

        Ok(context)
    }
}

impl std::fmt::Debug for DeploymentDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeploymentDriver")
            .field("environment", &self.config.environment)
            .finish_non_exhaustive()
    }
}
