//! Provisioning step pipeline.
//!
//! Declares the ordered two-step sequence the external pipeline runner
//! executes: `preProvision` resolves the scenario and `deployARMTemplate`
//! drives the deployment engine. The runner persists the context returned
//! by each step and re-invokes subsequent steps with the persisted value;
//! every step here is safe to re-run with the context of a partially
//! failed prior attempt.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::config::BrokerConfig;
use crate::error::{BrokerError, ProvisionError, Result};
use crate::provision::{
    DeploymentDriver, DeploymentEngine, InstanceMetadata, PlanMetadata, ProvisioningContext,
    ProvisioningRequest, ScenarioResolver, validate_provisioning_parameters,
};

/// Name of the scenario-resolution step.
pub const STEP_PRE_PROVISION: &str = "preProvision";

/// Name of the deployment step.
pub const STEP_DEPLOY_TEMPLATE: &str = "deployARMTemplate";

/// A single named provisioning step.
///
/// The first step of a pipeline receives `None` and ignores any persisted
/// context from a prior attempt; later steps require the context their
/// predecessor produced.
#[async_trait]
pub trait ProvisioningStep: Send + Sync {
    /// The step's stable name, used by the runner for persistence and
    /// resume.
    fn name(&self) -> &'static str;

    /// Executes the step, returning a new fully-populated context.
    async fn execute(
        &self,
        context: Option<ProvisioningContext>,
        instance: &InstanceMetadata,
        plan: &PlanMetadata,
    ) -> Result<ProvisioningContext>;
}

/// The ordered list of steps provisioning one database instance.
pub struct Provisioner {
    /// Steps in execution order.
    steps: Vec<Box<dyn ProvisioningStep>>,
}

/// Entry point tying the broker configuration and deployment engine to the
/// provisioning surface exposed to the broker runtime.
#[derive(Clone)]
pub struct DatabaseBroker {
    /// Broker configuration holding the server registry.
    config: Arc<BrokerConfig>,
    /// The external deployment engine.
    engine: Arc<dyn DeploymentEngine>,
}

/// Step resolving the provisioning scenario.
struct PreProvisionStep {
    resolver: ScenarioResolver,
}

/// Step driving the deployment engine.
struct DeployTemplateStep {
    driver: DeploymentDriver,
}

impl DatabaseBroker {
    /// Creates a new broker surface.
    #[must_use]
    pub fn new(config: Arc<BrokerConfig>, engine: Arc<dyn DeploymentEngine>) -> Self {
        Self { config, engine }
    }

    /// Validates user-supplied provisioning parameters.
    ///
    /// Called once before provisioning begins; no side effects.
    ///
    /// # Errors
    ///
    /// Returns a field-scoped validation error for the first rule the
    /// request violates.
    pub fn validate_provisioning_parameters(&self, request: &ProvisioningRequest) -> Result<()> {
        validate_provisioning_parameters(request, &self.config)
    }

    /// Returns the ordered step pipeline for the given plan.
    #[must_use]
    pub fn provisioner(&self, plan: &PlanMetadata) -> Provisioner {
        info!(plan = %plan.name, "Building provisioning pipeline");
        Provisioner {
            steps: vec![
                Box::new(PreProvisionStep {
                    resolver: ScenarioResolver::new(Arc::clone(&self.config)),
                }),
                Box::new(DeployTemplateStep {
                    driver: DeploymentDriver::new(
                        Arc::clone(&self.engine),
                        Arc::clone(&self.config),
                    ),
                }),
            ],
        }
    }
}

impl Provisioner {
    /// Returns the steps in execution order.
    #[must_use]
    pub fn steps(&self) -> &[Box<dyn ProvisioningStep>] {
        &self.steps
    }

    /// Returns the step names in execution order.
    #[must_use]
    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Looks up a step by name.
    #[must_use]
    pub fn step(&self, name: &str) -> Option<&dyn ProvisioningStep> {
        self.steps
            .iter()
            .find(|s| s.name() == name)
            .map(|s| s.as_ref())
    }

    /// Runs all steps in order, threading the context between them.
    ///
    /// The external runner normally persists the context after each step;
    /// this helper is for callers that do not need step-granular resume.
    ///
    /// # Errors
    ///
    /// Returns the first step failure; the remaining steps are not run.
    pub async fn run(
        &self,
        instance: &InstanceMetadata,
        plan: &PlanMetadata,
    ) -> Result<ProvisioningContext> {
        let mut context = None;
        for step in &self.steps {
            info!(step = step.name(), "Executing provisioning step");
            context = Some(step.execute(context, instance, plan).await?);
        }
        context.ok_or_else(|| BrokerError::internal("provisioner has no steps"))
    }
}

#[async_trait]
impl ProvisioningStep for PreProvisionStep {
    fn name(&self) -> &'static str {
        STEP_PRE_PROVISION
    }

    /// Resolves the scenario from the request, ignoring any persisted
    /// context. A re-run regenerates all identifiers together, so the
    /// downstream step never sees a mix of old and new values.
    async fn execute(
        &self,
        _context: Option<ProvisioningContext>,
        instance: &InstanceMetadata,
        _plan: &PlanMetadata,
    ) -> Result<ProvisioningContext> {
        self.resolver.resolve(&instance.request)
    }
}

#[async_trait]
impl ProvisioningStep for DeployTemplateStep {
    fn name(&self) -> &'static str {
        STEP_DEPLOY_TEMPLATE
    }

    async fn execute(
        &self,
        context: Option<ProvisioningContext>,
        instance: &InstanceMetadata,
        plan: &PlanMetadata,
    ) -> Result<ProvisioningContext> {
        let context = context.ok_or_else(|| {
            BrokerError::Provision(ProvisionError::MissingContext {
                step: String::from(STEP_DEPLOY_TEMPLATE),
            })
        })?;
        self.driver.deploy(context, instance, plan).await
    }
}

impl std::fmt::Debug for Provisioner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provisioner")
            .field("steps", &self.step_names())
            .finish()
    }
}

impl std::fmt::Debug for DatabaseBroker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseBroker")
            .field("environment", &self.config.environment)
            .field("servers", &self.config.servers.len())
            .finish_non_exhaustive()
    }
}
