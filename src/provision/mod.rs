//! Provisioning module.
//!
//! This module implements the two-phase provisioning flow: parameter
//! validation at request admission, scenario resolution, deployment
//! parameter construction, and driving the external deployment engine.

mod types;
mod validator;
mod resolver;
mod params;
mod engine;
mod templates;
mod deployer;

pub use types::{
    DeploymentOutcome, InstanceMetadata, OUTPUT_FULLY_QUALIFIED_DOMAIN_NAME, PlanMetadata,
    ProvisioningContext, ProvisioningRequest, ServerScenario, TemplateParameters,
};
pub use validator::validate_provisioning_parameters;
pub use resolver::ScenarioResolver;
pub use params::{build_existing_server_parameters, build_template_parameters};
pub use engine::DeploymentEngine;
pub use templates::{EXISTING_SERVER_TEMPLATE, NEW_SERVER_TEMPLATE};
pub use deployer::DeploymentDriver;

#[cfg(test)]
pub use engine::MockDeploymentEngine;
