//! Deployment-engine interface.
//!
//! The engine itself is an external collaborator; this module only defines
//! the seam the deployment driver calls through. Exactly one `deploy` call
//! is made per provisioning attempt, and the call is synchronous from the
//! driver's perspective: cancellation and retry policy live with the
//! engine and the pipeline runner.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::error::DeploymentError;

use super::types::{DeploymentOutcome, TemplateParameters};

/// External infrastructure-deployment engine.
///
/// Renders and applies the given template with the supplied parameter map,
/// returning the template's outputs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeploymentEngine: Send + Sync {
    /// Runs one deployment and returns its outputs.
    ///
    /// # Errors
    ///
    /// Returns a [`DeploymentError`] if the engine rejects or fails the
    /// deployment.
    async fn deploy(
        &self,
        deployment_name: &str,
        resource_group: &str,
        location: &str,
        template: &[u8],
        parameters: &TemplateParameters,
        tags: &HashMap<String, String>,
    ) -> Result<DeploymentOutcome, DeploymentError>;
}

#[async_trait]
impl DeploymentEngine for Box<dyn DeploymentEngine> {
    async fn deploy(
        &self,
        deployment_name: &str,
        resource_group: &str,
        location: &str,
        template: &[u8],
        parameters: &TemplateParameters,
        tags: &HashMap<String, String>,
    ) -> Result<DeploymentOutcome, DeploymentError> {
        (**self)
            .deploy(
                deployment_name,
                resource_group,
                location,
                template,
                parameters,
                tags,
            )
            .await
    }
}
