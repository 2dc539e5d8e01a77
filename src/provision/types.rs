//! Provisioning data types.
//!
//! This module defines the types threaded through a provisioning
//! operation: the user request, the plan and instance metadata handed to
//! each step, and the context each step produces. The context is persisted
//! between steps by the external pipeline runner, so everything here
//! serializes with stable camelCase keys.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Engine output key carrying the new server's domain name.
pub const OUTPUT_FULLY_QUALIFIED_DOMAIN_NAME: &str = "fullyQualifiedDomainName";

/// Flat string-keyed parameter map handed to the deployment engine.
pub type TemplateParameters = HashMap<String, String>;

/// Key/value outputs returned by the deployment engine.
pub type DeploymentOutcome = HashMap<String, serde_json::Value>;

/// User-supplied provisioning parameters.
///
/// An empty `server_name` selects the new-server scenario; a non-empty one
/// attaches to a pre-registered existing server. The firewall bounds are
/// both-or-neither.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProvisioningRequest {
    /// Existing server to attach to; empty requests a brand-new server.
    #[serde(default, rename = "server")]
    pub server_name: String,
    /// First IPv4 address of the allowed firewall range.
    #[serde(default, rename = "firewallStartIPAddress")]
    pub firewall_ip_start: String,
    /// Last IPv4 address of the allowed firewall range.
    #[serde(default, rename = "firewallEndIPAddress")]
    pub firewall_ip_end: String,
}

/// Plan metadata copied verbatim into deployment parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlanMetadata {
    /// Plan name, for logging and deployment tags.
    pub name: String,
    /// Database edition (e.g. "Basic", "Standard").
    pub edition: String,
    /// Requested service objective name (e.g. "S1").
    pub requested_service_objective_name: String,
    /// Maximum database size in bytes, passed through verbatim.
    pub max_size_bytes: String,
}

/// Standard provisioning metadata threaded to every step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InstanceMetadata {
    /// The user request this operation was admitted with.
    pub request: ProvisioningRequest,
    /// Target resource group for new-server deployments.
    pub resource_group: String,
    /// Target location for new-server deployments.
    pub location: String,
    /// Tags applied to created resources.
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

/// The accumulating record of facts about one provisioning operation.
///
/// Each step returns a new, fully-populated context; nothing is filled in
/// piecemeal, so a persisted context is always internally consistent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProvisioningContext {
    /// Name of the deployment driven by this operation.
    pub deployment_name: String,
    /// Generated database name.
    pub database_name: String,
    /// Scenario-specific server facts.
    #[serde(flatten)]
    pub scenario: ServerScenario,
}

/// The two mutually exclusive provisioning scenarios.
///
/// Carrying per-scenario fields in a tagged variant means there is no
/// "new server" flag to cross-check and no field that is only meaningful
/// in one branch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "scenario", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ServerScenario {
    /// A brand-new backing server is created by the deployment.
    New {
        /// Generated server name.
        server_name: String,
        /// Generated administrator login.
        administrator_login: String,
        /// Generated administrator login password.
        administrator_login_password: String,
        /// Domain name; unknown until deployment completes.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fully_qualified_domain_name: Option<String>,
    },
    /// The database attaches to a pre-registered existing server.
    Existing {
        /// Server name copied from the registry.
        server_name: String,
        /// Administrator login copied from the registry.
        administrator_login: String,
        /// Administrator login password copied from the registry.
        administrator_login_password: String,
        /// Domain name; already known for a pre-existing server.
        fully_qualified_domain_name: String,
    },
}

impl ProvisioningRequest {
    /// Creates a request for the new-server scenario.
    #[must_use]
    pub fn new_server() -> Self {
        Self::default()
    }

    /// Creates a request attaching to a pre-registered server.
    #[must_use]
    pub fn existing_server(server_name: impl Into<String>) -> Self {
        Self {
            server_name: server_name.into(),
            ..Self::default()
        }
    }

    /// Sets the requested firewall range.
    #[must_use]
    pub fn with_firewall_range(
        mut self,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        self.firewall_ip_start = start.into();
        self.firewall_ip_end = end.into();
        self
    }

    /// Returns true if this request selects the new-server scenario.
    #[must_use]
    pub fn is_new_server(&self) -> bool {
        self.server_name.is_empty()
    }
}

impl ProvisioningContext {
    /// Returns the resolved server name.
    #[must_use]
    pub fn server_name(&self) -> &str {
        match &self.scenario {
            ServerScenario::New { server_name, .. }
            | ServerScenario::Existing { server_name, .. } => server_name,
        }
    }

    /// Returns the administrator login.
    #[must_use]
    pub fn administrator_login(&self) -> &str {
        match &self.scenario {
            ServerScenario::New {
                administrator_login, ..
            }
            | ServerScenario::Existing {
                administrator_login, ..
            } => administrator_login,
        }
    }

    /// Returns the administrator login password.
    #[must_use]
    pub fn administrator_login_password(&self) -> &str {
        match &self.scenario {
            ServerScenario::New {
                administrator_login_password,
                ..
            }
            | ServerScenario::Existing {
                administrator_login_password,
                ..
            } => administrator_login_password,
        }
    }

    /// Returns the fully qualified domain name, if known yet.
    #[must_use]
    pub fn fully_qualified_domain_name(&self) -> Option<&str> {
        match &self.scenario {
            ServerScenario::New {
                fully_qualified_domain_name,
                ..
            } => fully_qualified_domain_name.as_deref(),
            ServerScenario::Existing {
                fully_qualified_domain_name,
                ..
            } => Some(fully_qualified_domain_name),
        }
    }

    /// Returns true if this operation creates a brand-new backing server.
    #[must_use]
    pub const fn is_new_server(&self) -> bool {
        matches!(self.scenario, ServerScenario::New { .. })
    }
}

impl std::fmt::Display for ServerScenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let scenario = match self {
            Self::New { .. } => "new",
            Self::Existing { .. } => "existing",
        };
        write!(f, "{scenario}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_scenario_selection() {
        assert!(ProvisioningRequest::new_server().is_new_server());
        assert!(!ProvisioningRequest::existing_server("prod-1").is_new_server());
    }

    #[test]
    fn test_request_wire_names() {
        let request = ProvisioningRequest::existing_server("prod-1")
            .with_firewall_range("1.2.3.4", "1.2.3.10");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["server"], "prod-1");
        assert_eq!(json["firewallStartIPAddress"], "1.2.3.4");
        assert_eq!(json["firewallEndIPAddress"], "1.2.3.10");
    }

    #[test]
    fn test_context_round_trips_through_persistence() {
        let context = ProvisioningContext {
            deployment_name: String::from("d-1"),
            database_name: String::from("db1"),
            scenario: ServerScenario::Existing {
                server_name: String::from("prod-1"),
                administrator_login: String::from("dbadmin"),
                administrator_login_password: String::from("s3cr3tS3cr3t"),
                fully_qualified_domain_name: String::from("prod-1.database.windows.net"),
            },
        };

        let json = serde_json::to_string(&context).unwrap();
        let restored: ProvisioningContext = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, context);
        assert_eq!(restored.server_name(), "prod-1");
        assert!(!restored.is_new_server());
    }

    #[test]
    fn test_new_scenario_fqdn_is_optional() {
        let context = ProvisioningContext {
            deployment_name: String::from("d-1"),
            database_name: String::from("db1"),
            scenario: ServerScenario::New {
                server_name: String::from("srv-1"),
                administrator_login: String::from("login"),
                administrator_login_password: String::from("password"),
                fully_qualified_domain_name: None,
            },
        };

        assert!(context.is_new_server());
        assert_eq!(context.fully_qualified_domain_name(), None);

        let json = serde_json::to_value(&context).unwrap();
        assert_eq!(json["scenario"], "new");
        assert!(json.get("fullyQualifiedDomainName").is_none());
    }
}
