//! Broker configuration types.
//!
//! This module defines the statically-configured state the broker loads
//! once at process start: the cloud environment name and the registry of
//! pre-existing servers available for attachment. The registry is never
//! mutated after load; provisioning code looks entries up by exact name.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The root broker configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BrokerConfig {
    /// Cloud environment name (e.g. "AzurePublicCloud").
    #[serde(default = "default_environment")]
    pub environment: String,
    /// Registry of pre-existing servers, keyed by server name.
    #[serde(default)]
    pub servers: HashMap<String, ServerRegistryEntry>,
}

/// A statically-configured record describing a pre-existing backing server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServerRegistryEntry {
    /// Server name.
    pub server_name: String,
    /// Resource group the server lives in.
    pub resource_group: String,
    /// Location/region of the server.
    pub location: String,
    /// Administrator login.
    pub administrator_login: String,
    /// Administrator login password.
    pub administrator_login_password: String,
}

fn default_environment() -> String {
    String::from("AzurePublicCloud")
}

impl BrokerConfig {
    /// Creates a configuration with an empty registry for the given
    /// environment.
    #[must_use]
    pub fn new(environment: impl Into<String>) -> Self {
        Self {
            environment: environment.into(),
            servers: HashMap::new(),
        }
    }

    /// Looks up a registry entry by exact server name.
    #[must_use]
    pub fn server(&self, name: &str) -> Option<&ServerRegistryEntry> {
        self.servers.get(name)
    }

    /// Returns true if the registry contains the named server.
    #[must_use]
    pub fn has_server(&self, name: &str) -> bool {
        self.servers.contains_key(name)
    }

    /// Returns all registered server names.
    #[must_use]
    pub fn server_names(&self) -> Vec<&str> {
        self.servers.keys().map(String::as_str).collect()
    }
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self::new(default_environment())
    }
}
