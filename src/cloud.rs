//! Cloud environment resolution.
//!
//! Maps a cloud environment name to the per-environment constants this
//! crate needs, most importantly the SQL database DNS suffix used to
//! compute fully qualified domain names for pre-existing servers.

use crate::error::{BrokerError, ConfigError, Result};

/// A named cloud environment and its service endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloudEnvironment {
    /// Environment name as it appears in configuration.
    pub name: &'static str,
    /// DNS suffix appended to server names for SQL database endpoints.
    pub sql_database_dns_suffix: &'static str,
}

/// The default environment used when configuration names none.
pub const PUBLIC_CLOUD: CloudEnvironment = CloudEnvironment {
    name: "AzurePublicCloud",
    sql_database_dns_suffix: "database.windows.net",
};

/// Known cloud environments.
const KNOWN_ENVIRONMENTS: &[CloudEnvironment] = &[
    PUBLIC_CLOUD,
    CloudEnvironment {
        name: "AzureUSGovernmentCloud",
        sql_database_dns_suffix: "database.usgovcloudapi.net",
    },
    CloudEnvironment {
        name: "AzureChinaCloud",
        sql_database_dns_suffix: "database.chinacloudapi.cn",
    },
    CloudEnvironment {
        name: "AzureGermanCloud",
        sql_database_dns_suffix: "database.cloudapi.de",
    },
];

/// Resolves a cloud environment by name.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownEnvironment`] if the name does not match
/// any known environment.
pub fn environment_from_name(name: &str) -> Result<&'static CloudEnvironment> {
    KNOWN_ENVIRONMENTS
        .iter()
        .find(|env| env.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| {
            BrokerError::Config(ConfigError::UnknownEnvironment {
                name: name.to_string(),
            })
        })
}

impl CloudEnvironment {
    /// Computes the fully qualified domain name for a server in this
    /// environment.
    #[must_use]
    pub fn qualified_server_name(&self, server_name: &str) -> String {
        format!("{server_name}.{}", self.sql_database_dns_suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_public_cloud() {
        let env = environment_from_name("AzurePublicCloud").unwrap();
        assert_eq!(env.sql_database_dns_suffix, "database.windows.net");
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let env = environment_from_name("azurepubliccloud").unwrap();
        assert_eq!(env.name, "AzurePublicCloud");
    }

    #[test]
    fn test_unknown_environment() {
        let err = environment_from_name("AzureMoonCloud").unwrap_err();
        assert!(matches!(
            err,
            BrokerError::Config(ConfigError::UnknownEnvironment { .. })
        ));
    }

    #[test]
    fn test_qualified_server_name() {
        let env = environment_from_name("AzureChinaCloud").unwrap();
        assert_eq!(
            env.qualified_server_name("prod-1"),
            "prod-1.database.chinacloudapi.cn"
        );
    }
}
