//! Configuration parser for loading the broker configuration.
//!
//! This module handles loading the server registry from YAML files and
//! environment variables, with proper precedence and error handling.

use crate::error::{BrokerError, ConfigError, Result};
use std::path::Path;
use tracing::{debug, info};

use super::spec::BrokerConfig;

/// Environment variable overriding the cloud environment name.
const ENV_ENVIRONMENT: &str = "DBROKER_ENVIRONMENT";

/// Configuration parser for loading broker configuration.
#[derive(Debug, Default)]
pub struct ConfigParser {
    /// Base path for resolving relative paths.
    base_path: Option<std::path::PathBuf>,
}

impl ConfigParser {
    /// Creates a new configuration parser.
    #[must_use]
    pub const fn new() -> Self {
        Self { base_path: None }
    }

    /// Sets the base path for resolving relative paths.
    #[must_use]
    pub fn with_base_path(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<BrokerConfig> {
        let path = path.as_ref();
        info!("Loading broker configuration from: {}", path.display());

        if !path.exists() {
            return Err(BrokerError::Config(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            }));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            BrokerError::Config(ConfigError::parse(format!(
                "Failed to read {}: {e}",
                path.display()
            )))
        })?;

        Self::parse_yaml(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn parse_yaml(content: &str) -> Result<BrokerConfig> {
        debug!("Parsing YAML broker configuration");

        let config: BrokerConfig = serde_yaml::from_str(content)
            .map_err(|e| BrokerError::Config(ConfigError::parse(format!("YAML parse error: {e}"))))?;

        debug!(
            "Parsed broker configuration with {} registered servers",
            config.servers.len()
        );
        Ok(config)
    }

    /// Loads configuration with environment variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_with_env(&self, path: impl AsRef<Path>) -> Result<BrokerConfig> {
        let mut config = self.load_file(path)?;
        Self::apply_env_overrides(&mut config);
        Ok(config)
    }

    /// Applies environment variable overrides to the configuration.
    fn apply_env_overrides(config: &mut BrokerConfig) {
        if let Ok(environment) = std::env::var(ENV_ENVIRONMENT) {
            debug!("Overriding cloud environment from {ENV_ENVIRONMENT}");
            config.environment = environment;
        }
    }

    /// Loads the .env file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the .env file exists but cannot be loaded.
    pub fn load_dotenv(&self) -> Result<()> {
        let env_path = self
            .base_path
            .as_ref()
            .map_or_else(|| std::path::PathBuf::from(".env"), |p| p.join(".env"));

        if env_path.exists() {
            info!("Loading environment from: {}", env_path.display());
            dotenvy::from_path(&env_path).map_err(|e| {
                BrokerError::Config(ConfigError::parse(format!(
                    "Failed to load .env file: {e}"
                )))
            })?;
        } else {
            debug!(".env file not found at: {}", env_path.display());
        }

        Ok(())
    }
}

/// Default configuration file names to search for.
pub const DEFAULT_CONFIG_FILES: &[&str] = &[
    "dbroker.yaml",
    "dbroker.yml",
    "broker.yaml",
    "broker.yml",
];

/// Finds the configuration file in the given directory or its parents.
///
/// # Errors
///
/// Returns an error if no configuration file is found.
pub fn find_config_file(start_dir: impl AsRef<Path>) -> Result<std::path::PathBuf> {
    let start = start_dir.as_ref();
    let mut current = start.to_path_buf();

    loop {
        for filename in DEFAULT_CONFIG_FILES {
            let config_path = current.join(filename);
            if config_path.exists() {
                info!("Found configuration file: {}", config_path.display());
                return Ok(config_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    Err(BrokerError::Config(ConfigError::FileNotFound {
        path: start.join(DEFAULT_CONFIG_FILES[0]),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let yaml = r"
environment: AzurePublicCloud
servers: {}
";
        let config = ConfigParser::parse_yaml(yaml).unwrap();
        assert_eq!(config.environment, "AzurePublicCloud");
        assert!(config.servers.is_empty());
    }

    #[test]
    fn test_parse_registry_config() {
        let yaml = r"
environment: AzureUSGovernmentCloud
servers:
  prod-1:
    serverName: prod-1
    resourceGroup: rg-prod
    location: eastus
    administratorLogin: dbadmin
    administratorLoginPassword: s3cr3tS3cr3t
";
        let config = ConfigParser::parse_yaml(yaml).unwrap();
        assert_eq!(config.environment, "AzureUSGovernmentCloud");
        assert_eq!(config.servers.len(), 1);

        let entry = config.server("prod-1").unwrap();
        assert_eq!(entry.resource_group, "rg-prod");
        assert_eq!(entry.administrator_login, "dbadmin");
    }

    #[test]
    fn test_environment_defaults_when_absent() {
        let config = ConfigParser::parse_yaml("servers: {}").unwrap();
        assert_eq!(config.environment, "AzurePublicCloud");
    }

    #[test]
    fn test_load_file_from_tempdir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dbroker.yaml");
        std::fs::write(&path, "environment: AzureChinaCloud\nservers: {}\n").unwrap();

        let parser = ConfigParser::new();
        let config = parser.load_file(&path).unwrap();
        assert_eq!(config.environment, "AzureChinaCloud");

        let found = find_config_file(dir.path()).unwrap();
        assert_eq!(found, path);
    }

    #[test]
    fn test_missing_file() {
        let parser = ConfigParser::new();
        let err = parser.load_file("/nonexistent/dbroker.yaml").unwrap_err();
        assert!(matches!(
            err,
            BrokerError::Config(ConfigError::FileNotFound { .. })
        ));
    }
}
