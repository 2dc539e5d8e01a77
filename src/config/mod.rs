//! Configuration module for the dbroker provisioning system.
//!
//! This module handles all configuration-related functionality:
//! - Parsing and deserializing the broker configuration file
//! - Environment variable overrides
//! - Validation of the server registry

mod spec;
mod parser;
mod validator;

pub use spec::{BrokerConfig, ServerRegistryEntry};
pub use parser::{ConfigParser, DEFAULT_CONFIG_FILES, find_config_file};
pub use validator::{ConfigValidator, ValidationError, ValidationResult};
