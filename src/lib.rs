// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(warnings)]                    // All warnings are treated as errors
#![deny(unsafe_code)]                 // Unsafe code is forbidden
#![deny(missing_docs)]                // All public items must be documented
#![deny(dead_code)]                   // Unused code is forbidden
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_imports)]              // Unused imports are forbidden
#![deny(unused_variables)]            // Unused variables are forbidden
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden
#![forbid(unsafe_op_in_unsafe_fn)]    // Unsafe ops in unsafe fns are forbidden

// Clippy lints (warnings only)
#![warn(clippy::all)]                 // All standard Clippy lints
#![warn(clippy::pedantic)]            // Very strict Clippy lints
#![warn(clippy::nursery)]             // Experimental lints
#![warn(clippy::unwrap_used)]         // unwrap() warning
#![warn(clippy::expect_used)]         // expect() warning
#![warn(clippy::panic)]               // panic!() warning
#![warn(clippy::print_stdout)]        // println!() warning
#![warn(clippy::todo)]                // TODO warning
#![warn(clippy::unimplemented)]       // unimplemented!() warning
#![warn(clippy::missing_const_for_fn)] // Force const when possible
#![warn(clippy::unwrap_in_result)]    // unwrap() in Result warning
#![warn(clippy::module_inception)]    // Module with same name as crate warning
#![warn(clippy::redundant_clone)]     // Useless clones warning
#![warn(clippy::shadow_unrelated)]    // Shadowing unrelated variables warning
#![warn(clippy::too_many_arguments)]  // Limit function arguments
#![warn(clippy::cognitive_complexity)] // Limit cognitive complexity

// Safety and robustness lints
#![deny(overflowing_literals)]        // Overflowing literals are forbidden
#![deny(arithmetic_overflow)]         // Arithmetic overflow is forbidden

// ============================================================================
// Crate Documentation
// ============================================================================

//! # dbroker
//!
//! A two-phase provisioning orchestrator for managed SQL database resources.
//!
//! ## Overview
//!
//! dbroker sits between a service-broker runtime and an external
//! infrastructure-deployment engine. For each provisioning request it:
//!
//! - Validates the user-supplied parameters, including IPv4 firewall ranges
//! - Resolves the scenario: create a brand-new backing server, or attach to
//!   a pre-registered existing one
//! - Synthesizes the flat parameter map the deployment engine consumes
//! - Drives the engine and folds its outputs back into the provisioning
//!   context
//!
//! ## Architecture
//!
//! Provisioning is an ordered two-step pipeline executed by an external
//! runner that persists the context between steps:
//!
//! 1. **`preProvision`**: scenario resolution and identifier generation
//! 2. **`deployARMTemplate`**: deployment-engine invocation
//!
//! Each step returns a new, fully-populated immutable context, so the
//! persisted state is always internally consistent and any step can be
//! safely re-run after a partial failure.
//!
//! ## Modules
//!
//! - [`config`]: Broker configuration and the static server registry
//! - [`cloud`]: Cloud environment resolution (DNS suffixes)
//! - [`generate`]: Fresh identifier and secret generation
//! - [`provision`]: Validation, scenario resolution, parameters, deployment
//! - [`pipeline`]: The ordered provisioning step pipeline
//!
//! ## Example
//!
//! ```yaml
//! environment: AzurePublicCloud
//! servers:
//!   prod-1:
//!     serverName: prod-1
//!     resourceGroup: rg-prod
//!     location: eastus
//!     administratorLogin: dbadmin
//!     administratorLoginPassword: s3cr3tS3cr3t
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod cloud;
pub mod config;
pub mod error;
pub mod generate;
pub mod pipeline;
pub mod provision;

// ============================================================================
// Re-exports
// ============================================================================

pub use cloud::{CloudEnvironment, environment_from_name};
pub use config::{BrokerConfig, ConfigParser, ConfigValidator, ServerRegistryEntry};
pub use error::{BrokerError, ConfigError, DeploymentError, ProvisionError, Result};
pub use pipeline::{
    DatabaseBroker, Provisioner, ProvisioningStep, STEP_DEPLOY_TEMPLATE, STEP_PRE_PROVISION,
};
pub use provision::{
    DeploymentDriver, DeploymentEngine, DeploymentOutcome, InstanceMetadata, PlanMetadata,
    ProvisioningContext, ProvisioningRequest, ScenarioResolver, ServerScenario,
    TemplateParameters, validate_provisioning_parameters,
};
