//! Provisioning parameter validation.
//!
//! Runs once at request admission, before any provisioning work begins.
//! All checks are side-effect free and every failure is scoped to the
//! offending request field.

use std::net::Ipv4Addr;
use tracing::debug;

use crate::config::BrokerConfig;
use crate::error::{BrokerError, ProvisionError, Result};

use super::types::ProvisioningRequest;

/// Validates user-supplied provisioning parameters against the server
/// registry.
///
/// Rules, in order: a named server must exist in the registry; firewall
/// bounds are both-or-neither; each bound must parse as IPv4; the start
/// bound must not exceed the end bound under unsigned 32-bit comparison
/// of the octets.
///
/// # Errors
///
/// Returns a field-scoped [`ProvisionError::InvalidParameter`] describing
/// the first rule the request violates.
pub fn validate_provisioning_parameters(
    request: &ProvisioningRequest,
    config: &BrokerConfig,
) -> Result<()> {
    if !request.server_name.is_empty() && !config.has_server(&request.server_name) {
        return Err(BrokerError::Provision(ProvisionError::invalid_parameter(
            "serverName",
            format!(
                "can't find serverName \"{}\" in the server registry",
                request.server_name
            ),
        )));
    }

    if !request.firewall_ip_start.is_empty() || !request.firewall_ip_end.is_empty() {
        if request.firewall_ip_start.is_empty() {
            return Err(BrokerError::Provision(ProvisionError::invalid_parameter(
                "firewallStartIPAddress",
                "must be set when firewallEndIPAddress is set",
            )));
        }
        if request.firewall_ip_end.is_empty() {
            return Err(BrokerError::Provision(ProvisionError::invalid_parameter(
                "firewallEndIPAddress",
                "must be set when firewallStartIPAddress is set",
            )));
        }

        // Only dotted-decimal IPv4 is understood; Ipv4Addr rejects IPv6
        // and garbage here, before the ordering check.
        let start: Ipv4Addr = request.firewall_ip_start.parse().map_err(|_| {
            BrokerError::Provision(ProvisionError::invalid_parameter(
                "firewallStartIPAddress",
                format!("invalid value: \"{}\"", request.firewall_ip_start),
            ))
        })?;
        let end: Ipv4Addr = request.firewall_ip_end.parse().map_err(|_| {
            BrokerError::Provision(ProvisionError::invalid_parameter(
                "firewallEndIPAddress",
                format!("invalid value: \"{}\"", request.firewall_ip_end),
            ))
        })?;

        // Big-endian u32 comparison of the four octets.
        if u32::from(start) > u32::from(end) {
            return Err(BrokerError::Provision(ProvisionError::invalid_parameter(
                "firewallEndIPAddress",
                format!(
                    "invalid value: \"{}\". Must be greater than or equal to firewallStartIPAddress",
                    request.firewall_ip_end
                ),
            )));
        }
    }

    debug!("Provisioning parameters validated");
    Ok(())
}
