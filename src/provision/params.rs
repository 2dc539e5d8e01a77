//! Deployment-engine parameter construction.
//!
//! Pure mapping from plan metadata, provisioning context, and request into
//! the flat string-keyed parameter map the deployment engine consumes.

use super::types::{PlanMetadata, ProvisioningContext, ProvisioningRequest, TemplateParameters};

/// Builds the full parameter map for a new-server deployment.
///
/// Always includes the server identity, credentials, database name, and
/// the three plan-extended properties. The firewall keys are included only
/// when the request carries a non-empty value: the engine rejects empty
/// strings for fields typed as IPv4 addresses, so omission is the
/// representation of "no firewall rule requested".
#[must_use]
pub fn build_template_parameters(
    plan: &PlanMetadata,
    context: &ProvisioningContext,
    request: &ProvisioningRequest,
) -> TemplateParameters {
    let mut params = TemplateParameters::from([
        (
            String::from("serverName"),
            context.server_name().to_string(),
        ),
        (
            String::from("administratorLogin"),
            context.administrator_login().to_string(),
        ),
        (
            String::from("administratorLoginPassword"),
            context.administrator_login_password().to_string(),
        ),
        (
            String::from("databaseName"),
            context.database_name.clone(),
        ),
        (String::from("edition"), plan.edition.clone()),
        (
            String::from("requestedServiceObjectiveName"),
            plan.requested_service_objective_name.clone(),
        ),
        (String::from("maxSizeBytes"), plan.max_size_bytes.clone()),
    ]);

    if !request.firewall_ip_start.is_empty() {
        params.insert(
            String::from("firewallStartIpAddress"),
            request.firewall_ip_start.clone(),
        );
    }
    if !request.firewall_ip_end.is_empty() {
        params.insert(
            String::from("firewallEndIpAddress"),
            request.firewall_ip_end.clone(),
        );
    }

    params
}

/// Builds the reduced parameter map for an existing-server deployment.
///
/// Credentials and firewall rules belong to the pre-existing server and
/// are never re-applied; only the database itself is parameterized.
#[must_use]
pub fn build_existing_server_parameters(
    plan: &PlanMetadata,
    context: &ProvisioningContext,
) -> TemplateParameters {
    TemplateParameters::from([
        (
            String::from("serverName"),
            context.server_name().to_string(),
        ),
        (
            String::from("databaseName"),
            context.database_name.clone(),
        ),
        (String::from("edition"), plan.edition.clone()),
        (
            String::from("requestedServiceObjectiveName"),
            plan.requested_service_objective_name.clone(),
        ),
        (String::from("maxSizeBytes"), plan.max_size_bytes.clone()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provision::types::ServerScenario;

    fn plan() -> PlanMetadata {
        PlanMetadata {
            name: String::from("standard-s1"),
            edition: String::from("Standard"),
            requested_service_objective_name: String::from("S1"),
            max_size_bytes: String::from("268435456000"),
        }
    }

    fn new_server_context() -> ProvisioningContext {
        ProvisioningContext {
            deployment_name: String::from("d-1"),
            database_name: String::from("db1"),
            scenario: ServerScenario::New {
                server_name: String::from("srv-1"),
                administrator_login: String::from("login1"),
                administrator_login_password: String::from("Password1"),
                fully_qualified_domain_name: None,
            },
        }
    }

    #[test]
    fn test_full_map_without_firewall() {
        let params = build_template_parameters(
            &plan(),
            &new_server_context(),
            &ProvisioningRequest::new_server(),
        );

        assert_eq!(params.len(), 7);
        assert_eq!(params["serverName"], "srv-1");
        assert_eq!(params["administratorLogin"], "login1");
        assert_eq!(params["administratorLoginPassword"], "Password1");
        assert_eq!(params["databaseName"], "db1");
        assert_eq!(params["edition"], "Standard");
        assert_eq!(params["requestedServiceObjectiveName"], "S1");
        assert_eq!(params["maxSizeBytes"], "268435456000");
        assert!(!params.contains_key("firewallStartIpAddress"));
        assert!(!params.contains_key("firewallEndIpAddress"));
    }

    #[test]
    fn test_full_map_with_firewall() {
        let request =
            ProvisioningRequest::new_server().with_firewall_range("1.2.3.4", "1.2.3.10");
        let params = build_template_parameters(&plan(), &new_server_context(), &request);

        assert_eq!(params.len(), 9);
        assert_eq!(params["firewallStartIpAddress"], "1.2.3.4");
        assert_eq!(params["firewallEndIpAddress"], "1.2.3.10");
    }

    #[test]
    fn test_lone_bound_is_passed_verbatim() {
        // Validation guarantees both-or-neither upstream; the builder
        // itself includes whatever is non-empty.
        let mut request = ProvisioningRequest::new_server();
        request.firewall_ip_start = String::from("1.2.3.4");
        let params = build_template_parameters(&plan(), &new_server_context(), &request);

        assert_eq!(params.len(), 8);
        assert_eq!(params["firewallStartIpAddress"], "1.2.3.4");
        assert!(!params.contains_key("firewallEndIpAddress"));
    }

    #[test]
    fn test_existing_server_map_is_reduced() {
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
        let params = build_existing_server_parameters(&plan(), &context);

        assert_eq!(params.len(), 5);
        assert_eq!(params["serverName"], "prod-1");
        assert_eq!(params["databaseName"], "db1");
        assert!(!params.contains_key("administratorLogin"));
        assert!(!params.contains_key("firewallStartIpAddress"));
    }
}
