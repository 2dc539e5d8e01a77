//! Embedded deployment templates.
//!
//! The driver hands one of these documents to the deployment engine
//! depending on the resolved scenario. The engine owns rendering and
//! applying them; this crate only selects which template to send.

/// Template creating a new backing server plus database and, optionally,
/// a firewall rule.
pub const NEW_SERVER_TEMPLATE: &[u8] = br#"{
  "$schema": "https://schema.management.azure.com/schemas/2015-01-01/deploymentTemplate.json#",
  "contentVersion": "1.0.0.0",
  "parameters": {
    "serverName": { "type": "string" },
    "administratorLogin": { "type": "string" },
    "administratorLoginPassword": { "type": "securestring" },
    "databaseName": { "type": "string" },
    "edition": { "type": "string" },
    "requestedServiceObjectiveName": { "type": "string" },
    "maxSizeBytes": { "type": "string" },
    "firewallStartIpAddress": { "type": "string", "defaultValue": "0.0.0.0" },
    "firewallEndIpAddress": { "type": "string", "defaultValue": "255.255.255.255" },
    "tags": { "type": "object" }
  },
  "resources": [
    {
      "type": "Microsoft.Sql/servers",
      "name": "[parameters('serverName')]",
      "apiVersion": "2015-05-01-preview",
      "location": "[resourceGroup().location]",
      "properties": {
        "administratorLogin": "[parameters('administratorLogin')]",
        "administratorLoginPassword": "[parameters('administratorLoginPassword')]",
        "version": "12.0"
      },
      "tags": "[parameters('tags')]",
      "resources": [
        {
          "type": "firewallrules",
          "name": "AllowSome",
          "apiVersion": "2014-04-01-preview",
          "location": "[resourceGroup().location]",
          "dependsOn": [
            "[concat('Microsoft.Sql/servers/', parameters('serverName'))]"
          ],
          "properties": {
            "startIpAddress": "[parameters('firewallStartIpAddress')]",
            "endIpAddress": "[parameters('firewallEndIpAddress')]"
          }
        },
        {
          "type": "databases",
          "name": "[parameters('databaseName')]",
          "apiVersion": "2014-04-01-preview",
          "location": "[resourceGroup().location]",
          "dependsOn": [
            "[concat('Microsoft.Sql/servers/', parameters('serverName'))]"
          ],
          "properties": {
            "edition": "[parameters('edition')]",
            "requestedServiceObjectiveName": "[parameters('requestedServiceObjectiveName')]",
            "maxSizeBytes": "[parameters('maxSizeBytes')]"
          },
          "tags": "[parameters('tags')]"
        }
      ]
    }
  ],
  "outputs": {
    "fullyQualifiedDomainName": {
      "type": "string",
      "value": "[reference(parameters('serverName')).fullyQualifiedDomainName]"
    }
  }
}
"#;

/// Template creating only a database on a pre-existing server.
pub const EXISTING_SERVER_TEMPLATE: &[u8] = br#"{
  "$schema": "https://schema.management.azure.com/schemas/2015-01-01/deploymentTemplate.json#",
  "contentVersion": "1.0.0.0",
  "parameters": {
    "serverName": { "type": "string" },
    "databaseName": { "type": "string" },
    "edition": { "type": "string" },
    "requestedServiceObjectiveName": { "type": "string" },
    "maxSizeBytes": { "type": "string" },
    "tags": { "type": "object" }
  },
  "resources": [
    {
      "type": "Microsoft.Sql/servers/databases",
      "name": "[concat(parameters('serverName'), '/', parameters('databaseName'))]",
      "apiVersion": "2014-04-01-preview",
      "location": "[resourceGroup().location]",
      "properties": {
        "edition": "[parameters('edition')]",
        "requestedServiceObjectiveName": "[parameters('requestedServiceObjectiveName')]",
        "maxSizeBytes": "[parameters('maxSizeBytes')]"
      },
      "tags": "[parameters('tags')]"
    }
  ],
  "outputs": {}
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_are_valid_json() {
        let new_server: serde_json::Value =
            serde_json::from_slice(NEW_SERVER_TEMPLATE).unwrap();
        assert!(new_server["outputs"]["fullyQualifiedDomainName"].is_object());

        let existing: serde_json::Value =
            serde_json::from_slice(EXISTING_SERVER_TEMPLATE).unwrap();
        assert!(existing["outputs"].as_object().unwrap().is_empty());
    }
}
