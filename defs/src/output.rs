use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::DeploymentError;

/// Output names the network template must return.
pub const REQUIRED_OUTPUT_KEYS: [&str; 8] = [
    "vnetName",
    "vnetAddressSpace",
    "frontendSubnetName",
    "frontendSubnetPrefix",
    "backendSubnetName",
    "backendSubnetPrefix",
    "frontendNsgName",
    "backendNsgName",
];

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubnetOutput {
    pub name: String,
    pub prefix: String,
}

/// Outputs of a successful network deployment.
///
/// Serialized with six top-level keys; this is the document later stages
/// (key vault, database, app service) read.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentOutputs {
    pub vnet_name: String,
    pub vnet_address_space: String,
    pub frontend_subnet: SubnetOutput,
    pub backend_subnet: SubnetOutput,
    pub frontend_nsg_name: String,
    pub backend_nsg_name: String,
}

impl DeploymentOutputs {
    /// Extracts outputs from a full deployment response (`properties.outputs`),
    /// or from a bare outputs object.
    pub fn from_deployment_response(response: &Value) -> Result<Self, DeploymentError> {
        let outputs = response
            .pointer("/properties/outputs")
            .or_else(|| response.get("outputs"))
            .filter(|outputs| !outputs.is_null())
            .ok_or_else(|| {
                DeploymentError::MalformedResponse(
                    "response does not contain an outputs object".to_string(),
                )
            })?;
        Self::from_provider_outputs(outputs)
    }

    /// Output entries are either `{"type": "String", "value": "..."}` or plain
    /// strings. Names are matched case-insensitively as the resource manager
    /// does not guarantee the casing of output names.
    pub fn from_provider_outputs(outputs: &Value) -> Result<Self, DeploymentError> {
        let map = outputs.as_object().ok_or_else(|| {
            DeploymentError::MalformedResponse("outputs is not an object".to_string())
        })?;

        let mut values: Vec<String> = Vec::with_capacity(REQUIRED_OUTPUT_KEYS.len());
        let mut missing: Vec<&str> = vec![];
        for key in REQUIRED_OUTPUT_KEYS {
            let entry = map.get(key).or_else(|| {
                map.iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case(key))
                    .map(|(_, value)| value)
            });
            match entry.and_then(output_string) {
                Some(value) => values.push(value),
                None => missing.push(key),
            }
        }

        if !missing.is_empty() {
            return Err(DeploymentError::MalformedResponse(format!(
                "missing required outputs: {}",
                missing.join(", ")
            )));
        }

        let mut values = values.into_iter();
        let mut next = || values.next().unwrap_or_default();
        Ok(DeploymentOutputs {
            vnet_name: next(),
            vnet_address_space: next(),
            frontend_subnet: SubnetOutput {
                name: next(),
                prefix: next(),
            },
            backend_subnet: SubnetOutput {
                name: next(),
                prefix: next(),
            },
            frontend_nsg_name: next(),
            backend_nsg_name: next(),
        })
    }

    pub fn nsg_names(&self) -> [&str; 2] {
        [&self.frontend_nsg_name, &self.backend_nsg_name]
    }

    pub fn subnets(&self) -> [&SubnetOutput; 2] {
        [&self.frontend_subnet, &self.backend_subnet]
    }
}

fn output_string(entry: &Value) -> Option<String> {
    let value = match entry {
        Value::Object(obj) => obj.get("value")?,
        other => other,
    };
    match value.as_str() {
        Some(s) if !s.trim().is_empty() => Some(s.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn provider_outputs() -> Value {
        json!({
            "vnetName": { "type": "String", "value": "bank-atm-vnet-dev" },
            "vnetAddressSpace": { "type": "String", "value": "10.0.0.0/16" },
            "frontendSubnetName": { "type": "String", "value": "frontend-subnet" },
            "frontendSubnetPrefix": { "type": "String", "value": "10.0.1.0/24" },
            "backendSubnetName": { "type": "String", "value": "backend-subnet" },
            "backendSubnetPrefix": { "type": "String", "value": "10.0.2.0/24" },
            "frontendNsgName": { "type": "String", "value": "frontend-nsg-dev" },
            "backendNsgName": { "type": "String", "value": "backend-nsg-dev" }
        })
    }

    #[test]
    fn test_outputs_from_deployment_response() {
        let response = json!({
            "name": "network-dev-20261017120000",
            "properties": {
                "provisioningState": "Succeeded",
                "outputs": provider_outputs()
            }
        });
        let outputs = DeploymentOutputs::from_deployment_response(&response).unwrap();
        assert_eq!(outputs.vnet_name, "bank-atm-vnet-dev");
        assert_eq!(outputs.vnet_address_space, "10.0.0.0/16");
        assert_eq!(
            outputs.frontend_subnet,
            SubnetOutput {
                name: "frontend-subnet".to_string(),
                prefix: "10.0.1.0/24".to_string()
            }
        );
        assert_eq!(outputs.backend_subnet.prefix, "10.0.2.0/24");
        assert_eq!(outputs.nsg_names(), ["frontend-nsg-dev", "backend-nsg-dev"]);
    }

    #[test]
    fn test_output_names_match_case_insensitively() {
        let mut outputs = provider_outputs();
        let obj = outputs.as_object_mut().unwrap();
        let vnet = obj.remove("vnetName").unwrap();
        obj.insert("VNetName".to_string(), vnet);

        let parsed = DeploymentOutputs::from_provider_outputs(&outputs).unwrap();
        assert_eq!(parsed.vnet_name, "bank-atm-vnet-dev");
    }

    #[test]
    fn test_missing_outputs_are_listed() {
        let mut outputs = provider_outputs();
        let obj = outputs.as_object_mut().unwrap();
        obj.remove("backendNsgName");
        obj.insert("frontendSubnetPrefix".to_string(), json!({ "type": "String", "value": "" }));

        let err = DeploymentOutputs::from_provider_outputs(&outputs).unwrap_err();
        assert_eq!(
            err,
            DeploymentError::MalformedResponse(
                "missing required outputs: frontendSubnetPrefix, backendNsgName".to_string()
            )
        );
    }

    #[test]
    fn test_response_without_outputs_is_malformed() {
        let err = DeploymentOutputs::from_deployment_response(&json!({
            "properties": { "provisioningState": "Succeeded", "outputs": null }
        }))
        .unwrap_err();
        assert_eq!(err.category(), "MalformedResponseError");
    }

    #[test]
    fn test_serialized_outputs_have_six_keys() {
        let outputs = DeploymentOutputs::from_provider_outputs(&provider_outputs()).unwrap();
        let value = serde_json::to_value(&outputs).unwrap();
        let mut keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "backendNsgName",
                "backendSubnet",
                "frontendNsgName",
                "frontendSubnet",
                "vnetAddressSpace",
                "vnetName"
            ]
        );
        assert_eq!(
            value["frontendSubnet"],
            json!({ "name": "frontend-subnet", "prefix": "10.0.1.0/24" })
        );
    }
}
