#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::anyhow;
use async_trait::async_trait;
use deploy_defs::{
    DeploymentError, ProviderClient, ProviderSession, ResourceKind, TemplateDeployment,
};
use deployment_runner::RunSettings;
use serde_json::{json, Value};
use tempfile::TempDir;

/// In-memory provider that records every call it receives.
pub struct FakeProvider {
    pub authenticated: bool,
    pub resource_group_exists: bool,
    pub validate_response: Result<Value, String>,
    pub apply_response: Result<Value, String>,
    pub resources: HashMap<String, Value>,
    pub calls: Mutex<Vec<String>>,
    pub last_deployment: Mutex<Option<TemplateDeployment>>,
}

impl FakeProvider {
    /// Logged in, resource group present, every call succeeds.
    pub fn healthy() -> Self {
        FakeProvider {
            authenticated: true,
            resource_group_exists: true,
            validate_response: Ok(validation_response()),
            apply_response: Ok(deployment_response(network_outputs())),
            resources: deployed_resources(),
            calls: Mutex::new(vec![]),
            last_deployment: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ProviderClient for FakeProvider {
    async fn get_identity(&self) -> Result<ProviderSession, DeploymentError> {
        self.record("get_identity".to_string());
        if !self.authenticated {
            return Err(DeploymentError::Auth(
                "Please run 'az login' to setup account.".to_string(),
            ));
        }
        Ok(ProviderSession {
            user: "operator@example.com".to_string(),
            subscription_id: "00000000-0000-0000-0000-000000000001".to_string(),
            subscription_name: "Bank Demo Subscription".to_string(),
            tenant_id: "00000000-0000-0000-0000-0000000000aa".to_string(),
        })
    }

    async fn resource_group_exists(&self, name: &str) -> Result<bool, DeploymentError> {
        self.record(format!("resource_group_exists:{}", name));
        Ok(self.resource_group_exists)
    }

    async fn validate_template(
        &self,
        deployment: &TemplateDeployment,
    ) -> Result<Value, DeploymentError> {
        self.record(format!("validate:{}", deployment.resource_group));
        *self.last_deployment.lock().unwrap() = Some(deployment.clone());
        self.validate_response
            .clone()
            .map_err(DeploymentError::Deployment)
    }

    async fn apply_template(
        &self,
        deployment: &TemplateDeployment,
    ) -> Result<Value, DeploymentError> {
        self.record(format!("apply:{}", deployment.resource_group));
        *self.last_deployment.lock().unwrap() = Some(deployment.clone());
        self.apply_response.clone().map_err(DeploymentError::Deployment)
    }

    async fn describe_resource(
        &self,
        _resource_group: &str,
        kind: ResourceKind,
        name: &str,
    ) -> Result<Value, anyhow::Error> {
        let key = format!("{:?}/{}", kind, name);
        self.record(format!("describe:{}", key));
        self.resources
            .get(&key)
            .cloned()
            .ok_or_else(|| anyhow!("ERROR: (ResourceNotFound) The Resource '{}' was not found.", name))
    }
}

pub fn network_outputs() -> Value {
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

pub fn deployment_response(outputs: Value) -> Value {
    json!({
        "id": "/subscriptions/0000/resourceGroups/bank-atm-rg/providers/Microsoft.Resources/deployments/network-dev",
        "name": "network-dev",
        "properties": {
            "provisioningState": "Succeeded",
            "outputs": outputs
        }
    })
}

pub fn validation_response() -> Value {
    json!({
        "error": null,
        "properties": {
            "provisioningState": "Succeeded",
            "validatedResources": [
                { "id": "/subscriptions/0000/resourceGroups/bank-atm-rg/providers/Microsoft.Network/virtualNetworks/bank-atm-vnet-dev" }
            ]
        }
    })
}

pub fn deployed_resources() -> HashMap<String, Value> {
    let nsg_id = |name: &str| {
        format!(
            "/subscriptions/0000/resourceGroups/bank-atm-rg/providers/Microsoft.Network/networkSecurityGroups/{}",
            name
        )
    };
    HashMap::from([
        (
            "VirtualNetwork/bank-atm-vnet-dev".to_string(),
            json!({ "addressSpace": { "addressPrefixes": ["10.0.0.0/16"] } }),
        ),
        (
            "SubnetList/bank-atm-vnet-dev".to_string(),
            json!([
                { "name": "frontend-subnet", "addressPrefix": "10.0.1.0/24", "networkSecurityGroup": { "id": nsg_id("frontend-nsg-dev") } },
                { "name": "backend-subnet", "addressPrefix": "10.0.2.0/24", "networkSecurityGroup": { "id": nsg_id("backend-nsg-dev") } }
            ]),
        ),
        (
            "NetworkSecurityGroup/frontend-nsg-dev".to_string(),
            json!({ "provisioningState": "Succeeded" }),
        ),
        (
            "NetworkSecurityGroup/backend-nsg-dev".to_string(),
            json!({ "provisioningState": "Succeeded" }),
        ),
    ])
}

/// Temporary templates and output directories for one test.
pub struct TestWorkspace {
    _dir: TempDir,
    pub settings: RunSettings,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let templates_dir = dir.path().join("templates");
        let output_dir = dir.path().join("out");
        std::fs::create_dir_all(&templates_dir).unwrap();
        std::fs::create_dir_all(&output_dir).unwrap();

        std::fs::write(
            templates_dir.join("network.json"),
            r#"{ "$schema": "https://schema.management.azure.com/schemas/2019-04-01/deploymentTemplate.json#", "contentVersion": "1.0.0.0", "resources": [] }"#,
        )
        .unwrap();
        std::fs::write(
            templates_dir.join("network.parameters.json"),
            r#"{
                "contentVersion": "1.0.0.0",
                "parameters": {
                    "environmentName": { "value": "from-file" },
                    "location": { "value": "West Europe" },
                    "vnetAddressPrefix": { "value": "10.0.0.0/16" }
                }
            }"#,
        )
        .unwrap();

        TestWorkspace {
            settings: RunSettings {
                templates_dir,
                output_dir,
                skip_verification: false,
            },
            _dir: dir,
        }
    }

    pub fn templates_dir(&self) -> &Path {
        &self.settings.templates_dir
    }

    pub fn output_files(&self) -> Vec<PathBuf> {
        std::fs::read_dir(&self.settings.output_dir)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect()
    }
}
