use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::DeploymentError;

/// Identity of the operator's current provider login.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProviderSession {
    pub user: String,
    pub subscription_id: String,
    pub subscription_name: String,
    pub tenant_id: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    VirtualNetwork,
    /// Subnets of the virtual network with the given name
    SubnetList,
    NetworkSecurityGroup,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResourceKind::VirtualNetwork => "virtual network",
            ResourceKind::SubnetList => "subnet list",
            ResourceKind::NetworkSecurityGroup => "network security group",
        };
        write!(f, "{}", name)
    }
}

/// Everything the provider needs to validate or apply a template.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TemplateDeployment {
    pub deployment_name: String,
    pub resource_group: String,
    pub template_path: PathBuf,
    /// Merged parameter values, keyed by parameter name
    pub parameters: Map<String, Value>,
}

#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Returns the current session, or `DeploymentError::Auth` when nobody is logged in.
    async fn get_identity(&self) -> Result<ProviderSession, DeploymentError>;
    async fn resource_group_exists(&self, name: &str) -> Result<bool, DeploymentError>;
    /// Dry-run. Returns the raw validation response.
    async fn validate_template(
        &self,
        deployment: &TemplateDeployment,
    ) -> Result<Value, DeploymentError>;
    /// Returns the raw deployment response, which carries `properties.outputs`.
    async fn apply_template(&self, deployment: &TemplateDeployment)
        -> Result<Value, DeploymentError>;
    async fn describe_resource(
        &self,
        resource_group: &str,
        kind: ResourceKind,
        name: &str,
    ) -> Result<Value, anyhow::Error>;
}
