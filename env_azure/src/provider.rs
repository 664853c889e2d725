use std::io::Write;

use async_trait::async_trait;
use deploy_defs::{
    DeploymentError, ProviderClient, ProviderSession, ResourceKind, TemplateDeployment,
};
use deploy_utils::to_parameters_document;
use serde_json::Value;
use tempfile::NamedTempFile;

use crate::{
    deployment_group_args, describe_args, group_exists_args, run_az_command,
    session_from_account, DeploymentGroupCommand,
};

const MAX_ERROR_LINES: usize = 50;

/// `ProviderClient` backed by the Azure CLI.
///
/// Timeouts and retries are left to the CLI itself.
#[derive(Clone, Debug)]
pub struct AzureCliClient {
    pub az_path: String,
    pub subscription: Option<String>,
}

impl AzureCliClient {
    pub fn new(az_path: &str, subscription: Option<String>) -> Self {
        AzureCliClient {
            az_path: az_path.to_string(),
            subscription,
        }
    }

    fn command(&self, args: &[String]) -> tokio::process::Command {
        let mut exec = tokio::process::Command::new(&self.az_path);
        exec.args(args).arg("--only-show-errors");
        if let Some(subscription) = &self.subscription {
            exec.arg("--subscription").arg(subscription);
        }
        log::debug!("Running az command:\n{:?}", exec.as_std());
        exec
    }

    async fn run(&self, args: &[String]) -> Result<String, anyhow::Error> {
        let mut exec = self.command(args);
        let result = run_az_command(&mut exec, MAX_ERROR_LINES).await?;
        Ok(result.stdout)
    }

    async fn run_json(&self, args: &[String]) -> Result<Value, anyhow::Error> {
        let stdout = self.run(args).await?;
        if stdout.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&stdout)?)
    }

    async fn deployment_group(
        &self,
        command: DeploymentGroupCommand,
        deployment: &TemplateDeployment,
    ) -> Result<Value, DeploymentError> {
        // Merged parameters are handed over as one document so the CLI never
        // has to combine several --parameters sources
        let parameters_file = write_parameters_file(deployment).map_err(|e| {
            DeploymentError::Precondition(format!("Failed to write merged parameters: {}", e))
        })?;
        let args = deployment_group_args(command, deployment, parameters_file.path());

        let stdout = self
            .run(&args)
            .await
            .map_err(|e| DeploymentError::Deployment(e.to_string()))?;

        serde_json::from_str(&stdout).map_err(|e| {
            DeploymentError::MalformedResponse(format!(
                "deployment {} did not return JSON: {}",
                deployment.deployment_name, e
            ))
        })
    }
}

fn to_args(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn write_parameters_file(deployment: &TemplateDeployment) -> Result<NamedTempFile, anyhow::Error> {
    let mut file = tempfile::Builder::new()
        .prefix("network-parameters-")
        .suffix(".json")
        .tempfile()?;
    serde_json::to_writer_pretty(
        file.as_file_mut(),
        &to_parameters_document(&deployment.parameters),
    )?;
    file.flush()?;
    Ok(file)
}

#[async_trait]
impl ProviderClient for AzureCliClient {
    async fn get_identity(&self) -> Result<ProviderSession, DeploymentError> {
        let account = self
            .run_json(&to_args(&["account", "show", "--output", "json"]))
            .await
            .map_err(|e| DeploymentError::Auth(e.to_string()))?;
        session_from_account(&account)
    }

    async fn resource_group_exists(&self, name: &str) -> Result<bool, DeploymentError> {
        let stdout = self.run(&group_exists_args(name)).await.map_err(|e| {
            DeploymentError::Precondition(format!(
                "Failed to check whether resource group {} exists: {}",
                name, e
            ))
        })?;
        serde_json::from_str::<bool>(stdout.trim()).map_err(|_| {
            DeploymentError::Precondition(format!(
                "Unexpected answer when checking resource group {}: {}",
                name,
                stdout.trim()
            ))
        })
    }

    async fn validate_template(
        &self,
        deployment: &TemplateDeployment,
    ) -> Result<Value, DeploymentError> {
        self.deployment_group(DeploymentGroupCommand::Validate, deployment)
            .await
    }

    async fn apply_template(
        &self,
        deployment: &TemplateDeployment,
    ) -> Result<Value, DeploymentError> {
        self.deployment_group(DeploymentGroupCommand::Create, deployment)
            .await
    }

    async fn describe_resource(
        &self,
        resource_group: &str,
        kind: ResourceKind,
        name: &str,
    ) -> Result<Value, anyhow::Error> {
        self.run_json(&describe_args(resource_group, kind, name))
            .await
    }
}
