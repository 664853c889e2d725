use std::path::PathBuf;

use deploy_defs::{
    DeployedNetwork, DeploymentError, DeploymentOutcome, DeploymentOutputs, DeploymentRequest,
    DeploymentState, ProviderClient, ProviderSession, TemplateDeployment, ValidationReport,
};
use deploy_utils::{
    deployment_name, inline_overrides, load_parameters_file, merge_parameters,
    resolve_templates, write_deployment_outputs,
};
use serde_json::Value;

use crate::verify_deployment;

#[derive(Debug, Clone)]
pub struct RunSettings {
    pub templates_dir: PathBuf,
    pub output_dir: PathBuf,
    pub skip_verification: bool,
}

impl Default for RunSettings {
    fn default() -> Self {
        RunSettings {
            templates_dir: PathBuf::from("templates"),
            output_dir: PathBuf::from("."),
            skip_verification: false,
        }
    }
}

/// Runs one network deployment from preconditions to verification.
///
/// Steps run strictly in order. The first fatal error moves the run to
/// `Aborted` and is returned as is; nothing is retried or rolled back.
pub struct Orchestrator<'a> {
    client: &'a dyn ProviderClient,
    settings: &'a RunSettings,
    state: DeploymentState,
    session: Option<ProviderSession>,
}

impl<'a> Orchestrator<'a> {
    pub fn new(client: &'a dyn ProviderClient, settings: &'a RunSettings) -> Self {
        Orchestrator {
            client,
            settings,
            state: DeploymentState::Init,
            session: None,
        }
    }

    pub fn state(&self) -> DeploymentState {
        self.state
    }

    pub fn session(&self) -> Option<&ProviderSession> {
        self.session.as_ref()
    }

    pub async fn run(
        &mut self,
        request: &DeploymentRequest,
    ) -> Result<DeploymentOutcome, DeploymentError> {
        match self.execute(request).await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                log::error!("[{}] Aborted while {}: {}", e.category(), self.state, e);
                self.advance(DeploymentState::Aborted);
                Err(e)
            }
        }
    }

    async fn execute(
        &mut self,
        request: &DeploymentRequest,
    ) -> Result<DeploymentOutcome, DeploymentError> {
        self.advance(DeploymentState::Authenticating);
        let session = self.client.get_identity().await?;
        log::info!(
            "Authenticated as {} in subscription {} ({})",
            session.user,
            session.subscription_name,
            session.subscription_id
        );
        self.session = Some(session);

        self.advance(DeploymentState::CheckingPrecondition);
        let resource_group = request.resource_group_name();
        if !self.client.resource_group_exists(resource_group).await? {
            return Err(DeploymentError::Precondition(format!(
                "Resource group {} does not exist, create it first with: az group create --name {} --location \"{}\"",
                resource_group,
                resource_group,
                request.location()
            )));
        }

        self.advance(DeploymentState::Resolving);
        let reference = resolve_templates(&self.settings.templates_dir, request.environment())?;
        let file_parameters = load_parameters_file(&reference.parameters_path)?;
        let deployment = TemplateDeployment {
            deployment_name: deployment_name(request.environment()),
            resource_group: resource_group.to_string(),
            template_path: reference.template_path,
            parameters: merge_parameters(&file_parameters, &inline_overrides(request)),
        };

        self.advance(DeploymentState::Dispatching);
        if request.validate_only() {
            log::info!(
                "Validating {} against resource group {}",
                deployment.deployment_name,
                resource_group
            );
            let response = self.client.validate_template(&deployment).await?;
            let report = ValidationReport::from_response(&deployment.deployment_name, &response)?;
            self.advance(DeploymentState::Validated);
            self.advance(DeploymentState::Done);
            return Ok(DeploymentOutcome::Validated(report));
        }

        log::info!(
            "Deploying {} to resource group {}",
            deployment.deployment_name,
            resource_group
        );
        let response = self.client.apply_template(&deployment).await?;
        check_provisioning_state(&deployment.deployment_name, &response)?;
        self.advance(DeploymentState::Deployed);

        let outputs = DeploymentOutputs::from_deployment_response(&response)?;
        let output_file =
            write_deployment_outputs(&self.settings.output_dir, request.environment(), &outputs)
                .map_err(|e| {
                    DeploymentError::Precondition(format!("Failed to persist outputs: {:#}", e))
                })?;

        let verification = if self.settings.skip_verification {
            log::info!("Skipping post-deployment verification");
            None
        } else {
            self.advance(DeploymentState::Verifying);
            Some(verify_deployment(self.client, resource_group, &outputs).await)
        };
        self.advance(DeploymentState::Done);

        Ok(DeploymentOutcome::Deployed(DeployedNetwork {
            outputs,
            output_file,
            verification,
        }))
    }

    fn advance(&mut self, next: DeploymentState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid transition {} -> {}",
            self.state,
            next
        );
        log::info!("{} -> {}", self.state, next);
        self.state = next;
    }
}

pub async fn run_deployment(
    client: &dyn ProviderClient,
    request: &DeploymentRequest,
    settings: &RunSettings,
) -> Result<DeploymentOutcome, DeploymentError> {
    Orchestrator::new(client, settings).run(request).await
}

fn check_provisioning_state(deployment_name: &str, response: &Value) -> Result<(), DeploymentError> {
    match response
        .pointer("/properties/provisioningState")
        .and_then(|v| v.as_str())
    {
        None | Some("Succeeded") => Ok(()),
        Some(state) => {
            let detail = response
                .pointer("/properties/error/message")
                .and_then(|v| v.as_str())
                .map(|m| format!(": {}", m))
                .unwrap_or_default();
            Err(DeploymentError::Deployment(format!(
                "Deployment {} finished in state {}{}",
                deployment_name, state, detail
            )))
        }
    }
}
