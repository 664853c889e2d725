use std::path::PathBuf;

use clap::Parser;
use deploy_defs::{DeploymentError, DeploymentRequest, DEFAULT_ENVIRONMENT};
use deployment_runner::RunSettings;

/// Deploys the ATM banking demo network (virtual network, subnets and
/// security groups) into an existing Azure resource group.
#[derive(Parser, Debug)]
#[command(name = "bankatm-deploy", version, about)]
pub struct Args {
    /// Resource group to deploy into, it must already exist
    #[arg(short = 'g', long, env = "BANKATM_RESOURCE_GROUP")]
    pub resource_group: String,

    /// Azure region, e.g. "East US"
    #[arg(short, long, env = "BANKATM_LOCATION")]
    pub location: String,

    /// Environment name, selects the parameters overlay and output file
    #[arg(short, long, env = "BANKATM_ENV", default_value = DEFAULT_ENVIRONMENT)]
    pub environment: String,

    /// Only validate the template, nothing is deployed or written
    #[arg(long)]
    pub validate_only: bool,

    #[arg(long, env = "BANKATM_TEMPLATES_DIR", default_value = "templates")]
    pub templates_dir: PathBuf,

    /// Directory for network-deployment-outputs-<environment>.json
    #[arg(long, env = "BANKATM_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Subscription to use instead of the CLI default
    #[arg(long, env = "AZURE_SUBSCRIPTION_ID")]
    pub subscription: Option<String>,

    /// Path to the az executable
    #[arg(long, env = "AZ_CLI_PATH", default_value = "az")]
    pub az_path: String,

    /// Do not query the deployed resources afterwards
    #[arg(long)]
    pub skip_verification: bool,

    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn request(&self) -> Result<DeploymentRequest, DeploymentError> {
        DeploymentRequest::new(
            &self.resource_group,
            &self.location,
            Some(&self.environment),
            self.validate_only,
        )
    }

    pub fn settings(&self) -> RunSettings {
        RunSettings {
            templates_dir: self.templates_dir.clone(),
            output_dir: self.output_dir.clone(),
            skip_verification: self.skip_verification,
        }
    }
}
