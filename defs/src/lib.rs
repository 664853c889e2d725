mod deployment;
mod errors;
mod outcome;
mod output;
mod provider;
mod state;
mod validation;
mod verification;

pub use deployment::{DeploymentRequest, TemplateReference, DEFAULT_ENVIRONMENT};
pub use errors::{DeploymentError, VerificationWarning};
pub use outcome::{DeployedNetwork, DeploymentOutcome};
pub use output::{DeploymentOutputs, SubnetOutput, REQUIRED_OUTPUT_KEYS};
pub use provider::{ProviderClient, ProviderSession, ResourceKind, TemplateDeployment};
pub use state::DeploymentState;
pub use validation::ValidationReport;
pub use verification::{VerificationReport, VerificationResult};
