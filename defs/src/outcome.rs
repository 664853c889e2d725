use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{DeploymentOutputs, ValidationReport, VerificationReport};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DeployedNetwork {
    pub outputs: DeploymentOutputs,
    pub output_file: PathBuf,
    /// `None` when verification was skipped
    pub verification: Option<VerificationReport>,
}

/// Terminal success state of a run.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum DeploymentOutcome {
    Validated(ValidationReport),
    Deployed(DeployedNetwork),
}
