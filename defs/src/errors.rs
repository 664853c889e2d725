use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ResourceKind;

/// Fatal failures. Any of these aborts the run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeploymentError {
    #[error("No authenticated provider session, please run \"az login\": {0}")]
    Auth(String),

    #[error("{0}")]
    Precondition(String),

    #[error("Required file not found: {}", .0.display())]
    NotFound(PathBuf),

    // Provider text is passed through untouched
    #[error("{0}")]
    Deployment(String),

    #[error("Provider response is malformed: {0}")]
    MalformedResponse(String),
}

impl DeploymentError {
    pub fn category(&self) -> &'static str {
        match self {
            DeploymentError::Auth(_) => "AuthError",
            DeploymentError::Precondition(_) => "PreconditionError",
            DeploymentError::NotFound(_) => "NotFoundError",
            DeploymentError::Deployment(_) => "DeploymentError",
            DeploymentError::MalformedResponse(_) => "MalformedResponseError",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            DeploymentError::Auth(_) => 2,
            DeploymentError::Precondition(_) => 3,
            DeploymentError::NotFound(_) => 4,
            DeploymentError::Deployment(_) => 5,
            DeploymentError::MalformedResponse(_) => 6,
        }
    }
}

/// Non-fatal problem found while verifying deployed resources.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct VerificationWarning {
    pub kind: ResourceKind,
    pub resource: String,
    pub message: String,
}

impl VerificationWarning {
    pub fn category(&self) -> &'static str {
        "VerificationWarning"
    }
}

impl std::fmt::Display for VerificationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} \"{}\": {}", self.kind, self.resource, self.message)
    }
}
