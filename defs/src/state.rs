use serde::{Deserialize, Serialize};

/// Steps of a deployment run, in order.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentState {
    Init,
    Authenticating,
    CheckingPrecondition,
    Resolving,
    Dispatching,
    Validated,
    Deployed,
    Verifying,
    Done,
    Aborted,
}

impl DeploymentState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, DeploymentState::Done | DeploymentState::Aborted)
    }

    pub fn can_transition_to(&self, next: DeploymentState) -> bool {
        use DeploymentState::*;
        if next == Aborted {
            return !self.is_terminal();
        }
        matches!(
            (self, next),
            (Init, Authenticating)
                | (Authenticating, CheckingPrecondition)
                | (CheckingPrecondition, Resolving)
                | (Resolving, Dispatching)
                | (Dispatching, Validated)
                | (Dispatching, Deployed)
                | (Validated, Done)
                | (Deployed, Verifying)
                | (Deployed, Done)
                | (Verifying, Done)
        )
    }
}

impl std::fmt::Display for DeploymentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DeploymentState::Init => "init",
            DeploymentState::Authenticating => "authenticating",
            DeploymentState::CheckingPrecondition => "checking_precondition",
            DeploymentState::Resolving => "resolving",
            DeploymentState::Dispatching => "dispatching",
            DeploymentState::Validated => "validated",
            DeploymentState::Deployed => "deployed",
            DeploymentState::Verifying => "verifying",
            DeploymentState::Done => "done",
            DeploymentState::Aborted => "aborted",
        };
        write!(f, "{}", name)
    }
}
