mod account;
mod args;
mod cmd;
mod provider;

pub use account::session_from_account;
pub use args::{
    deployment_group_args, describe_args, group_exists_args, DeploymentGroupCommand,
};
pub use cmd::{run_az_command, CommandResult};
pub use provider::AzureCliClient;
