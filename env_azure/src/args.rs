use std::path::Path;

use deploy_defs::{ResourceKind, TemplateDeployment};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentGroupCommand {
    Validate,
    Create,
}

impl DeploymentGroupCommand {
    fn as_str(&self) -> &'static str {
        match self {
            DeploymentGroupCommand::Validate => "validate",
            DeploymentGroupCommand::Create => "create",
        }
    }
}

pub fn deployment_group_args(
    command: DeploymentGroupCommand,
    deployment: &TemplateDeployment,
    parameters_file: &Path,
) -> Vec<String> {
    vec![
        "deployment".to_string(),
        "group".to_string(),
        command.as_str().to_string(),
        "--resource-group".to_string(),
        deployment.resource_group.clone(),
        "--name".to_string(),
        deployment.deployment_name.clone(),
        "--template-file".to_string(),
        deployment.template_path.display().to_string(),
        "--parameters".to_string(),
        format!("@{}", parameters_file.display()),
        "--output".to_string(),
        "json".to_string(),
    ]
}

pub fn group_exists_args(name: &str) -> Vec<String> {
    ["group", "exists", "--name", name, "--output", "json"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

pub fn describe_args(resource_group: &str, kind: ResourceKind, name: &str) -> Vec<String> {
    let mut args: Vec<String> = match kind {
        ResourceKind::VirtualNetwork => vec!["network", "vnet", "show", "--name"],
        ResourceKind::SubnetList => vec!["network", "vnet", "subnet", "list", "--vnet-name"],
        ResourceKind::NetworkSecurityGroup => vec!["network", "nsg", "show", "--name"],
    }
    .into_iter()
    .map(String::from)
    .collect();
    args.push(name.to_string());
    args.extend(
        ["--resource-group", resource_group, "--output", "json"]
            .iter()
            .map(|s| s.to_string()),
    );
    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::Map;
    use std::path::PathBuf;

    #[test]
    fn test_deployment_group_validate_args() {
        let deployment = TemplateDeployment {
            deployment_name: "network-dev-20261017090503".to_string(),
            resource_group: "bank-atm-rg".to_string(),
            template_path: PathBuf::from("templates/network.json"),
            parameters: Map::new(),
        };
        let args = deployment_group_args(
            DeploymentGroupCommand::Validate,
            &deployment,
            Path::new("/tmp/network-parameters.json"),
        );
        assert_eq!(
            args.join(" "),
            "deployment group validate --resource-group bank-atm-rg --name network-dev-20261017090503 \
             --template-file templates/network.json --parameters @/tmp/network-parameters.json --output json"
        );
    }

    #[test]
    fn test_group_exists_args_pin_json_output() {
        assert_eq!(
            group_exists_args("bank-atm-rg").join(" "),
            "group exists --name bank-atm-rg --output json"
        );
    }

    #[test]
    fn test_describe_args() {
        assert_eq!(
            describe_args("bank-atm-rg", ResourceKind::SubnetList, "bank-atm-vnet").join(" "),
            "network vnet subnet list --vnet-name bank-atm-vnet --resource-group bank-atm-rg --output json"
        );
        assert_eq!(
            describe_args("bank-atm-rg", ResourceKind::NetworkSecurityGroup, "frontend-nsg")
                .join(" "),
            "network nsg show --name frontend-nsg --resource-group bank-atm-rg --output json"
        );
    }
}
