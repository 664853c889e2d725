use deploy_defs::{
    DeploymentOutputs, ProviderClient, ResourceKind, SubnetOutput, VerificationReport,
    VerificationResult,
};
use serde_json::Value;

/// Describes every deployed resource and compares it with the outputs.
///
/// Failures become warnings on the report; this never aborts a run.
pub async fn verify_deployment(
    client: &dyn ProviderClient,
    resource_group: &str,
    outputs: &DeploymentOutputs,
) -> VerificationReport {
    let mut report = VerificationReport::default();

    verify_vnet(client, resource_group, outputs, &mut report).await;
    verify_subnets(client, resource_group, outputs, &mut report).await;
    for nsg_name in outputs.nsg_names() {
        verify_nsg(client, resource_group, nsg_name, &mut report).await;
    }

    log::info!(
        "Verified {} resources with {} warnings",
        report.results.len(),
        report.warnings.len()
    );
    report
}

async fn describe(
    client: &dyn ProviderClient,
    resource_group: &str,
    kind: ResourceKind,
    name: &str,
    report: &mut VerificationReport,
) -> Option<Value> {
    match client.describe_resource(resource_group, kind, name).await {
        Ok(Value::Null) => {
            report.warn(kind, name, "resource was not found".to_string());
            None
        }
        Ok(value) => Some(value),
        Err(e) => {
            report.warn(kind, name, format!("describe failed: {}", e));
            None
        }
    }
}

async fn verify_vnet(
    client: &dyn ProviderClient,
    resource_group: &str,
    outputs: &DeploymentOutputs,
    report: &mut VerificationReport,
) {
    let kind = ResourceKind::VirtualNetwork;
    let name = outputs.vnet_name.as_str();
    let Some(vnet) = describe(client, resource_group, kind, name, report).await else {
        report.record(missing(kind, name));
        return;
    };

    let prefixes = string_list(vnet.pointer("/addressSpace/addressPrefixes"));
    let shape_matches = prefixes.iter().any(|p| p == &outputs.vnet_address_space);
    if !shape_matches {
        report.warn(
            kind,
            name,
            format!(
                "address space {} not in {:?}",
                outputs.vnet_address_space, prefixes
            ),
        );
    }
    report.record(VerificationResult {
        kind,
        name: name.to_string(),
        exists: true,
        shape_matches,
    });
}

async fn verify_subnets(
    client: &dyn ProviderClient,
    resource_group: &str,
    outputs: &DeploymentOutputs,
    report: &mut VerificationReport,
) {
    let kind = ResourceKind::SubnetList;
    let expected: [(&SubnetOutput, &str); 2] = [
        (&outputs.frontend_subnet, outputs.frontend_nsg_name.as_str()),
        (&outputs.backend_subnet, outputs.backend_nsg_name.as_str()),
    ];

    let listed = describe(client, resource_group, kind, &outputs.vnet_name, report).await;
    let subnets = match listed.as_ref().map(|v| v.as_array()) {
        Some(Some(subnets)) => subnets.clone(),
        Some(None) => {
            report.warn(kind, &outputs.vnet_name, "subnet list is not an array".to_string());
            vec![]
        }
        None => vec![],
    };

    for (subnet, nsg_name) in expected {
        let label = format!("{}/{}", outputs.vnet_name, subnet.name);
        let Some(found) = subnets
            .iter()
            .find(|s| s.get("name").and_then(|n| n.as_str()) == Some(subnet.name.as_str()))
        else {
            if listed.is_some() {
                report.warn(kind, &label, "subnet is missing from the network".to_string());
            }
            report.record(missing(kind, &label));
            continue;
        };

        let mut shape_matches = true;

        let mut prefixes = string_list(found.get("addressPrefixes"));
        prefixes.extend(string_list(found.get("addressPrefix")));
        if !prefixes.contains(&subnet.prefix) {
            shape_matches = false;
            report.warn(
                kind,
                &label,
                format!("prefix {} not in {:?}", subnet.prefix, prefixes),
            );
        }

        let attached_nsg = found
            .pointer("/networkSecurityGroup/id")
            .and_then(|id| id.as_str())
            .and_then(|id| id.rsplit('/').next())
            .unwrap_or_default();
        if !attached_nsg.eq_ignore_ascii_case(nsg_name) {
            shape_matches = false;
            report.warn(
                kind,
                &label,
                format!("expected network security group {} to be attached", nsg_name),
            );
        }

        report.record(VerificationResult {
            kind,
            name: label,
            exists: true,
            shape_matches,
        });
    }
}

async fn verify_nsg(
    client: &dyn ProviderClient,
    resource_group: &str,
    name: &str,
    report: &mut VerificationReport,
) {
    let kind = ResourceKind::NetworkSecurityGroup;
    let Some(nsg) = describe(client, resource_group, kind, name, report).await else {
        report.record(missing(kind, name));
        return;
    };

    let state = nsg
        .get("provisioningState")
        .and_then(|s| s.as_str())
        .unwrap_or("Succeeded");
    let shape_matches = state == "Succeeded";
    if !shape_matches {
        report.warn(kind, name, format!("provisioning state is {}", state));
    }
    report.record(VerificationResult {
        kind,
        name: name.to_string(),
        exists: true,
        shape_matches,
    });
}

fn missing(kind: ResourceKind, name: &str) -> VerificationResult {
    VerificationResult {
        kind,
        name: name.to_string(),
        exists: false,
        shape_matches: false,
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(s)) => vec![s.clone()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|i| i.as_str())
            .map(|s| s.to_string())
            .collect(),
        _ => vec![],
    }
}
