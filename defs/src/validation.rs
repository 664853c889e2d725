use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::DeploymentError;

/// Diagnostics returned by a dry-run of the template.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ValidationReport {
    pub deployment_name: String,
    pub provisioning_state: Option<String>,
    pub validated_resources: Vec<String>,
    pub diagnostics: Vec<String>,
}

impl ValidationReport {
    /// A response carrying a non-null `error` is a rejected template even if
    /// the provider exited successfully.
    pub fn from_response(deployment_name: &str, response: &Value) -> Result<Self, DeploymentError> {
        if let Some(error) = response.get("error").filter(|e| !e.is_null()) {
            return Err(DeploymentError::Deployment(describe_error(error)));
        }

        let provisioning_state = response
            .pointer("/properties/provisioningState")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());

        let validated_resources = response
            .pointer("/properties/validatedResources")
            .and_then(|v| v.as_array())
            .map(|resources| {
                resources
                    .iter()
                    .filter_map(|r| r.get("id").and_then(|id| id.as_str()))
                    .map(|id| id.to_string())
                    .collect()
            })
            .unwrap_or_default();

        let diagnostics = response
            .pointer("/properties/diagnostics")
            .and_then(|v| v.as_array())
            .map(|items| items.iter().map(format_diagnostic).collect())
            .unwrap_or_default();

        Ok(ValidationReport {
            deployment_name: deployment_name.to_string(),
            provisioning_state,
            validated_resources,
            diagnostics,
        })
    }
}

fn format_diagnostic(diagnostic: &Value) -> String {
    let level = diagnostic
        .get("level")
        .and_then(|v| v.as_str())
        .unwrap_or("Info");
    let code = diagnostic.get("code").and_then(|v| v.as_str()).unwrap_or("");
    let message = diagnostic
        .get("message")
        .and_then(|v| v.as_str())
        .unwrap_or("");
    if code.is_empty() {
        format!("{}: {}", level, message)
    } else {
        format!("{} {}: {}", level, code, message)
    }
}

fn describe_error(error: &Value) -> String {
    let code = error.get("code").and_then(|v| v.as_str());
    let message = error.get("message").and_then(|v| v.as_str());
    match (code, message) {
        (Some(code), Some(message)) => format!("{}: {}", code, message),
        (None, Some(message)) => message.to_string(),
        _ => error.to_string(),
    }
}
