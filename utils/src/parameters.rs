use std::path::Path;

use deploy_defs::{DeploymentError, DeploymentRequest};
use serde_json::{json, Map, Value};

const PARAMETERS_SCHEMA: &str =
    "https://schema.management.azure.com/schemas/2019-04-01/deploymentParameters.json#";

/// Loads a parameters file into a map of parameter entries.
///
/// Accepts a deployment parameters document (`{"parameters": {"x": {"value": 1}}}`)
/// or a bare `{"x": 1}` map. Entries are kept as `{"value": ..}` objects so
/// key vault `reference` entries pass through unchanged.
pub fn load_parameters_file(path: &Path) -> Result<Map<String, Value>, DeploymentError> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DeploymentError::NotFound(path.to_path_buf()),
        _ => DeploymentError::Precondition(format!(
            "Failed to read parameters file {}: {}",
            path.display(),
            e
        )),
    })?;

    let document: Value = serde_json::from_str(&content).map_err(|e| {
        DeploymentError::Precondition(format!(
            "Parameters file {} is not valid JSON: {}",
            path.display(),
            e
        ))
    })?;

    let not_an_object = || {
        DeploymentError::Precondition(format!(
            "Parameters file {} must contain a JSON object",
            path.display()
        ))
    };

    match document.get("parameters") {
        Some(Value::Object(parameters)) => Ok(parameters
            .iter()
            .map(|(name, entry)| (name.clone(), as_entry(entry)))
            .collect()),
        Some(_) => Err(not_an_object()),
        None => {
            let map = document.as_object().ok_or_else(not_an_object)?;
            Ok(map
                .iter()
                .filter(|(name, _)| !name.starts_with('$') && name.as_str() != "contentVersion")
                .map(|(name, value)| (name.clone(), json!({ "value": value })))
                .collect())
        }
    }
}

fn as_entry(entry: &Value) -> Value {
    match entry {
        Value::Object(obj) if obj.contains_key("value") || obj.contains_key("reference") => {
            entry.clone()
        }
        other => json!({ "value": other }),
    }
}

/// Inline parameters set from the request.
pub fn inline_overrides(request: &DeploymentRequest) -> Vec<(String, Value)> {
    vec![
        (
            "environmentName".to_string(),
            Value::String(request.environment().to_string()),
        ),
        (
            "location".to_string(),
            Value::String(request.location().to_string()),
        ),
    ]
}

/// Applies inline overrides on top of file parameters. Inline values win.
pub fn merge_parameters(
    file_parameters: &Map<String, Value>,
    overrides: &[(String, Value)],
) -> Map<String, Value> {
    let mut merged = file_parameters.clone();
    for (name, value) in overrides {
        if let Some(previous) = merged.insert(name.clone(), json!({ "value": value })) {
            log::debug!(
                "Inline parameter {} overrides file value {}",
                name,
                previous
            );
        }
    }
    merged
}

pub fn to_parameters_document(parameters: &Map<String, Value>) -> Value {
    json!({
        "$schema": PARAMETERS_SCHEMA,
        "contentVersion": "1.0.0.0",
        "parameters": parameters,
    })
}
