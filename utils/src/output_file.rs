use std::path::{Path, PathBuf};

use anyhow::Context;
use deploy_defs::DeploymentOutputs;

pub fn output_file_name(environment: &str) -> String {
    // Keep the file inside the output directory whatever the environment name
    let environment = environment.replace(['/', '\\'], "-");
    format!("network-deployment-outputs-{}.json", environment)
}

pub fn output_file_path(output_dir: &Path, environment: &str) -> PathBuf {
    output_dir.join(output_file_name(environment))
}

/// Writes the outputs for `environment`, replacing any earlier file.
pub fn write_deployment_outputs(
    output_dir: &Path,
    environment: &str,
    outputs: &DeploymentOutputs,
) -> Result<PathBuf, anyhow::Error> {
    let path = output_file_path(output_dir, environment);
    let content = serde_json::to_string_pretty(outputs)?;
    std::fs::write(&path, content + "\n")
        .with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Deployment outputs stored in {}", path.display());
    Ok(path)
}

pub fn read_deployment_outputs(path: &Path) -> Result<DeploymentOutputs, anyhow::Error> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let outputs = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(outputs)
}
