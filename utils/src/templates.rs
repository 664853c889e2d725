use std::path::{Path, PathBuf};

use deploy_defs::{DeploymentError, TemplateReference};

pub const TEMPLATE_FILE_NAME: &str = "network.json";
pub const DEFAULT_PARAMETERS_FILE_NAME: &str = "network.parameters.json";

fn environment_parameters_file_name(environment: &str) -> String {
    format!("network.parameters.{}.json", environment)
}

/// Locates the network template and its parameters in `templates_dir`.
///
/// An environment overlay (`network.parameters.<env>.json`) is preferred over
/// the default parameters file when it exists.
pub fn resolve_templates(
    templates_dir: &Path,
    environment: &str,
) -> Result<TemplateReference, DeploymentError> {
    let template_path = templates_dir.join(TEMPLATE_FILE_NAME);
    if !template_path.is_file() {
        return Err(DeploymentError::NotFound(template_path));
    }

    let overlay = templates_dir.join(environment_parameters_file_name(environment));
    let parameters_path: PathBuf = if overlay.is_file() {
        overlay
    } else {
        let default = templates_dir.join(DEFAULT_PARAMETERS_FILE_NAME);
        if !default.is_file() {
            return Err(DeploymentError::NotFound(default));
        }
        default
    };

    log::debug!(
        "Resolved template {} with parameters {}",
        template_path.display(),
        parameters_path.display()
    );

    Ok(TemplateReference {
        template_path,
        parameters_path,
    })
}
