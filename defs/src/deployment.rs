use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::DeploymentError;

pub const DEFAULT_ENVIRONMENT: &str = "dev";

/// Invocation parameters for a single network deployment run.
///
/// Built once at startup through [`DeploymentRequest::new`], which enforces
/// that the resource group and location are present and defaults the
/// environment. Fields are private so a constructed request cannot change.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DeploymentRequest {
    resource_group_name: String,
    location: String,
    environment: String,
    validate_only: bool,
}

impl DeploymentRequest {
    pub fn new(
        resource_group_name: &str,
        location: &str,
        environment: Option<&str>,
        validate_only: bool,
    ) -> Result<Self, DeploymentError> {
        let resource_group_name = resource_group_name.trim();
        let location = location.trim();
        if resource_group_name.is_empty() {
            return Err(DeploymentError::Precondition(
                "Resource group name must not be empty".to_string(),
            ));
        }
        if location.is_empty() {
            return Err(DeploymentError::Precondition(
                "Location must not be empty".to_string(),
            ));
        }
        let environment = match environment.map(str::trim) {
            Some(env) if !env.is_empty() => env.to_string(),
            _ => DEFAULT_ENVIRONMENT.to_string(),
        };
        Ok(DeploymentRequest {
            resource_group_name: resource_group_name.to_string(),
            location: location.to_string(),
            environment,
            validate_only,
        })
    }

    pub fn resource_group_name(&self) -> &str {
        &self.resource_group_name
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn validate_only(&self) -> bool {
        self.validate_only
    }
}

/// Template and parameters files, both checked to exist when resolved.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TemplateReference {
    pub template_path: PathBuf,
    pub parameters_path: PathBuf,
}
