use serde::{Deserialize, Serialize};

use crate::{ResourceKind, VerificationWarning};

/// Outcome of describing one deployed resource.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct VerificationResult {
    pub kind: ResourceKind,
    pub name: String,
    pub exists: bool,
    pub shape_matches: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct VerificationReport {
    pub results: Vec<VerificationResult>,
    pub warnings: Vec<VerificationWarning>,
}

impl VerificationReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn record(&mut self, result: VerificationResult) {
        self.results.push(result);
    }

    pub fn warn(&mut self, kind: ResourceKind, resource: &str, message: String) {
        log::warn!("Verification of {} \"{}\": {}", kind, resource, message);
        self.warnings.push(VerificationWarning {
            kind,
            resource: resource.to_string(),
            message,
        });
    }
}
