use deploy_defs::{DeploymentError, ProviderSession};
use serde_json::Value;

/// Reads the session from `az account show` output.
pub fn session_from_account(account: &Value) -> Result<ProviderSession, DeploymentError> {
    let field = |pointer: &str| {
        account
            .pointer(pointer)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    };

    let subscription_id = field("/id");
    if subscription_id.is_empty() {
        return Err(DeploymentError::Auth(
            "the CLI reported no active subscription".to_string(),
        ));
    }

    Ok(ProviderSession {
        user: field("/user/name"),
        subscription_id,
        subscription_name: field("/name"),
        tenant_id: field("/tenantId"),
    })
}
