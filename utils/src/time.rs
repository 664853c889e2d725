use chrono::{DateTime, Utc};

// Resource manager limit on deployment names
const MAX_DEPLOYMENT_NAME_LEN: usize = 64;

/// Name for a new deployment, unique per second so the provider keeps every
/// run in its deployment history.
pub fn deployment_name(environment: &str) -> String {
    deployment_name_at(environment, Utc::now())
}

pub fn deployment_name_at(environment: &str, at: DateTime<Utc>) -> String {
    let environment: String = environment
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '-'
            }
        })
        .collect();
    let suffix = at.format("%Y%m%d%H%M%S").to_string();
    let max_env_len = MAX_DEPLOYMENT_NAME_LEN - "network--".len() - suffix.len();
    let environment: String = environment.chars().take(max_env_len).collect();
    format!("network-{}-{}", environment, suffix)
}
