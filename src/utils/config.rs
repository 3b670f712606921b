use crate::models::Settings;

const ENV_PAT: &str = "AZURE_DEVOPS_PAT";
const ENV_BASE_URL: &str = "AZURE_DEVOPS_BASE_URL";

pub fn pat_from_env() -> Option<String> {
    std::env::var(ENV_PAT).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Per-organization token, e.g. AZURE_DEVOPS_PAT_MYORG for "myorg".
/// Non-alphanumeric characters in the organization name map to '_'.
pub fn org_pat_from_env(organization: &str) -> Option<String> {
    let suffix: String = organization
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
        .collect();
    std::env::var(format!("{}_{}", ENV_PAT, suffix))
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn resolve_pat(explicit_token: &str) -> String {
    let trimmed = explicit_token.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    pat_from_env().unwrap_or_default()
}

pub fn apply_env_defaults(settings: &mut Settings) {
    if settings.devops.pat.trim().is_empty() {
        settings.devops.pat = pat_from_env().unwrap_or_default();
    }
    if let Ok(url) = std::env::var(ENV_BASE_URL) {
        let trimmed = url.trim().trim_end_matches('/');
        if !trimmed.is_empty() {
            settings.devops.base_url = trimmed.to_string();
        }
    }
}
