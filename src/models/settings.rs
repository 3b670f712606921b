use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub version: String,
    pub devops: DevOpsSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: "1.0.0".to_string(),
            devops: DevOpsSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevOpsSettings {
    pub base_url: String,
    /// Global fallback token; per-organization tokens take precedence.
    pub pat: String,
    pub request_timeout_secs: u64,
    pub single_item_timeout_secs: u64,
}

impl Default for DevOpsSettings {
    fn default() -> Self {
        let env_pat = std::env::var("AZURE_DEVOPS_PAT").unwrap_or_default();
        Self {
            base_url: "https://dev.azure.com".to_string(),
            pat: env_pat,
            request_timeout_secs: 30,
            single_item_timeout_secs: 10,
        }
    }
}
