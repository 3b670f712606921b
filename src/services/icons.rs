use std::collections::HashMap;

use futures_util::future::join_all;
use tokio::sync::Mutex;

use crate::services::devops::DevOpsApi;

/// Neutral inline placeholder used when an icon cannot be fetched.
pub const PLACEHOLDER_ICON: &str =
    "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' width='16' height='16'/%3E";

/// Process-wide cache of resolved type icons keyed by organization and
/// work-item type. Failed fetches resolve to [`PLACEHOLDER_ICON`] without
/// being cached, so a later request retries them.
#[derive(Default)]
pub struct IconCache {
    entries: Mutex<HashMap<(String, String), String>>,
}

impl IconCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves an icon for every distinct type in `types`. Each missing
    /// (organization, type) pair is fetched exactly once, concurrently.
    pub async fn resolve_all(
        &self,
        api: &dyn DevOpsApi,
        organization: &str,
        types: &[String],
    ) -> HashMap<String, String> {
        let mut resolved = HashMap::new();
        let mut missing: Vec<String> = Vec::new();

        {
            let cache = self.entries.lock().await;
            for work_item_type in types {
                if resolved.contains_key(work_item_type) || missing.contains(work_item_type) {
                    continue;
                }
                let key = (organization.to_string(), work_item_type.clone());
                match cache.get(&key) {
                    Some(icon) => {
                        resolved.insert(work_item_type.clone(), icon.clone());
                    }
                    None => missing.push(work_item_type.clone()),
                }
            }
        }

        if missing.is_empty() {
            return resolved;
        }

        let fetches = missing
            .iter()
            .map(|work_item_type| api.get_type_icon(organization, work_item_type));
        let outcomes = join_all(fetches).await;

        let mut cache = self.entries.lock().await;
        for (work_item_type, outcome) in missing.into_iter().zip(outcomes) {
            match outcome {
                Ok(icon) => {
                    cache.insert((organization.to_string(), work_item_type.clone()), icon.clone());
                    resolved.insert(work_item_type, icon);
                }
                Err(e) => {
                    log::warn!("icon fetch for type '{}' failed: {}", work_item_type, e);
                    resolved.insert(work_item_type, PLACEHOLDER_ICON.to_string());
                }
            }
        }
        resolved
    }
}
