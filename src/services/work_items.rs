use std::collections::HashSet;

use crate::error::Error;
use crate::models::WorkItem;
use crate::services::devops::{DevOpsApi, MAX_BATCH_IDS};
use crate::services::icons::{IconCache, PLACEHOLDER_ICON};

/// Fetches the work-item id universe for a project: the recursive hierarchy
/// query first, then exactly one flat fallback if it fails. Both failing
/// resolves to an empty set rather than an error, so a degraded platform
/// still renders an empty week. A missing credential skips the fallback.
pub async fn fetch_work_item_ids(
    api: &dyn DevOpsApi,
    organization: &str,
    project: &str,
    assignee: Option<&str>,
) -> Vec<i64> {
    match api.query_hierarchy_ids(organization, project, assignee).await {
        Ok(ids) => ids,
        Err(Error::MissingCredential(org)) => {
            log::warn!("no credential for organization '{}'; returning no work items", org);
            Vec::new()
        }
        Err(e) => {
            log::warn!("hierarchy query failed ({}); retrying with a flat query", e);
            match api.query_flat_ids(organization, project, assignee).await {
                Ok(ids) => ids,
                Err(e) => {
                    log::error!("flat work-item query also failed: {}", e);
                    Vec::new()
                }
            }
        }
    }
}

/// Restricts `ids` to the members of one iteration, preserving order. A
/// failed iteration lookup empties the selection; the caller then renders
/// an empty week instead of the unfiltered one.
pub async fn filter_by_iteration(
    api: &dyn DevOpsApi,
    organization: &str,
    project: &str,
    iteration_id: &str,
    team: Option<&str>,
    ids: Vec<i64>,
) -> Vec<i64> {
    match api
        .get_iteration_work_item_ids(organization, project, iteration_id, team)
        .await
    {
        Ok(iteration_ids) => {
            let members: HashSet<i64> = iteration_ids.into_iter().collect();
            ids.into_iter().filter(|id| members.contains(id)).collect()
        }
        Err(e) => {
            log::warn!("iteration {} lookup failed ({}); no work items match", iteration_id, e);
            Vec::new()
        }
    }
}

/// Resolves work-item details in chunks of [`MAX_BATCH_IDS`] and attaches
/// type icons. A failed chunk is logged and skipped so one bad batch cannot
/// empty the whole week.
pub async fn resolve_details(
    api: &dyn DevOpsApi,
    icons: &IconCache,
    organization: &str,
    project: &str,
    ids: &[i64],
) -> Vec<WorkItem> {
    let mut items = Vec::with_capacity(ids.len());
    for chunk in ids.chunks(MAX_BATCH_IDS) {
        match api.get_work_item_details(organization, project, chunk).await {
            Ok(mut chunk_items) => items.append(&mut chunk_items),
            Err(e) => log::error!(
                "detail fetch for {} work items failed ({}); skipping chunk",
                chunk.len(),
                e
            ),
        }
    }

    let mut types: Vec<String> = items.iter().map(|item| item.item_type.clone()).collect();
    types.sort();
    types.dedup();

    let resolved = icons.resolve_all(api, organization, &types).await;
    for item in &mut items {
        item.icon_url = resolved
            .get(&item.item_type)
            .cloned()
            .unwrap_or_else(|| PLACEHOLDER_ICON.to_string());
    }
    items
}
