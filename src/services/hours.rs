use std::sync::Arc;

use crate::database::TimeEntryStore;
use crate::services::devops::DevOpsApi;

/// Pushes local effort totals back to the platform after a time entry is
/// created, changed, or deleted.
pub struct HoursSyncService {
    api: Arc<dyn DevOpsApi>,
    store: Arc<dyn TimeEntryStore>,
}

impl HoursSyncService {
    pub fn new(api: Arc<dyn DevOpsApi>, store: Arc<dyn TimeEntryStore>) -> Self {
        Self { api, store }
    }

    /// Recomputes the item's completed work from the store's all-time total
    /// and lowers its remaining work by `delta_hours`, clamped at zero. A
    /// deletion passes a negative delta, which raises remaining work again.
    ///
    /// The local mutation is already committed when this runs, so failures
    /// are logged and reported as `false` rather than propagated.
    pub async fn sync_after_mutation(
        &self,
        organization: &str,
        project_id: &str,
        work_item_id: i64,
        delta_hours: f64,
    ) -> bool {
        let completed = match self
            .store
            .total_hours_for_item(organization, project_id, work_item_id)
            .await
        {
            Ok(total) => total,
            Err(e) => {
                log::warn!("could not total hours for work item {}: {}", work_item_id, e);
                return false;
            }
        };

        let current_remaining = match self
            .api
            .get_scheduling_fields(organization, project_id, work_item_id)
            .await
        {
            Ok(fields) => fields.remaining_work.unwrap_or(0.0),
            Err(e) => {
                log::warn!(
                    "scheduling fields for work item {} unavailable ({}); assuming none remaining",
                    work_item_id,
                    e
                );
                0.0
            }
        };
        let remaining = (current_remaining - delta_hours).max(0.0);

        match self
            .api
            .update_work_item_hours(organization, project_id, work_item_id, completed, remaining)
            .await
        {
            Ok(()) => {
                log::info!(
                    "work item {} hours synced: completed {:.2}, remaining {:.2}",
                    work_item_id,
                    completed,
                    remaining
                );
                true
            }
            Err(e) => {
                log::error!("hours write-back for work item {} failed: {}", work_item_id, e);
                false
            }
        }
    }
}
