use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{Datelike, Local, NaiveDate};
use uuid::Uuid;

use crate::database::{ProjectDirectory, TimeEntryStore};
use crate::error::Result;
use crate::models::{
    classify_state, DayCell, DayEntry, DayTotal, IterationsList, ProcessStateMap, RevisionHistory,
    StateCategoryInfo, TimeEntry, WeekGrid, WorkItem, WorkItemCurrentState, WorkItemNode,
};
use crate::services::devops::{DevOpsApi, MAX_BATCH_IDS};
use crate::services::icons::IconCache;
use crate::services::work_items;
use crate::utils::week::{week_label, week_window, WeekWindow, WEEKDAY_LABELS};
use crate::utils::{duration_to_hours, format_hours};

/// Facade over the work-tracking platform and the local entry store.
///
/// The central operation is [`get_timesheet`](Self::get_timesheet): fetch the
/// project's work-item universe, merge in the locally stored time entries for
/// one Monday-to-Sunday window, and fold the result into a nested weekly grid
/// with per-day and per-item totals.
pub struct TimesheetService {
    api: Arc<dyn DevOpsApi>,
    store: Arc<dyn TimeEntryStore>,
    projects: Arc<dyn ProjectDirectory>,
    icons: Arc<IconCache>,
}

impl TimesheetService {
    pub fn new(
        api: Arc<dyn DevOpsApi>,
        store: Arc<dyn TimeEntryStore>,
        projects: Arc<dyn ProjectDirectory>,
    ) -> Self {
        Self { api, store, projects, icons: Arc::new(IconCache::new()) }
    }

    /// Builds the aggregated week view. `week_start` is normalized to its
    /// Monday; `None` means the current week. Platform outages degrade to an
    /// empty item list, while storage errors propagate.
    pub async fn get_timesheet(
        &self,
        organization: &str,
        project: &str,
        week_start: Option<NaiveDate>,
        user_email: Option<&str>,
        user_id: Option<&str>,
        iteration_id: Option<&str>,
    ) -> Result<WeekGrid> {
        let window = week_window(week_start);
        let project_key = self.canonical_project_id(project).await;

        let fetch_items = async {
            let mut ids =
                work_items::fetch_work_item_ids(self.api.as_ref(), organization, project, user_email)
                    .await;
            if let Some(iteration) = iteration_id {
                ids = work_items::filter_by_iteration(
                    self.api.as_ref(),
                    organization,
                    project,
                    iteration,
                    None,
                    ids,
                )
                .await;
            }
            work_items::resolve_details(self.api.as_ref(), &self.icons, organization, project, &ids)
                .await
        };
        let load_entries =
            self.store
                .entries_for_week(organization, &project_key, window.start, window.end, user_id);

        let (items, entries) = tokio::join!(fetch_items, load_entries);
        let grouped = group_entries(entries?);

        Ok(build_week_grid(&window, items, &grouped))
    }

    /// Lifecycle category of a single work item, with the edit permissions it
    /// implies. Unknown items surface as a typed not-found error.
    pub async fn get_state_category(
        &self,
        organization: &str,
        project: &str,
        work_item_id: i64,
    ) -> Result<StateCategoryInfo> {
        let state = self
            .api
            .get_work_item_state(organization, project, work_item_id)
            .await?;
        let category = classify_state(&state);
        Ok(StateCategoryInfo {
            work_item_id,
            state,
            state_category: category,
            can_edit: category.allows_editing(),
            can_delete: category.allows_editing(),
        })
    }

    /// Current state of many work items keyed by id, fetched in batches.
    /// This feeds validation, so failures propagate instead of degrading.
    pub async fn get_work_items_current_state(
        &self,
        organization: &str,
        project: Option<&str>,
        ids: &[i64],
    ) -> Result<HashMap<i64, WorkItemCurrentState>> {
        let mut by_id = HashMap::with_capacity(ids.len());
        for chunk in ids.chunks(MAX_BATCH_IDS) {
            let states = self.api.get_current_states(organization, project, chunk).await?;
            for state in states {
                by_id.insert(state.id, state);
            }
        }
        Ok(by_id)
    }

    pub async fn get_work_item_revisions(
        &self,
        organization: &str,
        project: &str,
        work_item_id: i64,
    ) -> Result<RevisionHistory> {
        let revisions = self
            .api
            .get_work_item_revisions(organization, project, work_item_id)
            .await?;
        Ok(RevisionHistory { work_item_id, revisions })
    }

    /// State-to-category map of a process work-item type, for processes with
    /// customized state names.
    pub async fn get_process_states(
        &self,
        organization: &str,
        process_id: &str,
        wit_ref_name: &str,
    ) -> Result<ProcessStateMap> {
        let state_map = self
            .api
            .get_process_states(organization, process_id, wit_ref_name)
            .await?;
        Ok(ProcessStateMap { state_map })
    }

    /// Iterations of a project team. A failing lookup degrades to an empty
    /// listing so week rendering never depends on it.
    pub async fn list_iterations(
        &self,
        organization: &str,
        project: &str,
        team: Option<&str>,
    ) -> IterationsList {
        match self.api.list_iterations(organization, project, team).await {
            Ok(list) => list,
            Err(e) => {
                log::warn!("iteration listing for {}/{} failed: {}", organization, project, e);
                IterationsList::default()
            }
        }
    }

    /// Entries are stored under the project's canonical id. Callers may pass
    /// that id directly or a display name, which the directory resolves; an
    /// unknown name falls back to itself as the storage key.
    async fn canonical_project_id(&self, project: &str) -> String {
        if Uuid::parse_str(project).is_ok() {
            return project.to_string();
        }
        match self.projects.canonical_project_id(project).await {
            Ok(Some(id)) => id,
            Ok(None) => {
                log::debug!("project '{}' has no directory entry; keying by name", project);
                project.to_string()
            }
            Err(e) => {
                log::warn!("project lookup for '{}' failed ({}); keying by name", project, e);
                project.to_string()
            }
        }
    }
}

// ─── Grid assembly ───────────────────────────────────────────────────────────

type EntriesByItem = HashMap<i64, HashMap<NaiveDate, Vec<TimeEntry>>>;

fn group_entries(entries: Vec<TimeEntry>) -> EntriesByItem {
    let mut grouped: EntriesByItem = HashMap::new();
    for entry in entries {
        grouped
            .entry(entry.work_item_id)
            .or_default()
            .entry(entry.entry_date)
            .or_default()
            .push(entry);
    }
    grouped
}

fn day_entry(entry: &TimeEntry) -> DayEntry {
    DayEntry {
        id: entry.id,
        duration: entry.duration.clone(),
        duration_hours: duration_to_hours(&entry.duration),
        activity_id: entry.activity_id,
        activity_name: entry.activity_name.clone(),
        comment: entry.comment.clone(),
    }
}

fn format_nonzero(hours: f64) -> String {
    if hours > 0.0 {
        format_hours(hours)
    } else {
        String::new()
    }
}

fn build_item_node(
    item: &WorkItem,
    window: &WeekWindow,
    item_entries: Option<&HashMap<NaiveDate, Vec<TimeEntry>>>,
    today: NaiveDate,
) -> WorkItemNode {
    let mut days = Vec::with_capacity(7);
    let mut week_total_hours = 0.0;

    for (index, date) in window.dates.iter().enumerate() {
        let entries: Vec<DayEntry> = item_entries
            .and_then(|by_date| by_date.get(date))
            .map(|day| day.iter().map(day_entry).collect())
            .unwrap_or_default();
        let total_hours: f64 = entries.iter().map(|entry| entry.duration_hours).sum();
        week_total_hours += total_hours;

        days.push(DayCell {
            date: *date,
            weekday: WEEKDAY_LABELS[index].to_string(),
            day_of_month: date.day(),
            total_hours,
            total_formatted: format_nonzero(total_hours),
            entries,
            is_today: *date == today,
            is_weekend: index >= 5,
        });
    }

    let editable = item.state_category.allows_editing();
    WorkItemNode {
        id: item.id,
        title: item.title.clone(),
        item_type: item.item_type.clone(),
        state: item.state.clone(),
        state_category: item.state_category,
        icon_url: item.icon_url.clone(),
        assigned_to: item.assigned_to.clone(),
        original_estimate: item.original_estimate,
        completed_work: item.completed_work,
        remaining_work: item.remaining_work,
        week_total_hours,
        week_total_formatted: format_nonzero(week_total_hours),
        days,
        level: item.level,
        parent_id: item.parent_id,
        children: Vec::new(),
        can_edit: editable,
        can_delete: editable,
    }
}

fn attach_children(node: &mut WorkItemNode, children_by_parent: &mut HashMap<i64, Vec<WorkItemNode>>) {
    let Some(mut children) = children_by_parent.remove(&node.id) else { return };
    for child in &mut children {
        attach_children(child, children_by_parent);
    }
    children.sort_by_key(|child| (child.level, child.id));
    node.children = children;
}

/// Nests flat nodes under their parents. A node whose parent is absent from
/// the fetched set, or is itself, becomes a root. Every input node appears in
/// the result exactly once.
fn build_forest(nodes: Vec<WorkItemNode>) -> Vec<WorkItemNode> {
    let ids: HashSet<i64> = nodes.iter().map(|node| node.id).collect();

    let mut roots = Vec::new();
    let mut children_by_parent: HashMap<i64, Vec<WorkItemNode>> = HashMap::new();
    for node in nodes {
        match node.parent_id {
            Some(parent) if parent != node.id && ids.contains(&parent) => {
                children_by_parent.entry(parent).or_default().push(node);
            }
            _ => roots.push(node),
        }
    }

    for root in &mut roots {
        attach_children(root, &mut children_by_parent);
    }

    // Parent cycles never reach a root. Promote what hangs off the lowest
    // remaining parent id until nothing is left over.
    loop {
        let Some(&parent) = children_by_parent.keys().min() else { break };
        let orphans = children_by_parent.remove(&parent).unwrap_or_default();
        for mut orphan in orphans {
            attach_children(&mut orphan, &mut children_by_parent);
            roots.push(orphan);
        }
    }

    roots.sort_by_key(|node| (node.level, node.id));
    roots
}

/// Day totals run over every stored entry in the window, including entries
/// whose work item is no longer part of the fetched universe.
fn day_totals(window: &WeekWindow, grouped: &EntriesByItem, today: NaiveDate) -> Vec<DayTotal> {
    window
        .dates
        .iter()
        .enumerate()
        .map(|(index, date)| {
            let total_hours: f64 = grouped
                .values()
                .filter_map(|by_date| by_date.get(date))
                .flatten()
                .map(|entry| duration_to_hours(&entry.duration))
                .sum();
            DayTotal {
                date: *date,
                weekday: WEEKDAY_LABELS[index].to_string(),
                day_of_month: date.day(),
                total_hours,
                total_formatted: format_nonzero(total_hours),
                is_today: *date == today,
            }
        })
        .collect()
}

fn build_week_grid(window: &WeekWindow, items: Vec<WorkItem>, grouped: &EntriesByItem) -> WeekGrid {
    let today = Local::now().date_naive();
    let total_work_items = items.len();
    let total_effort: f64 = items.iter().filter_map(|item| item.original_estimate).sum();

    let nodes = items
        .iter()
        .map(|item| build_item_node(item, window, grouped.get(&item.id), today))
        .collect();
    let forest = build_forest(nodes);

    let totals_by_day = day_totals(window, grouped, today);
    let grand_total_hours: f64 = totals_by_day.iter().map(|day| day.total_hours).sum();

    WeekGrid {
        week_start: window.start,
        week_end: window.end,
        week_label: week_label(window.start, window.end),
        items: forest,
        grand_total_hours,
        grand_total_formatted: format_nonzero(grand_total_hours),
        totals_by_day,
        total_work_items,
        total_effort,
        total_historical: grand_total_hours,
    }
}
