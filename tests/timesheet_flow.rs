use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use timegrid::database::SqliteStore;
use timegrid::models::{
    classify_state, classify_state_with, level_for_type, Activity, IterationsList,
    SchedulingFields, StateCategory, TimeEntry, WorkItem, WorkItemCurrentState, WorkItemRevision,
};
use timegrid::services::devops::DevOpsApi;
use timegrid::{Error, HoursSyncService, Result, TimesheetService};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn date(value: &str) -> NaiveDate {
    value.parse().expect("date")
}

fn work_item(id: i64, item_type: &str, state: &str, parent_id: Option<i64>) -> WorkItem {
    WorkItem {
        id,
        title: format!("Item {}", id),
        item_type: item_type.to_string(),
        state: state.to_string(),
        state_category: classify_state(state),
        assigned_to: None,
        parent_id,
        original_estimate: None,
        completed_work: None,
        remaining_work: None,
        icon_url: String::new(),
        level: level_for_type(item_type),
    }
}

fn entry(
    work_item_id: i64,
    project_id: &str,
    day: &str,
    duration: &str,
    activity: &Activity,
    user_id: &str,
) -> TimeEntry {
    TimeEntry {
        id: Uuid::new_v4(),
        work_item_id,
        organization: "acme".to_string(),
        project_id: project_id.to_string(),
        entry_date: date(day),
        duration: duration.to_string(),
        activity_id: activity.id,
        activity_name: activity.name.clone(),
        comment: None,
        user_id: user_id.to_string(),
        user_name: "User One".to_string(),
    }
}

/// Stub platform serving a fixed work-item universe.
struct StubPlatform {
    items: Vec<WorkItem>,
    iteration_members: Option<Vec<i64>>,
    states: HashMap<i64, String>,
    remaining: Option<f64>,
    pushed: Mutex<Option<(f64, f64)>>,
}

impl StubPlatform {
    fn new(items: Vec<WorkItem>) -> Self {
        Self {
            items,
            iteration_members: None,
            states: HashMap::new(),
            remaining: None,
            pushed: Mutex::new(None),
        }
    }
}

#[async_trait]
impl DevOpsApi for StubPlatform {
    async fn query_hierarchy_ids(
        &self,
        _organization: &str,
        _project: &str,
        _assignee: Option<&str>,
    ) -> Result<Vec<i64>> {
        Ok(self.items.iter().map(|item| item.id).collect())
    }

    async fn query_flat_ids(
        &self,
        _organization: &str,
        _project: &str,
        _assignee: Option<&str>,
    ) -> Result<Vec<i64>> {
        unimplemented!()
    }

    async fn get_work_item_details(
        &self,
        _organization: &str,
        _project: &str,
        ids: &[i64],
    ) -> Result<Vec<WorkItem>> {
        Ok(self
            .items
            .iter()
            .filter(|item| ids.contains(&item.id))
            .cloned()
            .collect())
    }

    async fn get_work_item_state(
        &self,
        _organization: &str,
        _project: &str,
        work_item_id: i64,
    ) -> Result<String> {
        self.states
            .get(&work_item_id)
            .cloned()
            .ok_or(Error::WorkItemNotFound(work_item_id))
    }

    async fn get_scheduling_fields(
        &self,
        _organization: &str,
        _project: &str,
        _work_item_id: i64,
    ) -> Result<SchedulingFields> {
        Ok(SchedulingFields {
            original_estimate: None,
            completed_work: None,
            remaining_work: self.remaining,
        })
    }

    async fn update_work_item_hours(
        &self,
        _organization: &str,
        _project: &str,
        _work_item_id: i64,
        completed_hours: f64,
        remaining_hours: f64,
    ) -> Result<()> {
        *self.pushed.lock().unwrap() = Some((completed_hours, remaining_hours));
        Ok(())
    }

    async fn get_work_item_revisions(
        &self,
        _organization: &str,
        _project: &str,
        work_item_id: i64,
    ) -> Result<Vec<WorkItemRevision>> {
        if work_item_id != 7 {
            return Err(Error::WorkItemNotFound(work_item_id));
        }
        Ok(vec![WorkItemRevision {
            rev: 1,
            changed_date: "2025-01-02T03:04:05Z".to_string(),
            state: Some("New".to_string()),
            assigned_to: None,
        }])
    }

    async fn get_current_states(
        &self,
        _organization: &str,
        _project: Option<&str>,
        ids: &[i64],
    ) -> Result<Vec<WorkItemCurrentState>> {
        Ok(self
            .items
            .iter()
            .filter(|item| ids.contains(&item.id))
            .map(|item| WorkItemCurrentState {
                id: item.id,
                state: Some(item.state.clone()),
                item_type: Some(item.item_type.clone()),
                assigned_to: item.assigned_to.clone(),
            })
            .collect())
    }

    async fn get_process_states(
        &self,
        _organization: &str,
        _process_id: &str,
        _wit_ref_name: &str,
    ) -> Result<HashMap<String, StateCategory>> {
        Ok(HashMap::from([(
            "Doing".to_string(),
            StateCategory::InProgress,
        )]))
    }

    async fn get_type_icon(&self, _organization: &str, work_item_type: &str) -> Result<String> {
        Ok(format!("icon:{}", work_item_type))
    }

    async fn list_iterations(
        &self,
        _organization: &str,
        _project: &str,
        _team: Option<&str>,
    ) -> Result<IterationsList> {
        Err(Error::Upstream {
            status: 503,
            detail: "iterations unavailable".to_string(),
        })
    }

    async fn get_iteration_work_item_ids(
        &self,
        _organization: &str,
        _project: &str,
        _iteration_id: &str,
        _team: Option<&str>,
    ) -> Result<Vec<i64>> {
        self.iteration_members
            .clone()
            .ok_or(Error::Upstream { status: 500, detail: "unavailable".into() })
    }
}

#[tokio::test]
async fn full_week_grid_merges_platform_items_with_stored_entries() {
    init_logging();
    let store = Arc::new(SqliteStore::in_memory().expect("store"));
    let project_uuid = "6f9619ff-8b86-d011-b42d-00c04fc964ff";
    store.add_project(project_uuid, "Phoenix", "acme").await.expect("project");
    let activity = Activity { id: Uuid::new_v4(), name: "Development".to_string(), active: true };
    store.add_activity(&activity).await.expect("activity");

    for (work_item_id, day, duration) in [
        (2, "2025-01-22", "01:00"),
        (2, "2025-01-22", "00:30"),
        (2, "2025-01-24", "02:00"),
        // booked against an item that left the queried universe
        (99, "2025-01-20", "02:00"),
    ] {
        store
            .add_time_entry(&entry(work_item_id, project_uuid, day, duration, &activity, "u1"))
            .await
            .expect("entry");
    }

    let mut epic = work_item(1, "Epic", "New", None);
    epic.original_estimate = Some(8.0);
    let platform = Arc::new(StubPlatform::new(vec![
        epic,
        work_item(2, "Task", "Active", Some(1)),
        work_item(3, "Task", "Closed", Some(1)),
    ]));
    let service = TimesheetService::new(platform, store.clone(), store.clone());

    let grid = service
        .get_timesheet("acme", "Phoenix", Some(date("2025-01-22")), None, None, None)
        .await
        .expect("grid");

    assert_eq!(grid.week_start, date("2025-01-20"));
    assert_eq!(grid.week_end, date("2025-01-26"));
    assert_eq!(grid.week_label, "20/01 - 26/01");
    assert_eq!(grid.total_work_items, 3);
    assert_eq!(grid.total_effort, 8.0);

    // one root with both tasks nested underneath
    assert_eq!(grid.items.len(), 1);
    let root = &grid.items[0];
    assert_eq!(root.id, 1);
    assert_eq!(root.icon_url, "icon:Epic");
    assert!(root.can_edit);
    let children: Vec<i64> = root.children.iter().map(|child| child.id).collect();
    assert_eq!(children, vec![2, 3]);

    let task = &root.children[0];
    assert_eq!(task.week_total_hours, 3.5);
    assert_eq!(task.week_total_formatted, "03:30");
    let wednesday = &task.days[2];
    assert_eq!(wednesday.entries.len(), 2);
    assert_eq!(wednesday.total_formatted, "01:30");

    let closed = &root.children[1];
    assert!(!closed.can_edit);
    assert!(!closed.can_delete);

    // the orphaned entry still counts toward day and week totals
    assert_eq!(grid.totals_by_day.len(), 7);
    assert_eq!(grid.totals_by_day[0].total_hours, 2.0);
    assert_eq!(grid.grand_total_hours, 5.5);
    assert_eq!(grid.grand_total_formatted, "05:30");
    assert_eq!(grid.total_historical, 5.5);
}

#[tokio::test]
async fn iteration_filter_restricts_the_universe() {
    init_logging();
    let store = Arc::new(SqliteStore::in_memory().expect("store"));
    let mut platform = StubPlatform::new(vec![
        work_item(1, "Epic", "New", None),
        work_item(2, "Task", "Active", Some(1)),
    ]);
    platform.iteration_members = Some(vec![2]);
    let service = TimesheetService::new(Arc::new(platform), store.clone(), store.clone());

    let grid = service
        .get_timesheet("acme", "proj", Some(date("2025-01-22")), None, None, Some("it-7"))
        .await
        .expect("grid");

    assert_eq!(grid.total_work_items, 1);
    assert_eq!(grid.items.len(), 1);
    // the parent was filtered out, so the task surfaces as a root
    assert_eq!(grid.items[0].id, 2);
    assert!(grid.items[0].children.is_empty());
}

#[tokio::test]
async fn user_scope_restricts_stored_entries() {
    init_logging();
    let store = Arc::new(SqliteStore::in_memory().expect("store"));
    let activity = Activity { id: Uuid::new_v4(), name: "Development".to_string(), active: true };
    store.add_activity(&activity).await.expect("activity");
    store
        .add_time_entry(&entry(2, "proj", "2025-01-20", "01:00", &activity, "u1"))
        .await
        .expect("entry");
    store
        .add_time_entry(&entry(2, "proj", "2025-01-20", "02:00", &activity, "u2"))
        .await
        .expect("entry");

    let platform = Arc::new(StubPlatform::new(vec![work_item(2, "Task", "Active", None)]));
    let service = TimesheetService::new(platform, store.clone(), store.clone());

    let everyone = service
        .get_timesheet("acme", "proj", Some(date("2025-01-20")), None, None, None)
        .await
        .expect("grid");
    assert_eq!(everyone.grand_total_hours, 3.0);

    let scoped = service
        .get_timesheet("acme", "proj", Some(date("2025-01-20")), None, Some("u1"), None)
        .await
        .expect("grid");
    assert_eq!(scoped.grand_total_hours, 1.0);
}

#[tokio::test]
async fn state_category_lookup_reports_permissions() {
    init_logging();
    let store = Arc::new(SqliteStore::in_memory().expect("store"));
    let mut platform = StubPlatform::new(Vec::new());
    platform.states.insert(7, "Resolved".to_string());
    let service = TimesheetService::new(Arc::new(platform), store.clone(), store.clone());

    let info = service.get_state_category("acme", "proj", 7).await.expect("info");
    assert_eq!(info.work_item_id, 7);
    assert_eq!(info.state, "Resolved");
    assert_eq!(info.state_category, StateCategory::Resolved);
    assert!(info.can_edit);
    assert!(info.can_delete);

    let err = service.get_state_category("acme", "proj", 404).await.unwrap_err();
    assert!(matches!(err, Error::WorkItemNotFound(404)));
}

#[tokio::test]
async fn current_state_batch_is_keyed_by_id() {
    init_logging();
    let store = Arc::new(SqliteStore::in_memory().expect("store"));
    let platform = Arc::new(StubPlatform::new(vec![
        work_item(1, "Epic", "New", None),
        work_item(2, "Task", "Active", Some(1)),
    ]));
    let service = TimesheetService::new(platform, store.clone(), store.clone());

    let states = service
        .get_work_items_current_state("acme", Some("proj"), &[1, 2])
        .await
        .expect("states");
    assert_eq!(states.len(), 2);
    assert_eq!(states[&2].state.as_deref(), Some("Active"));
    assert_eq!(states[&1].item_type.as_deref(), Some("Epic"));
}

#[tokio::test]
async fn hours_sync_pushes_totals_from_the_store() {
    init_logging();
    let store = Arc::new(SqliteStore::in_memory().expect("store"));
    let activity = Activity { id: Uuid::new_v4(), name: "Development".to_string(), active: true };
    store.add_activity(&activity).await.expect("activity");
    // all-time total spans weeks: 1.0 + 2.5 hours
    store
        .add_time_entry(&entry(7, "proj", "2025-01-20", "01:00", &activity, "u1"))
        .await
        .expect("entry");
    store
        .add_time_entry(&entry(7, "proj", "2025-02-03", "02:30", &activity, "u1"))
        .await
        .expect("entry");

    let mut platform = StubPlatform::new(Vec::new());
    platform.remaining = Some(5.0);
    let platform = Arc::new(platform);
    let sync = HoursSyncService::new(platform.clone(), store.clone());

    assert!(sync.sync_after_mutation("acme", "proj", 7, 2.5).await);
    assert_eq!(*platform.pushed.lock().unwrap(), Some((3.5, 2.5)));
}

#[tokio::test]
async fn revision_history_wraps_platform_revisions() {
    init_logging();
    let store = Arc::new(SqliteStore::in_memory().expect("store"));
    let service = TimesheetService::new(
        Arc::new(StubPlatform::new(Vec::new())),
        store.clone(),
        store.clone(),
    );

    let history = service
        .get_work_item_revisions("acme", "proj", 7)
        .await
        .expect("history");
    assert_eq!(history.work_item_id, 7);
    assert_eq!(history.revisions.len(), 1);
    assert_eq!(history.revisions[0].state.as_deref(), Some("New"));

    let err = service
        .get_work_item_revisions("acme", "proj", 8)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::WorkItemNotFound(8)));
}

#[tokio::test]
async fn process_state_map_feeds_the_classifier_override() {
    init_logging();
    let store = Arc::new(SqliteStore::in_memory().expect("store"));
    let service = TimesheetService::new(
        Arc::new(StubPlatform::new(Vec::new())),
        store.clone(),
        store.clone(),
    );

    let map = service
        .get_process_states("acme", "proc-1", "Custom.Story")
        .await
        .expect("states");
    assert_eq!(map.state_map.get("Doing"), Some(&StateCategory::InProgress));
    assert_eq!(
        classify_state_with(Some(&map.state_map), "Doing"),
        StateCategory::InProgress
    );
}

#[tokio::test]
async fn unavailable_iteration_listing_degrades_to_empty() {
    init_logging();
    let store = Arc::new(SqliteStore::in_memory().expect("store"));
    let service = TimesheetService::new(
        Arc::new(StubPlatform::new(Vec::new())),
        store.clone(),
        store.clone(),
    );

    let list = service.list_iterations("acme", "proj", None).await;
    assert_eq!(list.count, 0);
    assert!(list.iterations.is_empty());
    assert!(list.current_iteration_id.is_none());
}
