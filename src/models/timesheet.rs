use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::work_item::StateCategory;

/// A time entry projected into a day cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayEntry {
    pub id: Uuid,
    pub duration: String,
    pub duration_hours: f64,
    pub activity_id: Uuid,
    pub activity_name: String,
    pub comment: Option<String>,
}

/// One day of one work item's row in the grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub weekday: String,
    pub day_of_month: u32,
    pub total_hours: f64,
    /// "HH:mm", empty when the day has no hours.
    pub total_formatted: String,
    pub entries: Vec<DayEntry>,
    pub is_today: bool,
    pub is_weekend: bool,
}

/// A work item with its week cells and nested children.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkItemNode {
    pub id: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub state: String,
    pub state_category: StateCategory,
    pub icon_url: String,
    pub assigned_to: Option<String>,
    pub original_estimate: Option<f64>,
    pub completed_work: Option<f64>,
    pub remaining_work: Option<f64>,
    pub week_total_hours: f64,
    pub week_total_formatted: String,
    pub days: Vec<DayCell>,
    pub level: i32,
    pub parent_id: Option<i64>,
    pub children: Vec<WorkItemNode>,
    pub can_edit: bool,
    pub can_delete: bool,
}

/// One cell of the grid's footer totals row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayTotal {
    pub date: NaiveDate,
    pub weekday: String,
    pub day_of_month: u32,
    pub total_hours: f64,
    pub total_formatted: String,
    pub is_today: bool,
}

/// The fully aggregated weekly grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekGrid {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    /// e.g. "19/01 - 25/01"
    pub week_label: String,
    pub items: Vec<WorkItemNode>,
    pub grand_total_hours: f64,
    pub grand_total_formatted: String,
    pub totals_by_day: Vec<DayTotal>,
    pub total_work_items: usize,
    /// Sum of original estimates over the fetched items.
    pub total_effort: f64,
    /// Equal to the grand total: the week's aggregated actuals.
    pub total_historical: f64,
}

/// State category of a single work item plus the edit permissions it implies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateCategoryInfo {
    pub work_item_id: i64,
    pub state: String,
    pub state_category: StateCategory,
    pub can_edit: bool,
    pub can_delete: bool,
}

/// One revision in a work item's change history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkItemRevision {
    pub rev: i64,
    pub changed_date: String,
    pub state: Option<String>,
    pub assigned_to: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevisionHistory {
    pub work_item_id: i64,
    pub revisions: Vec<WorkItemRevision>,
}

/// State-name to category mapping for one process's work-item type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessStateMap {
    pub state_map: HashMap<String, StateCategory>,
}

/// Current state of a work item, used for pre-write validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkItemCurrentState {
    pub id: i64,
    pub state: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub assigned_to: Option<String>,
}
