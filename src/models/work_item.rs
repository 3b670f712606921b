use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Lifecycle categories of the Agile process.
/// Ref: https://learn.microsoft.com/en-us/azure/devops/boards/work-items/workflow-and-state-categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateCategory {
    Proposed,
    InProgress,
    Resolved,
    Completed,
    Removed,
}

impl StateCategory {
    /// Time entries can be edited and deleted only while the item is still open.
    pub fn allows_editing(self) -> bool {
        matches!(self, Self::Proposed | Self::InProgress | Self::Resolved)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Proposed => "Proposed",
            Self::InProgress => "InProgress",
            Self::Resolved => "Resolved",
            Self::Completed => "Completed",
            Self::Removed => "Removed",
        }
    }

    /// Category by its wire name, defaulting to InProgress for anything else.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Proposed" => Self::Proposed,
            "InProgress" => Self::InProgress,
            "Resolved" => Self::Resolved,
            "Completed" => Self::Completed,
            "Removed" => Self::Removed,
            _ => Self::InProgress,
        }
    }
}

const STATE_TABLE: [(&str, StateCategory); 8] = [
    ("New", StateCategory::Proposed),
    ("Active", StateCategory::InProgress),
    ("Committed", StateCategory::InProgress),
    ("Open", StateCategory::InProgress),
    ("Resolved", StateCategory::Resolved),
    ("Closed", StateCategory::Completed),
    ("Done", StateCategory::Completed),
    ("Removed", StateCategory::Removed),
];

fn category_from_overrides(
    overrides: Option<&HashMap<String, StateCategory>>,
    state: &str,
) -> Option<StateCategory> {
    overrides.and_then(|map| map.get(state).copied())
}

fn category_from_table(state: &str) -> Option<StateCategory> {
    STATE_TABLE
        .iter()
        .find(|(name, _)| *name == state)
        .map(|(_, category)| *category)
}

/// Classifies a raw state name. Lookups run in order: the process-state
/// override map when one is supplied, the static Agile table, and finally
/// the InProgress default. Total over every input, never errors.
pub fn classify_state_with(
    overrides: Option<&HashMap<String, StateCategory>>,
    state: &str,
) -> StateCategory {
    category_from_overrides(overrides, state)
        .or_else(|| category_from_table(state))
        .unwrap_or(StateCategory::InProgress)
}

/// Static-table classification without a process override map.
pub fn classify_state(state: &str) -> StateCategory {
    classify_state_with(None, state)
}

const TYPE_TO_LEVEL: [(&str, i32); 6] = [
    ("Epic", 0),
    ("Feature", 1),
    ("User Story", 2),
    ("Product Backlog Item", 2),
    ("Task", 3),
    ("Bug", 3),
];

/// Hierarchy depth for a work-item type; unknown types sit at leaf level.
pub fn level_for_type(work_item_type: &str) -> i32 {
    TYPE_TO_LEVEL
        .iter()
        .find(|(name, _)| *name == work_item_type)
        .map(|(_, level)| *level)
        .unwrap_or(3)
}

/// A work item as fetched and decoded from the external platform.
/// Rebuilt on every request; identity is the platform id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub state: String,
    pub state_category: StateCategory,
    pub assigned_to: Option<String>,
    pub parent_id: Option<i64>,
    pub original_estimate: Option<f64>,
    pub completed_work: Option<f64>,
    pub remaining_work: Option<f64>,
    pub icon_url: String,
    pub level: i32,
}

/// Scheduling fields read back before a write-back update.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SchedulingFields {
    pub original_estimate: Option<f64>,
    pub completed_work: Option<f64>,
    pub remaining_work: Option<f64>,
}
