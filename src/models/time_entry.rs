use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A locally stored time entry. The aggregation engine only reads these;
/// creation and validation live in the CRUD layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: Uuid,
    pub work_item_id: i64,
    pub organization: String,
    pub project_id: String,
    pub entry_date: NaiveDate,
    /// Duration in "HH:mm" as entered by the user.
    pub duration: String,
    pub activity_id: Uuid,
    pub activity_name: String,
    pub comment: Option<String>,
    pub user_id: String,
    pub user_name: String,
}

/// An activity label entries are booked against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: Uuid,
    pub name: String,
    pub active: bool,
}
