use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use rusqlite::Connection;

use crate::models::TimeEntry;

pub mod queries;
pub mod schema;
pub mod store;

pub use store::SqliteStore;

pub fn init_database(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;

    // Enable WAL mode
    conn.pragma_update(None, "journal_mode", &"WAL")?;
    conn.pragma_update(None, "synchronous", &"NORMAL")?;
    conn.pragma_update(None, "foreign_keys", &"ON")?;

    // Create schema
    schema::create_tables(&conn)?;

    Ok(conn)
}

/// Read access to the local time-entry store.
#[async_trait]
pub trait TimeEntryStore: Send + Sync {
    async fn entries_for_week(
        &self,
        organization: &str,
        project_id: &str,
        week_start: NaiveDate,
        week_end: NaiveDate,
        user_id: Option<&str>,
    ) -> Result<Vec<TimeEntry>>;

    /// All-time booked hours for one work item.
    async fn total_hours_for_item(
        &self,
        organization: &str,
        project_id: &str,
        work_item_id: i64,
    ) -> Result<f64>;
}

/// Resolves legacy project display names to canonical platform ids.
#[async_trait]
pub trait ProjectDirectory: Send + Sync {
    async fn canonical_project_id(&self, name: &str) -> Result<Option<String>>;
}

/// Stored platform tokens keyed by organization.
#[async_trait]
pub trait CredentialSource: Send + Sync {
    async fn token_for_org(&self, organization: &str) -> Result<Option<String>>;
}
