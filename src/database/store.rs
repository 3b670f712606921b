use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use rusqlite::Connection;
use tokio::sync::Mutex;

use crate::database::{self, queries, CredentialSource, ProjectDirectory, TimeEntryStore};
use crate::models::{Activity, TimeEntry};

/// SQLite-backed store shared across async tasks.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn: Arc::new(Mutex::new(conn)) }
    }

    pub fn open(db_path: &Path) -> Result<Self> {
        Ok(Self::new(database::init_database(db_path)?))
    }

    /// In-memory database, used by tests and ephemeral setups.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", &"ON")?;
        database::schema::create_tables(&conn)?;
        Ok(Self::new(conn))
    }

    pub async fn add_activity(&self, activity: &Activity) -> Result<()> {
        let conn = self.conn.lock().await;
        queries::insert_activity(&conn, activity)
    }

    pub async fn add_time_entry(&self, entry: &TimeEntry) -> Result<()> {
        let conn = self.conn.lock().await;
        queries::insert_time_entry(&conn, entry)
    }

    pub async fn add_project(&self, external_id: &str, name: &str, organization: &str) -> Result<()> {
        let conn = self.conn.lock().await;
        queries::insert_project(&conn, external_id, name, organization)
    }

    pub async fn set_credential(&self, organization: &str, token: &str) -> Result<()> {
        let conn = self.conn.lock().await;
        queries::upsert_credential(&conn, organization, token)
    }
}

#[async_trait]
impl TimeEntryStore for SqliteStore {
    async fn entries_for_week(
        &self,
        organization: &str,
        project_id: &str,
        week_start: NaiveDate,
        week_end: NaiveDate,
        user_id: Option<&str>,
    ) -> Result<Vec<TimeEntry>> {
        let conn = self.conn.lock().await;
        queries::list_week_entries(&conn, organization, project_id, week_start, week_end, user_id)
    }

    async fn total_hours_for_item(
        &self,
        organization: &str,
        project_id: &str,
        work_item_id: i64,
    ) -> Result<f64> {
        let conn = self.conn.lock().await;
        queries::total_hours_for_work_item(&conn, organization, project_id, work_item_id)
    }
}

#[async_trait]
impl ProjectDirectory for SqliteStore {
    async fn canonical_project_id(&self, name: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().await;
        queries::project_id_by_name(&conn, name)
    }
}

#[async_trait]
impl CredentialSource for SqliteStore {
    async fn token_for_org(&self, organization: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().await;
        queries::credential_for_org(&conn, organization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn entry(
        work_item_id: i64,
        date: &str,
        duration: &str,
        activity_id: Uuid,
        user_id: &str,
    ) -> TimeEntry {
        TimeEntry {
            id: Uuid::new_v4(),
            work_item_id,
            organization: "acme".to_string(),
            project_id: "proj-1".to_string(),
            entry_date: date.parse().expect("date"),
            duration: duration.to_string(),
            activity_id,
            activity_name: String::new(),
            comment: None,
            user_id: user_id.to_string(),
            user_name: "Test User".to_string(),
        }
    }

    async fn seeded_store() -> (SqliteStore, Uuid) {
        let store = SqliteStore::in_memory().expect("in-memory db");
        let activity = Activity { id: Uuid::new_v4(), name: "Development".to_string(), active: true };
        store.add_activity(&activity).await.expect("activity");
        (store, activity.id)
    }

    #[tokio::test]
    async fn week_query_filters_by_window_and_scope() {
        let (store, activity_id) = seeded_store().await;

        store.add_time_entry(&entry(10, "2025-01-20", "01:00", activity_id, "u1")).await.unwrap();
        store.add_time_entry(&entry(10, "2025-01-26", "00:30", activity_id, "u1")).await.unwrap();
        // outside the window
        store.add_time_entry(&entry(10, "2025-01-27", "08:00", activity_id, "u1")).await.unwrap();
        // other project
        let mut other = entry(11, "2025-01-21", "02:00", activity_id, "u1");
        other.project_id = "proj-2".to_string();
        store.add_time_entry(&other).await.unwrap();

        let start = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 1, 26).unwrap();
        let entries = store.entries_for_week("acme", "proj-1", start, end, None).await.unwrap();

        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.project_id == "proj-1"));
        assert_eq!(entries[0].entry_date, start);
        assert_eq!(entries[0].activity_name, "Development");
    }

    #[tokio::test]
    async fn week_query_restricts_to_user_when_given() {
        let (store, activity_id) = seeded_store().await;

        store.add_time_entry(&entry(10, "2025-01-21", "01:00", activity_id, "u1")).await.unwrap();
        store.add_time_entry(&entry(10, "2025-01-21", "02:00", activity_id, "u2")).await.unwrap();

        let start = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 1, 26).unwrap();
        let entries = store.entries_for_week("acme", "proj-1", start, end, Some("u2")).await.unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].user_id, "u2");
    }

    #[tokio::test]
    async fn item_totals_sum_all_history() {
        let (store, activity_id) = seeded_store().await;

        store.add_time_entry(&entry(42, "2025-01-06", "01:30", activity_id, "u1")).await.unwrap();
        store.add_time_entry(&entry(42, "2025-03-03", "02:00", activity_id, "u1")).await.unwrap();
        store.add_time_entry(&entry(43, "2025-03-03", "05:00", activity_id, "u1")).await.unwrap();

        let total = store.total_hours_for_item("acme", "proj-1", 42).await.unwrap();
        assert_eq!(total, 3.5);
    }

    #[tokio::test]
    async fn project_lookup_is_case_insensitive() {
        let (store, _) = seeded_store().await;
        store
            .add_project("50a9ca09-710f-4478-8278-2d069902d2af", "Gestao Projetos", "acme")
            .await
            .unwrap();

        let id = store.canonical_project_id("GESTAO PROJETOS").await.unwrap();
        assert_eq!(id.as_deref(), Some("50a9ca09-710f-4478-8278-2d069902d2af"));

        let missing = store.canonical_project_id("Unknown").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn credentials_upsert_and_resolve() {
        let (store, _) = seeded_store().await;
        store.set_credential("acme", "pat-one").await.unwrap();
        store.set_credential("acme", "pat-two").await.unwrap();

        let token = store.token_for_org("acme").await.unwrap();
        assert_eq!(token.as_deref(), Some("pat-two"));
        assert!(store.token_for_org("other").await.unwrap().is_none());
    }
}
