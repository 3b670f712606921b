use anyhow::Result;
use rusqlite::Connection;

pub fn create_tables(conn: &Connection) -> Result<()> {
    // Activities table
    conn.execute(
        "CREATE TABLE IF NOT EXISTS activities (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL
        )",
        [],
    )?;

    // Time entries table
    conn.execute(
        "CREATE TABLE IF NOT EXISTS time_entries (
            id TEXT PRIMARY KEY,
            work_item_id INTEGER NOT NULL,
            organization TEXT NOT NULL,
            project_id TEXT NOT NULL,
            entry_date TEXT NOT NULL,
            duration TEXT NOT NULL,
            activity_id TEXT NOT NULL,
            comment TEXT,
            user_id TEXT NOT NULL,
            user_name TEXT NOT NULL,
            created_at TEXT NOT NULL,
            FOREIGN KEY (activity_id) REFERENCES activities(id)
        )",
        [],
    )?;

    // Indexes for the weekly range query and the write-back totals
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_time_entries_week
         ON time_entries(organization, project_id, entry_date)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_time_entries_work_item
         ON time_entries(work_item_id)",
        [],
    )?;

    // Project cache: canonical platform id per display name
    conn.execute(
        "CREATE TABLE IF NOT EXISTS projects (
            external_id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            organization TEXT NOT NULL DEFAULT ''
        )",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_projects_name ON projects(name)",
        [],
    )?;

    // Per-organization platform tokens
    conn.execute(
        "CREATE TABLE IF NOT EXISTS org_credentials (
            organization TEXT PRIMARY KEY,
            token TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        [],
    )?;

    Ok(())
}
