use anyhow::Result;
use chrono::{NaiveDate, Utc};
use rusqlite::types::Type;
use rusqlite::Connection;
use uuid::Uuid;

use crate::models::{Activity, TimeEntry};
use crate::utils::parse_duration;

fn text_to_uuid(idx: usize, raw: String) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn text_to_date(idx: usize, raw: String) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Entries for one organization/project inside a date window, oldest first,
/// optionally restricted to one user. Activity names come along via join.
pub fn list_week_entries(
    conn: &Connection,
    organization: &str,
    project_id: &str,
    week_start: NaiveDate,
    week_end: NaiveDate,
    user_id: Option<&str>,
) -> Result<Vec<TimeEntry>> {
    let user_clause = if user_id.is_some() { "AND e.user_id = ?5" } else { "" };

    let sql = format!(
        "SELECT e.id, e.work_item_id, e.organization, e.project_id, e.entry_date,
                e.duration, e.activity_id, COALESCE(a.name, ''), e.comment,
                e.user_id, e.user_name
         FROM time_entries e
         LEFT JOIN activities a ON a.id = e.activity_id
         WHERE e.organization = ?1 AND e.project_id = ?2
           AND e.entry_date >= ?3 AND e.entry_date <= ?4
           {}
         ORDER BY e.entry_date ASC, e.created_at ASC",
        user_clause
    );

    let mut params: Vec<Box<dyn rusqlite::types::ToSql>> = vec![
        Box::new(organization.to_string()),
        Box::new(project_id.to_string()),
        Box::new(week_start.format("%Y-%m-%d").to_string()),
        Box::new(week_end.format("%Y-%m-%d").to_string()),
    ];
    if let Some(user) = user_id {
        params.push(Box::new(user.to_string()));
    }
    let param_refs: Vec<&dyn rusqlite::types::ToSql> = params.iter().map(|p| p.as_ref()).collect();

    let mut stmt = conn.prepare(&sql)?;
    let entries = stmt
        .query_map(param_refs.as_slice(), |row| {
            Ok(TimeEntry {
                id: text_to_uuid(0, row.get::<_, String>(0)?)?,
                work_item_id: row.get(1)?,
                organization: row.get(2)?,
                project_id: row.get(3)?,
                entry_date: text_to_date(4, row.get::<_, String>(4)?)?,
                duration: row.get(5)?,
                activity_id: text_to_uuid(6, row.get::<_, String>(6)?)?,
                activity_name: row.get(7)?,
                comment: row.get(8)?,
                user_id: row.get(9)?,
                user_name: row.get(10)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(entries)
}

/// Total booked hours for one work item, summed over every entry ever logged.
/// Durations are parsed here since SQLite cannot add "HH:mm" strings.
pub fn total_hours_for_work_item(
    conn: &Connection,
    organization: &str,
    project_id: &str,
    work_item_id: i64,
) -> Result<f64> {
    let mut stmt = conn.prepare(
        "SELECT duration FROM time_entries
         WHERE organization = ?1 AND project_id = ?2 AND work_item_id = ?3",
    )?;

    let durations = stmt
        .query_map(
            rusqlite::params![organization, project_id, work_item_id],
            |row| row.get::<_, String>(0),
        )?
        .collect::<Result<Vec<_>, _>>()?;

    let total_minutes: u32 = durations
        .iter()
        .map(|d| {
            let (hours, minutes) = parse_duration(d);
            hours * 60 + minutes
        })
        .sum();

    Ok(f64::from(total_minutes) / 60.0)
}

/// Canonical platform id for a project display name, case-insensitive.
pub fn project_id_by_name(conn: &Connection, name: &str) -> Result<Option<String>> {
    let result: rusqlite::Result<String> = conn.query_row(
        "SELECT CAST(external_id AS TEXT) FROM projects
         WHERE UPPER(name) = UPPER(?1) LIMIT 1",
        [name],
        |row| row.get(0),
    );

    match result {
        Ok(id) => Ok(Some(id)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn credential_for_org(conn: &Connection, organization: &str) -> Result<Option<String>> {
    let result: rusqlite::Result<String> = conn.query_row(
        "SELECT token FROM org_credentials WHERE organization = ?1",
        [organization],
        |row| row.get(0),
    );

    match result {
        Ok(token) => Ok(Some(token)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn insert_activity(conn: &Connection, activity: &Activity) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO activities (id, name, active, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![
            activity.id.to_string(),
            activity.name,
            activity.active,
            Utc::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}

pub fn insert_time_entry(conn: &Connection, entry: &TimeEntry) -> Result<()> {
    conn.execute(
        "INSERT INTO time_entries (id, work_item_id, organization, project_id,
            entry_date, duration, activity_id, comment, user_id, user_name, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        rusqlite::params![
            entry.id.to_string(),
            entry.work_item_id,
            entry.organization,
            entry.project_id,
            entry.entry_date.format("%Y-%m-%d").to_string(),
            entry.duration,
            entry.activity_id.to_string(),
            entry.comment,
            entry.user_id,
            entry.user_name,
            Utc::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}

pub fn insert_project(
    conn: &Connection,
    external_id: &str,
    name: &str,
    organization: &str,
) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO projects (external_id, name, organization)
         VALUES (?1, ?2, ?3)",
        rusqlite::params![external_id, name, organization],
    )?;
    Ok(())
}

pub fn upsert_credential(conn: &Connection, organization: &str, token: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO org_credentials (organization, token, updated_at)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(organization) DO UPDATE SET
             token = excluded.token,
             updated_at = excluded.updated_at",
        rusqlite::params![organization, token, Utc::now().to_rfc3339()],
    )?;
    Ok(())
}
