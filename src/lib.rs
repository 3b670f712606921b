//! Weekly timesheet aggregation over Azure DevOps work items.
//!
//! The crate fetches a project's work-item hierarchy, classifies each item's
//! lifecycle state into the category that governs whether its time entries
//! may still be edited, merges the items with locally stored entries, and
//! folds everything into a Monday-to-Sunday grid with per-day, per-item, and
//! whole-week totals. Entries live in a local SQLite store; effort totals are
//! written back to the platform after each mutation.

pub mod database;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::{Error, Result};
pub use services::devops::{DevOpsApi, DevOpsClient};
pub use services::hours::HoursSyncService;
pub use services::timesheet::TimesheetService;
