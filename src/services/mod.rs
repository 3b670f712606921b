pub mod devops;
pub mod hours;
pub mod icons;
pub mod timesheet;
pub mod work_items;

pub use devops::{DevOpsApi, DevOpsClient};
pub use hours::HoursSyncService;
pub use icons::IconCache;
pub use timesheet::TimesheetService;
