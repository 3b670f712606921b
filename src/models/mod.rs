pub mod iteration;
pub mod settings;
pub mod time_entry;
pub mod timesheet;
pub mod work_item;

pub use iteration::*;
pub use settings::*;
pub use time_entry::*;
pub use timesheet::*;
pub use work_item::*;
