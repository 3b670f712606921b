use chrono::{Datelike, Duration, Local, NaiveDate};

pub const WEEKDAY_LABELS: [&str; 7] = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"];

/// A Monday-to-Sunday window with its 7 ordered dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub dates: [NaiveDate; 7],
}

/// Returns the Monday of the week containing `date`.
pub fn week_start_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Builds the week window for an anchor date, normalized so the window
/// always starts on a Monday. `None` anchors on today.
pub fn week_window(anchor: Option<NaiveDate>) -> WeekWindow {
    let anchor = anchor.unwrap_or_else(|| Local::now().date_naive());
    let start = week_start_of(anchor);
    let mut dates = [start; 7];
    for (i, slot) in dates.iter_mut().enumerate() {
        *slot = start + Duration::days(i as i64);
    }
    WeekWindow {
        start,
        end: start + Duration::days(6),
        dates,
    }
}

/// Label shown over the grid, e.g. "19/01 - 25/01".
pub fn week_label(start: NaiveDate, end: NaiveDate) -> String {
    format!("{} - {}", start.format("%d/%m"), end.format("%d/%m"))
}
