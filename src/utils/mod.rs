use regex::Regex;

pub mod config;
pub mod week;

const DURATION_PATTERN: &str = r"^(\d{1,2}):(\d{2})$";

/// Parses an "HH:mm" duration into (hours, minutes).
/// Anything that does not match the grammar counts as zero time.
pub fn parse_duration(raw: &str) -> (u32, u32) {
    let re = match Regex::new(DURATION_PATTERN) {
        Ok(re) => re,
        Err(_) => return (0, 0),
    };
    match re.captures(raw.trim()) {
        Some(caps) => {
            let hours = caps[1].parse().unwrap_or(0);
            let minutes = caps[2].parse().unwrap_or(0);
            (hours, minutes)
        }
        None => (0, 0),
    }
}

/// Converts an "HH:mm" duration to decimal hours ("01:30" -> 1.5).
pub fn duration_to_hours(raw: &str) -> f64 {
    let (hours, minutes) = parse_duration(raw);
    f64::from(hours) + f64::from(minutes) / 60.0
}

/// Formats a total in minutes as "HH:mm".
pub fn format_minutes(total_minutes: u32) -> String {
    format!("{:02}:{:02}", total_minutes / 60, total_minutes % 60)
}

/// Formats decimal hours as "HH:mm", rounding to the nearest minute.
pub fn format_hours(hours: f64) -> String {
    let minutes = (hours * 60.0).round().max(0.0) as u32;
    format_minutes(minutes)
}
