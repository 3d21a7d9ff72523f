use chrono::{Duration, NaiveDate};

/// Formats minutes the way the dashboard shows totals, e.g. `2h 5m`.
pub fn format_minutes(minutes: u64) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// First day of a trailing window of `days` days ending today. The window includes `today - days`
/// itself, so a 7 day window spans 8 calendar dates.
pub fn window_start(today: NaiveDate, days: u32) -> NaiveDate {
    today - Duration::days(days as i64)
}
