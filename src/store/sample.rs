use chrono::{Duration, NaiveDate};
use rand::Rng;

use super::entities::UsageRecord;

/// Apps and their categories used for the sample week.
const SAMPLE_APPS: [(&str, &str); 6] = [
    ("Instagram", "Social Media"),
    ("TikTok", "Social Media"),
    ("YouTube", "Entertainment"),
    ("WhatsApp", "Communication"),
    ("Chrome", "Productivity"),
    ("Email", "Productivity"),
];

const SAMPLE_DAYS: i64 = 7;

/// Produces one record per sample app for `today` and the six days before it, each with a random
/// duration between 15 and 120 minutes. Records come out oldest day first.
pub fn generate_sample(today: NaiveDate, rng: &mut impl Rng) -> Vec<UsageRecord> {
    (0..SAMPLE_DAYS)
        .rev()
        .map(|days_ago| today - Duration::days(days_ago))
        .flat_map(|date| SAMPLE_APPS.iter().map(move |&(app, category)| (date, app, category)))
        .map(|(date, app, category)| UsageRecord::new(date, app, rng.gen_range(15..=120), category))
        .collect()
}
