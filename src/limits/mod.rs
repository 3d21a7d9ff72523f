//! Per-app daily limits. Limits only live as long as the process and are never enforced, they are
//! thresholds the presentation compares against usage.

use std::{collections::BTreeMap, sync::Arc};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use crate::{
    error::{Result, WellbeingError},
    store::entities::UsageRecord,
};

pub const MAX_LIMIT_MINUTES: i64 = 180;

const HEAVY_USE_THRESHOLD: f64 = 60.;
const HEAVY_USE_DEFAULT: u32 = 60;
const LIGHT_USE_DEFAULT: u32 = 30;

/// Suggests a starting value for a limit input. Apps averaging more than an hour per record get a
/// more generous default.
pub fn suggest_default(app: &str, records: &[UsageRecord]) -> u32 {
    let (sum, count) = records
        .iter()
        .filter(|v| &*v.app == app)
        .fold((0u64, 0u64), |(sum, count), v| (sum + v.minutes as u64, count + 1));

    if count > 0 && sum as f64 / count as f64 > HEAVY_USE_THRESHOLD {
        HEAVY_USE_DEFAULT
    } else {
        LIGHT_USE_DEFAULT
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LimitStatus {
    pub app: Arc<str>,
    pub limit: u32,
    pub used: u64,
}

impl LimitStatus {
    pub fn exceeded(&self) -> bool {
        self.used > self.limit as u64
    }
}

#[derive(Debug, Default)]
pub struct LimitTracker {
    limits: BTreeMap<Arc<str>, u32>,
}

impl LimitTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces all limits with `limits`. A single out of range value rejects the whole mapping and
    /// leaves the previous one in place.
    pub fn save(&mut self, limits: BTreeMap<Arc<str>, i64>) -> Result<()> {
        let mut validated = BTreeMap::new();
        for (app, value) in limits {
            let Ok(minutes) = u32::try_from(value) else {
                return Err(invalid(app, value));
            };
            if value > MAX_LIMIT_MINUTES {
                return Err(invalid(app, value));
            }
            validated.insert(app, minutes);
        }
        self.limits = validated;
        info!("Saved limits for {} apps", self.limits.len());
        Ok(())
    }

    pub fn get_all(&self) -> &BTreeMap<Arc<str>, u32> {
        &self.limits
    }

    /// Compares usage on `date` against every saved limit.
    pub fn limit_status(&self, records: &[UsageRecord], date: NaiveDate) -> Vec<LimitStatus> {
        self.limits
            .iter()
            .map(|(app, &limit)| LimitStatus {
                app: app.clone(),
                limit,
                used: records
                    .iter()
                    .filter(|v| v.date == date && v.app == *app)
                    .map(|v| v.minutes as u64)
                    .sum(),
            })
            .inspect(|status| {
                if status.exceeded() {
                    warn!("{} is over its limit: {}/{}", status.app, status.used, status.limit);
                }
            })
            .collect()
    }
}

fn invalid(app: Arc<str>, value: i64) -> WellbeingError {
    WellbeingError::InvalidLimit {
        app: app.to_string(),
        value,
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::BTreeMap, sync::Arc};

    use chrono::{Duration, NaiveDate};

    use crate::{error::WellbeingError, store::entities::UsageRecord};

    use super::{suggest_default, LimitStatus, LimitTracker};

    const TEST_DATE: NaiveDate = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

    fn limits<const N: usize>(values: [(&str, i64); N]) -> BTreeMap<Arc<str>, i64> {
        values.into_iter().map(|(app, v)| (app.into(), v)).collect()
    }

    #[test]
    fn test_suggest_default() {
        let records = vec![
            UsageRecord::new(TEST_DATE, "A", 40, "Work"),
            UsageRecord::new(TEST_DATE, "A", 50, "Work"),
            UsageRecord::new(TEST_DATE, "B", 70, "Play"),
            UsageRecord::new(TEST_DATE, "B", 80, "Play"),
            UsageRecord::new(TEST_DATE, "C", 60, "Play"),
        ];

        assert_eq!(suggest_default("A", &records), 30);
        assert_eq!(suggest_default("B", &records), 60);
        // Exactly an hour isn't more than an hour
        assert_eq!(suggest_default("C", &records), 30);
        assert_eq!(suggest_default("missing", &records), 30);
    }

    #[test]
    fn test_get_all_empty_before_save() {
        assert!(LimitTracker::new().get_all().is_empty());
    }

    #[test]
    fn test_save_replaces_everything() {
        let mut tracker = LimitTracker::new();
        tracker.save(limits([("A", 30), ("B", 0)])).unwrap();
        tracker.save(limits([("C", 180)])).unwrap();

        let saved = tracker.get_all();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved.get("C"), Some(&180));
    }

    #[test]
    fn test_invalid_save_keeps_previous_limits() {
        let mut tracker = LimitTracker::new();
        tracker.save(limits([("A", 45)])).unwrap();

        let too_big = tracker.save(limits([("A", 200)]));
        let negative = tracker.save(limits([("B", 10), ("C", -1)]));

        assert!(matches!(
            too_big,
            Err(WellbeingError::InvalidLimit { ref app, value: 200 }) if app == "A"
        ));
        assert!(matches!(negative, Err(WellbeingError::InvalidLimit { value: -1, .. })));
        assert_eq!(tracker.get_all().len(), 1);
        assert_eq!(tracker.get_all().get("A"), Some(&45));
    }

    #[test]
    fn test_invalid_first_save_leaves_nothing() {
        let mut tracker = LimitTracker::new();
        assert!(tracker.save(limits([("A", 200)])).is_err());
        assert!(tracker.get_all().is_empty());
    }

    #[test]
    fn test_limit_status_only_counts_given_day() {
        let mut tracker = LimitTracker::new();
        tracker.save(limits([("A", 30), ("B", 60)])).unwrap();
        let records = vec![
            UsageRecord::new(TEST_DATE, "A", 20, "Work"),
            UsageRecord::new(TEST_DATE, "A", 20, "Work"),
            UsageRecord::new(TEST_DATE - Duration::days(1), "B", 100, "Play"),
        ];

        let status = tracker.limit_status(&records, TEST_DATE);

        assert_eq!(
            status,
            vec![
                LimitStatus { app: "A".into(), limit: 30, used: 40 },
                LimitStatus { app: "B".into(), limit: 60, used: 0 },
            ]
        );
        assert!(status[0].exceeded());
        assert!(!status[1].exceeded());
    }
}
