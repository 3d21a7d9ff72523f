use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

/// App name used for records produced by a finished focus session.
pub const FOCUS_SESSION_APP: &str = "Focus Session";
/// Category used for records produced by a finished focus session.
pub const FOCUS_SESSION_CATEGORY: &str = "Productivity";

/// One observation of time spent in one app on one day. Several records for the same app and day
/// are allowed, every aggregation sums them.
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Clone)]
pub struct UsageRecord {
    pub date: NaiveDate,
    pub app: Arc<str>,
    pub minutes: u32,
    pub category: Arc<str>,
}

impl UsageRecord {
    pub fn new(
        date: NaiveDate,
        app: impl Into<Arc<str>>,
        minutes: u32,
        category: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            date,
            app: app.into(),
            minutes,
            category: category.into(),
        }
    }

    /// Record written once a focus session runs to completion.
    pub fn focus_session(date: NaiveDate, minutes: u32) -> Self {
        Self::new(date, FOCUS_SESSION_APP, minutes, FOCUS_SESSION_CATEGORY)
    }
}
