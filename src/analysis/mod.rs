//! Aggregations over usage records. Every function here is pure and expects records that were
//! already filtered to the requested window.
//!
//! Ordering of apps with equal totals is first-seen order in the input, which keeps `top_n_apps`
//! and `top_app` reproducible.

use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    sync::Arc,
};

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    error::{Result, WellbeingError},
    store::entities::UsageRecord,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppUsage {
    pub app: Arc<str>,
    pub minutes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct DailyCategoryUsage {
    pub date: NaiveDate,
    pub category: Arc<str>,
    pub minutes: u64,
}

pub fn total_minutes(records: &[UsageRecord]) -> u64 {
    records.iter().map(|v| v.minutes as u64).sum()
}

/// Returns every app with its summed minutes, largest first.
pub fn app_totals(records: &[UsageRecord]) -> Vec<AppUsage> {
    let mut positions = HashMap::<Arc<str>, usize>::new();
    let mut usages = Vec::<AppUsage>::new();

    for record in records {
        let position = *positions.entry(record.app.clone()).or_insert_with(|| {
            usages.push(AppUsage {
                app: record.app.clone(),
                minutes: 0,
            });
            usages.len() - 1
        });
        usages[position].minutes += record.minutes as u64;
    }

    // Stable sort keeps first-seen order between equal totals.
    usages.sort_by(|a, b| b.minutes.cmp(&a.minutes));
    usages
}

pub fn top_n_apps(records: &[UsageRecord], n: usize) -> Vec<AppUsage> {
    let mut usages = app_totals(records);
    usages.truncate(n);
    usages
}

/// The most used app of the window. There is no sensible answer for an empty window, so it's an
/// error rather than a placeholder.
pub fn top_app(records: &[UsageRecord]) -> Result<Arc<str>> {
    app_totals(records)
        .into_iter()
        .next()
        .map(|v| v.app)
        .ok_or(WellbeingError::EmptyInput("top_app"))
}

/// Mean of per-date sums over the dates present in `records`. Dates without records don't count
/// towards the mean. Zero for an empty window.
pub fn average_daily_minutes(records: &[UsageRecord]) -> f64 {
    let dates = records.iter().map(|v| v.date).collect::<BTreeSet<_>>();
    if dates.is_empty() {
        return 0.;
    }
    total_minutes(records) as f64 / dates.len() as f64
}

/// [average_daily_minutes] in hours, rounded to one decimal. Halves round to even, so 15 minutes
/// a day is 0.2 hours.
pub fn average_daily_hours(records: &[UsageRecord]) -> f64 {
    (average_daily_minutes(records) / 60. * 10.).round_ties_even() / 10.
}

/// Sums minutes per (date, category). Sorted by date, then category.
pub fn daily_usage_by_category(records: &[UsageRecord]) -> Vec<DailyCategoryUsage> {
    let mut groups = BTreeMap::<(NaiveDate, Arc<str>), u64>::new();
    for record in records {
        *groups
            .entry((record.date, record.category.clone()))
            .or_default() += record.minutes as u64;
    }
    groups
        .into_iter()
        .map(|((date, category), minutes)| DailyCategoryUsage {
            date,
            category,
            minutes,
        })
        .collect()
}

pub fn category_totals(records: &[UsageRecord]) -> BTreeMap<Arc<str>, u64> {
    let mut totals = BTreeMap::<Arc<str>, u64>::new();
    for record in records {
        *totals.entry(record.category.clone()).or_default() += record.minutes as u64;
    }
    totals
}

/// Everything the dashboard shows for a window, in a form that can be printed or serialized.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub total_minutes: u64,
    pub top_app: Option<Arc<str>>,
    pub average_daily_hours: f64,
    pub daily_usage: Vec<DailyCategoryUsage>,
    pub top_apps: Vec<AppUsage>,
    pub category_totals: BTreeMap<Arc<str>, u64>,
}

impl DashboardSummary {
    pub fn from_records(records: &[UsageRecord], top: usize) -> Self {
        Self {
            total_minutes: total_minutes(records),
            top_app: top_app(records).ok(),
            average_daily_hours: average_daily_hours(records),
            daily_usage: daily_usage_by_category(records),
            top_apps: top_n_apps(records, top),
            category_totals: category_totals(records),
        }
    }
}
