use std::{collections::BTreeMap, str::FromStr, sync::Arc};

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use clap::Parser;

use crate::{
    analysis::{app_totals, AppUsage},
    limits::{suggest_default, LimitStatus, LimitTracker},
    store::{entities::UsageRecord, record_store::RecordStore},
    utils::{clock::Clock, time::window_start},
};

use super::{
    dashboard::DEFAULT_WINDOW_DAYS,
    output::{print_limit_status, print_suggested_limits},
};

#[derive(Debug, Parser)]
pub struct LimitsCommand {
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_WINDOW_DAYS,
        value_parser = clap::value_parser!(u32).range(1..=30),
        help = "Base suggestions on the last N days"
    )]
    days: u32,
    #[arg(
        long = "set",
        help = "Daily limit in minutes, 0 to 180. Can be repeated: --set YouTube=30 --set Chrome=90"
    )]
    limits: Vec<LimitArg>,
}

/// One `APP=MINUTES` pair. The value is kept as given so the tracker can reject it with the app
/// name attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitArg {
    app: Arc<str>,
    minutes: i64,
}

impl FromStr for LimitArg {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (app, minutes) = s
            .rsplit_once('=')
            .ok_or_else(|| anyhow!("Expected APP=MINUTES, got {s}"))?;
        let app = app.trim();
        if app.is_empty() {
            return Err(anyhow!("App name is missing in {s}"));
        }
        Ok(Self {
            app: app.into(),
            minutes: minutes.trim().parse()?,
        })
    }
}

/// Today and the records of the last `days` days, `today - days` included.
fn load_window(
    days: u32,
    store: &impl RecordStore,
    clock: &impl Clock,
) -> Result<(NaiveDate, Vec<UsageRecord>)> {
    let today = clock.today();
    let records = store.query(window_start(today, days))?;
    Ok((today, records))
}

/// Every app of the window with its usage and suggested limit, most used first.
fn suggest_limits(records: &[UsageRecord]) -> Vec<(AppUsage, u32)> {
    app_totals(records)
        .into_iter()
        .map(|usage| {
            let suggestion = suggest_default(&usage.app, records);
            (usage, suggestion)
        })
        .collect()
}

/// Saves `limits` into a fresh tracker and compares usage on `today` against them.
fn save_limits(
    limits: Vec<LimitArg>,
    records: &[UsageRecord],
    today: NaiveDate,
) -> Result<Vec<LimitStatus>> {
    let mut tracker = LimitTracker::new();
    tracker.save(
        limits
            .into_iter()
            .map(|v| (v.app, v.minutes))
            .collect::<BTreeMap<_, _>>(),
    )?;
    Ok(tracker.limit_status(records, today))
}

/// Command to process `limits` command. Prints suggestions for every app seen in the window and,
/// when limits are given, saves them and compares today's usage against them.
pub fn process_limits_command(
    LimitsCommand { days, limits }: LimitsCommand,
    store: &impl RecordStore,
    clock: &impl Clock,
) -> Result<()> {
    let (today, records) = load_window(days, store, clock)?;
    print_suggested_limits(&suggest_limits(&records));

    if limits.is_empty() {
        return Ok(());
    }

    let statuses = save_limits(limits, &records, today)?;
    println!("Limits saved! You'll get alerts when exceeding these.");
    println!();
    print_limit_status(&statuses);
    Ok(())
}
