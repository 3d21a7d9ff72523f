use std::{fmt::Display, str::FromStr};

use anyhow::{anyhow, Result};
use clap::Parser;
use serde::Serialize;
use tracing::debug;

use crate::{
    analysis::DashboardSummary,
    store::record_store::RecordStore,
    utils::{clock::Clock, time::window_start},
};

use super::output::{print_focus_mode, print_summary};

pub const DEFAULT_WINDOW_DAYS: u32 = 7;
pub const DEFAULT_TOP_APPS: usize = 5;

#[derive(Debug, Parser)]
pub struct DashboardCommand {
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_WINDOW_DAYS,
        value_parser = clap::value_parser!(u32).range(1..=30),
        help = "Show the last N days"
    )]
    days: u32,
    #[arg(short, long, default_value_t = DEFAULT_TOP_APPS, help = "Amount of apps in the top apps table")]
    top: usize,
    #[arg(
        long = "focus-hours",
        help = "Enable focus mode for an hour range, e.g. 9-17. Only displayed, nothing gets blocked"
    )]
    focus_hours: Option<FocusHours>,
    #[arg(long, help = "Print the summary as json")]
    json: bool,
}

/// Hour range of the focus mode. Both ends are in 0..=23.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FocusHours {
    pub start: u32,
    pub end: u32,
}

impl FocusHours {
    pub fn new_opt(start: u32, end: u32) -> Option<Self> {
        if start <= 23 && end <= 23 && start <= end {
            Some(Self { start, end })
        } else {
            None
        }
    }
}

impl FromStr for FocusHours {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once('-')
            .ok_or_else(|| anyhow!("Expected an hour range like 9-17, got {s}"))?;
        let start = start.trim().parse::<u32>()?;
        let end = end.trim().parse::<u32>()?;
        FocusHours::new_opt(start, end)
            .ok_or_else(|| anyhow!("Hours should be within 0-23 and start before end, got {s}"))
    }
}

impl Display for FocusHours {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:00 to {}:00", self.start, self.end)
    }
}

/// What the dashboard prints for a window. The focus mode hours are display only.
#[derive(Debug, Serialize)]
pub struct DashboardView {
    #[serde(flatten)]
    pub summary: DashboardSummary,
    pub focus_hours: Option<FocusHours>,
}

/// Reads the last `days` days from the store, `today - days` included.
pub fn build_dashboard(
    days: u32,
    top: usize,
    focus_hours: Option<FocusHours>,
    store: &impl RecordStore,
    clock: &impl Clock,
) -> Result<DashboardView> {
    let since = window_start(clock.today(), days);
    let records = store.query(since)?;
    debug!("Loaded {} records since {since}", records.len());

    Ok(DashboardView {
        summary: DashboardSummary::from_records(&records, top),
        focus_hours,
    })
}

/// Command to process `dashboard` command. Reads the recency window from the store and prints its
/// metrics.
pub fn process_dashboard_command(
    DashboardCommand {
        days,
        top,
        focus_hours,
        json,
    }: DashboardCommand,
    store: &impl RecordStore,
    clock: &impl Clock,
) -> Result<()> {
    let view = build_dashboard(days, top, focus_hours, store, clock)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    print_summary(&view.summary);
    if let Some(hours) = view.focus_hours {
        print_focus_mode(hours);
    }
    Ok(())
}
