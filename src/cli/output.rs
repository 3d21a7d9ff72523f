use ansi_term::{Colour, Style};

use crate::{
    analysis::{AppUsage, DashboardSummary},
    limits::LimitStatus,
    utils::time::format_minutes,
};

use super::dashboard::FocusHours;

fn heading(text: &str) {
    println!("{}", Style::new().bold().underline().paint(text));
}

pub fn print_summary(summary: &DashboardSummary) {
    println!("Total Screen Time\t{}", format_minutes(summary.total_minutes));
    println!(
        "Most Used App\t\t{}",
        summary.top_app.as_deref().unwrap_or("No data")
    );
    println!("Avg. Daily Use\t\t{:.1}h", summary.average_daily_hours);
    println!();

    heading("Daily Usage");
    for entry in &summary.daily_usage {
        println!(
            "{}\t{}\t{}",
            entry.date.format("%Y-%m-%d"),
            format_minutes(entry.minutes),
            entry.category
        );
    }
    println!();

    heading("Top Apps");
    print_apps(&summary.top_apps);
    println!();

    heading("By Category");
    for (category, minutes) in &summary.category_totals {
        println!("{}\t{}", format_minutes(*minutes), category);
    }
}

fn print_apps(apps: &[AppUsage]) {
    for entry in apps {
        println!("{}\t{}", format_minutes(entry.minutes), entry.app);
    }
}

pub fn print_focus_mode(hours: FocusHours) {
    println!();
    println!(
        "{}",
        Colour::Yellow.paint(format!("Social/entertainment apps blocked from {hours}"))
    );
}

pub fn print_suggested_limits(suggestions: &[(AppUsage, u32)]) {
    heading("Suggested Daily Limits");
    for (usage, suggestion) in suggestions {
        println!(
            "{}m\t{}\t(used {} in window)",
            suggestion,
            usage.app,
            format_minutes(usage.minutes)
        );
    }
}

pub fn print_limit_status(statuses: &[LimitStatus]) {
    heading("Today Against Limits");
    for status in statuses {
        let line = format!("{}/{}m\t{}", status.used, status.limit, status.app);
        if status.exceeded() {
            println!("{}", Colour::Red.bold().paint(line));
        } else {
            println!("{line}");
        }
    }
}
