//! Plain-text tables for the terminal
//!
//! Every function returns the rendered table as a `String`; printing is up to
//! the caller.

use std::fmt::Write;

use cashcast_core::analysis::{ExpenseShare, RunwayRow, ScenarioSeries};
use cashcast_core::query::{MilestoneRow, MilestoneStatus};
use cashcast_core::{BalanceSeries, Cast};
use jiff::civil::Date;

use crate::util::format::{
    format_currency, format_currency_short, format_month_delta, format_percentage, format_years,
};

const NAME_WIDTH: usize = 16;
const MISSING: &str = "--";

fn rule(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate to the name column, marking the cut with an ellipsis
fn fit_name(name: &str) -> String {
    if name.chars().count() > NAME_WIDTH {
        name.chars()
            .take(NAME_WIDTH - 1)
            .chain(std::iter::once('…'))
            .collect()
    } else {
        name.to_string()
    }
}

fn missing() -> String {
    MISSING.to_string()
}

fn or_missing<T>(value: Option<T>, f: impl FnOnce(T) -> String) -> String {
    value.map(f).unwrap_or_else(missing)
}

/// Window, parameters and headline figures of a run
pub fn summary(cast: &Cast, series: &BalanceSeries) -> String {
    let params = cast.params();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Window:    {} to {} ({} days)",
        params.window.start(),
        params.window.end(),
        params.window.days()
    );
    let _ = writeln!(out, "Start:     {}", format_currency(params.initial_balance));
    let _ = writeln!(
        out,
        "APR:       {}",
        or_missing(params.apr, |apr| format_percentage(apr / 100.0))
    );
    let _ = writeln!(
        out,
        "Min cash:  {}",
        or_missing(params.min_cash_floor, format_currency_short)
    );
    let _ = writeln!(out, "Events:    {}", cast.events().count());
    let _ = writeln!(
        out,
        "End:       {}",
        or_missing(series.final_balance(), format_currency)
    );
    out
}

pub fn milestones(rows: &[MilestoneRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>12}  {:<10}  {:>14}  {:>10}",
        "Target", "Date", "Balance", "In"
    );
    let _ = writeln!(out, "{}", rule(52));

    for row in rows {
        let (date, balance, years) = match row.status {
            MilestoneStatus::Passed => ("passed".to_string(), missing(), missing()),
            MilestoneStatus::NotReached => ("never".to_string(), missing(), missing()),
            MilestoneStatus::Reached {
                date,
                balance,
                years_until,
            } => (
                date.to_string(),
                format_currency_short(balance),
                format_years(years_until),
            ),
        };
        let _ = writeln!(
            out,
            "{:>12}  {:<10}  {:>14}  {:>10}",
            format_currency_short(row.amount),
            date,
            balance,
            years
        );
    }
    out
}

pub fn runway(rows: &[RunwayRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<NAME_WIDTH$}  {:<10}  {:>8}  {:>8}",
        "Scenario", "Broke on", "Months", "Diff"
    );
    let _ = writeln!(out, "{}", rule(NAME_WIDTH + 32));

    for row in rows {
        let _ = writeln!(
            out,
            "{:<NAME_WIDTH$}  {:<10}  {:>8}  {:>8}",
            fit_name(&row.scenario),
            or_missing(row.broke_on, |d| d.to_string()),
            or_missing(row.months_until_broke, |m| format!("{m:.1}")),
            or_missing(row.difference, format_month_delta)
        );
    }
    out
}

/// The `n` lowest balances of a run
pub fn worst_balances(balances: &[f64]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:>4}  {:>16}", "#", "Balance");
    let _ = writeln!(out, "{}", rule(22));
    for (i, balance) in balances.iter().enumerate() {
        let _ = writeln!(out, "{:>4}  {:>16}", i + 1, format_currency(*balance));
    }
    out
}

/// End balance of each scenario and where it bottoms out
pub fn scenarios(runs: &[ScenarioSeries]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<NAME_WIDTH$}  {:>14}  {:>14}  {:<10}",
        "Scenario", "End", "Low", "Low on"
    );
    let _ = writeln!(out, "{}", rule(NAME_WIDTH + 44));

    for run in runs {
        let low = lowest(&run.series);
        let _ = writeln!(
            out,
            "{:<NAME_WIDTH$}  {:>14}  {:>14}  {:<10}",
            fit_name(&run.label),
            or_missing(run.series.final_balance(), format_currency_short),
            or_missing(low.map(|(_, b)| b), format_currency_short),
            or_missing(low.map(|(d, _)| d), |d| d.to_string())
        );
    }
    out
}

fn lowest(series: &BalanceSeries) -> Option<(Date, f64)> {
    series.iter().min_by(|a, b| a.1.total_cmp(&b.1))
}

pub fn expenses(shares: &[ExpenseShare]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<NAME_WIDTH$}  {:>16}  {:>8}", "Expense", "Total", "Share");
    let _ = writeln!(out, "{}", rule(NAME_WIDTH + 28));
    for share in shares {
        let _ = writeln!(
            out,
            "{:<NAME_WIDTH$}  {:>16}  {:>8}",
            fit_name(&share.name),
            format_currency(share.total),
            format_percentage(share.share)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use cashcast_core::analysis::runway as compute_runway;
    use cashcast_core::config::Window;
    use cashcast_core::model::{Event, Prop};
    use cashcast_core::query::milestone_table;
    use jiff::civil::date;

    fn cast() -> Cast {
        let window = Window::new(date(2025, 1, 1), date(2025, 1, 10)).unwrap();
        Cast::new(window, 100.0)
            .add_event(Event::new("Paycheck", 50.0, date(2025, 1, 5)))
            .add_event(Event::new("Rent", -300.0, date(2025, 1, 8)))
    }

    #[test]
    fn test_fit_name() {
        assert_eq!(fit_name("Default"), "Default");
        let long = fit_name("A very long scenario name");
        assert_eq!(long.chars().count(), NAME_WIDTH);
        assert!(long.ends_with('…'));
    }

    #[test]
    fn test_summary_lines() {
        let cast = cast();
        let text = summary(&cast, &cast.running_balance());
        assert!(text.contains("2025-01-01 to 2025-01-10 (10 days)"));
        assert!(text.contains("APR:       --"));
        assert!(text.contains("Events:    2"));
        assert!(text.contains("End:       -$150.00"));
    }

    #[test]
    fn test_milestones_table() {
        let rows = milestone_table(&cast(), &[50.0, 120.0, 1_000.0], date(2025, 1, 1));
        let text = milestones(&rows);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[2].contains("passed"));
        assert!(lines[3].contains("2025-01-05"));
        assert!(lines[3].contains("$150"));
        assert!(lines[4].contains("never"));
    }

    #[test]
    fn test_runway_table() {
        let props = vec![Prop::new(
            "Windfall",
            vec![Event::new("Gift", 1_000.0, date(2025, 1, 2))],
        )];
        let rows = compute_runway(&cast(), &props, date(2025, 1, 1));
        let text = runway(&rows);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[2].starts_with("Default"));
        assert!(lines[2].contains("2025-01-08"));
        // The windfall never goes broke, so it has no months or difference
        assert!(lines[3].starts_with("Windfall"));
        assert!(lines[3].trim_end().ends_with(MISSING));
    }

    #[test]
    fn test_worst_balances() {
        let text = worst_balances(&[-150.0, 150.0]);
        assert!(text.contains("-$150.00"));
        assert_eq!(text.lines().count(), 4);
    }
}
