//! Scenario comparisons and summaries built on top of the balance walk
//!
//! Each scenario runs on its own copy of the engine, so comparisons never
//! share an overlay slot. With the `parallel` feature the runs are spread
//! over rayon's thread pool.

use jiff::civil::Date;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::cast::Cast;
use crate::date_math::fast_days_between;
use crate::model::{BalanceSeries, Event, Prop};
use crate::query::{first_day_under, is_sentinel};

/// Label of the base-plan-only scenario
pub const DEFAULT_SCENARIO: &str = "Default";

/// A labelled simulation run
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioSeries {
    pub label: String,
    pub apr: Option<f64>,
    pub series: BalanceSeries,
}

/// "Default" followed by the given props
fn with_default(props: &[Prop]) -> Vec<Prop> {
    std::iter::once(Prop::empty(DEFAULT_SCENARIO))
        .chain(props.iter().cloned())
        .collect()
}

/// An engine copy with only `prop` active
fn scenario_cast(cast: &Cast, prop: &Prop) -> Cast {
    let mut scenario = cast.clone();
    scenario.clear_props().with_prop(prop);
    scenario
}

/// Run the base plan and each prop, plus each of those again at every
/// alternative APR (labelled `"{name}@{apr}%"`).
pub fn compare_scenarios(
    cast: &Cast,
    props: &[Prop],
    alternative_aprs: &[f64],
) -> Vec<ScenarioSeries> {
    let mut jobs: Vec<(String, Cast)> = Vec::new();
    for prop in with_default(props) {
        let scenario = scenario_cast(cast, &prop);
        let variants: Vec<(String, Cast)> = alternative_aprs
            .iter()
            .map(|&apr| (format!("{}@{apr}%", prop.name), scenario.clone().at_apr(apr)))
            .collect();
        jobs.push((prop.name, scenario));
        jobs.extend(variants);
    }

    tracing::debug!(runs = jobs.len(), "comparing scenarios");

    #[cfg(feature = "parallel")]
    let iter = jobs.into_par_iter();
    #[cfg(not(feature = "parallel"))]
    let iter = jobs.into_iter();

    iter.map(|(label, scenario)| ScenarioSeries {
        label,
        apr: scenario.params().apr,
        series: scenario.running_balance(),
    })
    .collect()
}

/// How long a scenario's cash lasts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunwayRow {
    pub scenario: String,
    /// First day the balance is at or below zero, if it happens in the window
    pub broke_on: Option<Date>,
    /// `(broke_on - today).days / 30`
    pub months_until_broke: Option<f64>,
    /// Months gained (positive) or lost relative to the default scenario
    pub difference: Option<f64>,
}

/// Months until each scenario first runs out of money, relative to `today`.
/// The first row is always the default scenario.
pub fn runway(cast: &Cast, props: &[Prop], today: Date) -> Vec<RunwayRow> {
    let scenarios = with_default(props);

    #[cfg(feature = "parallel")]
    let iter = scenarios.par_iter();
    #[cfg(not(feature = "parallel"))]
    let iter = scenarios.iter();

    let broke: Vec<(String, Option<Date>)> = iter
        .map(|prop| {
            let series = scenario_cast(cast, prop).running_balance();
            let date = first_day_under(&series, 0.0);
            (prop.name.clone(), (!is_sentinel(date)).then_some(date))
        })
        .collect();

    let months = |date: Option<Date>| date.map(|d| fast_days_between(today, d) as f64 / 30.0);
    let base = months(broke[0].1);

    broke
        .into_iter()
        .map(|(scenario, broke_on)| {
            let months_until_broke = months(broke_on);
            let difference = match (months_until_broke, base) {
                (Some(m), Some(b)) => Some(m - b),
                _ => None,
            };
            RunwayRow {
                scenario,
                broke_on,
                months_until_broke,
                difference,
            }
        })
        .collect()
}

/// Outflows grouped by event name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseShare {
    pub name: String,
    /// Sum of the group's (negative) amounts
    pub total: f64,
    /// Fraction of all outflows, between 0 and 1
    pub share: f64,
}

/// Group negative events by name, largest outflow first
pub fn expense_breakdown<'a>(events: impl IntoIterator<Item = &'a Event>) -> Vec<ExpenseShare> {
    let mut totals: FxHashMap<&str, f64> = FxHashMap::default();
    let mut overall = 0.0;
    for event in events.into_iter().filter(|e| e.amount < 0.0) {
        *totals.entry(event.name.as_str()).or_insert(0.0) += event.amount;
        overall += event.amount;
    }

    let mut shares: Vec<ExpenseShare> = totals
        .into_iter()
        .map(|(name, total)| ExpenseShare {
            name: name.to_string(),
            total,
            share: (total / overall).abs(),
        })
        .collect();
    shares.sort_by(|a, b| a.total.total_cmp(&b.total).then_with(|| a.name.cmp(&b.name)));
    shares
}

/// Trailing `n`-day average of a series, dated on the last day of each
/// window. Meant for `Cast::daily_changes` output. Empty when the series
/// has `n` or fewer days.
pub fn moving_average(series: &BalanceSeries, n: usize) -> Vec<(Date, f64)> {
    if n == 0 || series.len() <= n {
        return Vec::new();
    }

    let balances = series.balances();
    let mut sum: f64 = balances[..n].iter().sum();
    let mut averages = Vec::with_capacity(series.len() - n + 1);
    averages.push((series.dates()[n - 1], sum / n as f64));

    for i in n..series.len() {
        sum += balances[i] - balances[i - n];
        averages.push((series.dates()[i], sum / n as f64));
    }

    averages
}
