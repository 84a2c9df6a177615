//! Tests for the daily balance walk without interest

use jiff::civil::date;

use crate::cast::Cast;
use crate::config::{SimulationParams, Window};
use crate::model::Event;
use crate::query::{SENTINEL_DATE, first_day_over, first_day_under};
use crate::simulation::simulate;

fn paycheck_cast() -> Cast {
    let window = Window::new(date(2024, 1, 1), date(2024, 1, 10)).unwrap();
    Cast::new(window, 100.0).add_event(Event::new("paycheck", 50.0, date(2024, 1, 5)))
}

/// One paycheck mid-window: flat before, stepped up after
#[test]
fn test_paycheck_scenario() {
    let series = paycheck_cast().running_balance();

    assert_eq!(series.len(), 10);
    for (day, balance) in series.iter() {
        let expected = if day < date(2024, 1, 5) { 100.0 } else { 150.0 };
        assert_eq!(balance, expected, "balance on {day}");
    }

    assert_eq!(first_day_over(&series, 120.0), date(2024, 1, 5));
    assert_eq!(first_day_under(&series, 50.0), SENTINEL_DATE);
}

/// Every day differs from the previous one by exactly that day's transactions
#[test]
fn test_balance_is_previous_plus_day_sum() {
    let window = Window::new(date(2025, 1, 1), date(2025, 3, 31)).unwrap();
    let events: Vec<Event> = Event::new("Rent", -1_200.0, date(2025, 1, 1))
        .until(date(2025, 3, 31))
        .monthly()
        .into_iter()
        .chain(
            Event::new("Salary", 900.0, date(2025, 1, 3))
                .until(date(2025, 3, 31))
                .weekly(),
        )
        .chain([
            Event::new("Gift", 75.0, date(2025, 2, 14)),
            Event::new("Dinner", -60.0, date(2025, 2, 14)),
        ])
        .collect();
    let cast = Cast::new(window, 2_000.0).add_events(events.clone());
    let series = cast.running_balance();

    let day_sum = |d: jiff::civil::Date| -> f64 {
        events
            .iter()
            .filter(|e| e.date == d)
            .map(|e| e.amount)
            .sum()
    };

    let (dates, balances) = series.split();
    assert_eq!(balances[0], 2_000.0 + day_sum(dates[0]));
    for i in 1..dates.len() {
        let expected = balances[i - 1] + day_sum(dates[i]);
        assert!(
            (balances[i] - expected).abs() < 1e-9,
            "{}: expected {expected}, got {}",
            dates[i],
            balances[i]
        );
    }
}

/// A window of one day yields a single entry
#[test]
fn test_zero_length_window() {
    let day = date(2025, 7, 4);
    let cast = Cast::new(Window::single_day(day), 10.0)
        .add_event(Event::new("Fireworks", -4.0, day));
    let series = cast.running_balance();

    assert_eq!(series.len(), 1);
    assert_eq!(series.get(day), Some(6.0));
}

/// Events before or after the window never touch the series
#[test]
fn test_events_outside_window_ignored() {
    let window = Window::new(date(2025, 1, 1), date(2025, 1, 31)).unwrap();
    let cast = Cast::new(window, 500.0).add_events([
        Event::new("Too early", -100.0, date(2024, 12, 31)),
        Event::new("Too late", -100.0, date(2025, 2, 1)),
        Event::new("First day", 25.0, date(2025, 1, 1)),
        Event::new("Last day", 25.0, date(2025, 1, 31)),
    ]);
    let series = cast.running_balance();

    assert_eq!(series.get(date(2025, 1, 1)), Some(525.0));
    assert_eq!(series.get(date(2025, 1, 30)), Some(525.0));
    assert_eq!(series.final_balance(), Some(550.0));
}

/// A day always reaches its own balance
#[test]
fn test_first_day_over_own_start_balance() {
    let series = paycheck_cast().running_balance();
    let start_balance = series.balances()[0];
    assert_eq!(first_day_over(&series, start_balance), date(2024, 1, 1));
}

/// Change-only mode reports each day's net movement and ignores APR
#[test]
fn test_change_only_mode() {
    let window = Window::new(date(2025, 1, 1), date(2025, 1, 5)).unwrap();
    let events = vec![
        Event::new("In", 40.0, date(2025, 1, 2)),
        Event::new("Out", -15.0, date(2025, 1, 2)),
        Event::new("Out", -5.0, date(2025, 1, 4)),
    ];
    let params = SimulationParams::new(window)
        .initial_balance(1_000.0)
        .apr(10.0)
        .change_only(true);

    let series = simulate(&params, &events, &[]);
    assert_eq!(series.balances(), &[0.0, 25.0, 0.0, -5.0, 0.0]);

    let cast = Cast::from_params(params.change_only(false)).add_events(events);
    assert_eq!(cast.daily_changes(), series);
}

/// Same inputs, same series; nothing leaks between runs
#[test]
fn test_repeated_runs_are_identical() {
    let cast = paycheck_cast().at_apr(5.0);
    assert_eq!(cast.running_balance(), cast.running_balance());
}

/// `trim` and `last_day` see the effective universe
#[test]
fn test_trim_and_last_day() {
    let window = Window::new(date(2025, 1, 1), date(2025, 1, 31)).unwrap();
    let cast = Cast::new(window, 0.0).add_events([
        Event::new("Before", 1.0, date(2024, 12, 1)),
        Event::new("Inside", 1.0, date(2025, 1, 15)),
        Event::new("After", 1.0, date(2025, 3, 1)),
    ]);
    assert_eq!(cast.last_day(), Some(date(2025, 3, 1)));

    let trimmed = cast.clone().trim();
    assert_eq!(trimmed.base_events().len(), 1);
    assert_eq!(trimmed.last_day(), Some(date(2025, 1, 15)));
    assert_eq!(trimmed.running_balance(), cast.running_balance());
}
