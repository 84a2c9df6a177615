//! Tests for scenario comparison, runway, and summaries

use jiff::civil::date;

use crate::analysis::{
    DEFAULT_SCENARIO, compare_scenarios, expense_breakdown, moving_average, runway,
};
use crate::cast::Cast;
use crate::config::Window;
use crate::model::{Event, Prop};

/// $1,000 with $100 going out on the 1st of every month of 2025
fn burner() -> Cast {
    let window = Window::new(date(2025, 1, 1), date(2025, 12, 31)).unwrap();
    Cast::new(window, 1_000.0).add_events(
        Event::new("Rent", -100.0, date(2025, 1, 1))
            .until(date(2025, 12, 31))
            .monthly(),
    )
}

fn windfall() -> Prop {
    Prop::new("Windfall", vec![Event::new("Windfall", 5_000.0, date(2025, 2, 1))])
}

fn car() -> Prop {
    Prop::new("Car", vec![Event::new("Car", -500.0, date(2025, 1, 15))])
}

#[test]
fn test_compare_scenarios_labels_and_order() {
    let runs = compare_scenarios(&burner(), &[car()], &[5.0]);
    let labels: Vec<_> = runs.iter().map(|r| r.label.as_str()).collect();

    assert_eq!(labels, vec!["Default", "Default@5%", "Car", "Car@5%"]);
    assert_eq!(runs[0].apr, None);
    assert_eq!(runs[1].apr, Some(5.0));
    assert_eq!(runs[0].series, burner().running_balance());
}

/// Comparisons ignore whatever the caller left in the overlay slot
#[test]
fn test_compare_scenarios_starts_from_base() {
    let mut cast = burner();
    cast.with_prop(&windfall());

    let runs = compare_scenarios(&cast, &[], &[]);
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].label, DEFAULT_SCENARIO);
    assert_eq!(runs[0].series, burner().running_balance());
}

#[test]
fn test_runway() {
    let rows = runway(&burner(), &[windfall(), car()], date(2025, 1, 1));

    assert_eq!(rows.len(), 3);

    // Ten payments empty the account on Oct 1st, 273 days in
    assert_eq!(rows[0].scenario, "Default");
    assert_eq!(rows[0].broke_on, Some(date(2025, 10, 1)));
    assert!((rows[0].months_until_broke.unwrap() - 273.0 / 30.0).abs() < 1e-12);
    assert_eq!(rows[0].difference, Some(0.0));

    assert_eq!(rows[1].scenario, "Windfall");
    assert_eq!(rows[1].broke_on, None);
    assert_eq!(rows[1].months_until_broke, None);
    assert_eq!(rows[1].difference, None);

    // The car pulls it forward to May 1st
    assert_eq!(rows[2].broke_on, Some(date(2025, 5, 1)));
    let difference = rows[2].difference.unwrap();
    assert!((difference - (120.0 - 273.0) / 30.0).abs() < 1e-12);
}

#[test]
fn test_expense_breakdown() {
    let events = vec![
        Event::new("Rent", -1_000.0, date(2025, 1, 1)),
        Event::new("Rent", -1_000.0, date(2025, 2, 1)),
        Event::new("Coffee", -500.0, date(2025, 1, 3)),
        Event::new("Salary", 4_000.0, date(2025, 1, 15)),
    ];
    let shares = expense_breakdown(&events);

    assert_eq!(shares.len(), 2);
    assert_eq!(shares[0].name, "Rent");
    assert_eq!(shares[0].total, -2_000.0);
    assert!((shares[0].share - 0.8).abs() < 1e-12);
    assert_eq!(shares[1].name, "Coffee");
    assert!((shares[1].share - 0.2).abs() < 1e-12);
}

#[test]
fn test_moving_average_of_daily_changes() {
    let window = Window::new(date(2025, 1, 1), date(2025, 1, 4)).unwrap();
    let cast = Cast::new(window, 0.0).add_events([
        Event::new("a", 1.0, date(2025, 1, 1)),
        Event::new("b", 2.0, date(2025, 1, 2)),
        Event::new("c", 3.0, date(2025, 1, 3)),
        Event::new("d", 4.0, date(2025, 1, 4)),
    ]);
    let changes = cast.daily_changes();

    assert_eq!(
        moving_average(&changes, 2),
        vec![
            (date(2025, 1, 2), 1.5),
            (date(2025, 1, 3), 2.5),
            (date(2025, 1, 4), 3.5),
        ]
    );
    assert!(moving_average(&changes, 4).is_empty());
    assert!(moving_average(&changes, 0).is_empty());
}
