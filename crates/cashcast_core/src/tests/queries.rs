//! Tests for searches over a balance series

use jiff::civil::date;

use crate::cast::Cast;
use crate::config::Window;
use crate::model::Event;
use crate::query::{
    SENTINEL_DATE, first_day_over, first_day_over_with_balance, first_day_under, is_sentinel,
    min_n_balances,
};

/// Balance dips to 20 on the 3rd, recovers, then bottoms at -10 on the 8th
fn dip_and_recover() -> Cast {
    let window = Window::new(date(2025, 1, 1), date(2025, 1, 10)).unwrap();
    Cast::new(window, 100.0).add_events([
        Event::new("Bill", -80.0, date(2025, 1, 3)),
        Event::new("Refund", 200.0, date(2025, 1, 5)),
        Event::new("Splurge", -230.0, date(2025, 1, 8)),
    ])
}

/// The first dip is reported, not the lowest point
#[test]
fn test_first_day_under_reports_first_dip() {
    let series = dip_and_recover().running_balance();

    assert_eq!(first_day_under(&series, 50.0), date(2025, 1, 3));
    assert_eq!(first_day_under(&series, 0.0), date(2025, 1, 8));
    assert_eq!(first_day_under(&series, -100.0), SENTINEL_DATE);
}

#[test]
fn test_first_day_over_with_balance() {
    let series = dip_and_recover().running_balance();

    assert_eq!(
        first_day_over_with_balance(&series, 200.0),
        (date(2025, 1, 5), Some(220.0))
    );
    assert_eq!(first_day_over(&series, 220.0), date(2025, 1, 5));

    let (never, balance) = first_day_over_with_balance(&series, 1_000.0);
    assert!(is_sentinel(never));
    assert_eq!(balance, None);
}

/// Thresholds are inclusive on both searches
#[test]
fn test_thresholds_inclusive() {
    let series = dip_and_recover().running_balance();
    assert_eq!(first_day_under(&series, 20.0), date(2025, 1, 3));
    assert_eq!(first_day_over(&series, 100.0), date(2025, 1, 1));
}

#[test]
fn test_min_n_balances() {
    let series = dip_and_recover().running_balance();

    assert_eq!(min_n_balances(&series, 3), vec![-10.0, -10.0, -10.0]);
    assert_eq!(min_n_balances(&series, 0), Vec::<f64>::new());

    let all = min_n_balances(&series, 100);
    assert_eq!(all.len(), series.len());
    assert!(all.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(all.last(), Some(&220.0));
}
