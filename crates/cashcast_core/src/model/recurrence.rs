//! Recurrence expansion
//!
//! Occurrence `k` of a recurring event is always computed from the anchor
//! date (`anchor + k * interval`), never from the previous occurrence. A
//! month-end anchor therefore clamps in short months and returns to the 31st
//! afterwards instead of drifting to the 28th/29th for good.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::event::Event;
use crate::date_math::{add_days, add_months};

/// How often a recurring event repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatInterval {
    Daily,
    Weekly,
    BiWeekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl RepeatInterval {
    /// The `k`th occurrence counting from `anchor` (occurrence 0 is the anchor).
    /// `None` once the occurrence leaves the supported calendar.
    #[inline]
    pub fn nth_after(&self, anchor: Date, k: i32) -> Option<Date> {
        let (days, months) = match self {
            RepeatInterval::Daily => (1, 0),
            RepeatInterval::Weekly => (7, 0),
            RepeatInterval::BiWeekly => (14, 0),
            RepeatInterval::Monthly => (0, 1),
            RepeatInterval::Quarterly => (0, 3),
            RepeatInterval::Yearly => (0, 12),
        };
        if months == 0 {
            add_days(anchor, k.checked_mul(days)?)
        } else {
            add_months(anchor, k.checked_mul(months)?)
        }
    }
}

/// Expand `base` into one concrete event per interval step, from its own date
/// through its horizon (inclusive). Expansion also stops at the last date
/// jiff can represent.
///
/// Returns an empty list when the base date already lies past the horizon.
pub fn expand_recurring(base: &Event, interval: RepeatInterval) -> Vec<Event> {
    let horizon = base.horizon();
    let mut events = Vec::new();
    let mut k = 0;

    while let Some(date) = interval.nth_after(base.date, k) {
        if date > horizon {
            break;
        }
        events.push(base.instance_on(date));
        k += 1;
    }

    events
}

/// Expand `base` into two monthly streams, on the 1st and the 15th of each
/// month starting with the base event's month.
///
/// Each stream carries the full base amount, so a month receives the amount
/// twice.
pub fn expand_semi_monthly(base: &Event) -> Vec<Event> {
    let horizon = base.horizon();
    let first = jiff::civil::date(base.date.year(), base.date.month(), 1);
    let middle = jiff::civil::date(base.date.year(), base.date.month(), 15);

    let mut events = Vec::new();
    for anchor in [first, middle] {
        let stream = base.instance_on(anchor).until(horizon);
        events.extend(expand_recurring(&stream, RepeatInterval::Monthly));
    }
    events.sort_by_key(|e| e.date);
    events
}

impl Event {
    /// Expand on a fixed interval through the horizon
    pub fn repeat(&self, interval: RepeatInterval) -> Vec<Event> {
        expand_recurring(self, interval)
    }

    pub fn daily(&self) -> Vec<Event> {
        self.repeat(RepeatInterval::Daily)
    }

    pub fn weekly(&self) -> Vec<Event> {
        self.repeat(RepeatInterval::Weekly)
    }

    pub fn monthly(&self) -> Vec<Event> {
        self.repeat(RepeatInterval::Monthly)
    }

    pub fn yearly(&self) -> Vec<Event> {
        self.repeat(RepeatInterval::Yearly)
    }

    pub fn semi_monthly(&self) -> Vec<Event> {
        expand_semi_monthly(self)
    }
}
