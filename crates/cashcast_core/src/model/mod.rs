mod event;
mod prop;
mod recurrence;
mod series;

pub use event::{DEFAULT_HORIZON_YEARS, Event};
pub use prop::Prop;
pub use recurrence::{RepeatInterval, expand_recurring, expand_semi_monthly};
pub use series::BalanceSeries;
