//! Escalation rules: how many slot units a missed date costs.
//!
//! Pure functions of the date and the ledger's current slots. A regular miss
//! costs one unit. Fridays and Mondays cost two (the days the weekly
//! submission is due or caught up). If Monday through Thursday of the same
//! week are already stamped, one more unit is added on top, for a range of
//! one to three units per date.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::slot::{Slot, SlotState};

/// The Monday of the calendar week containing `date` (weeks run Mon-Sun).
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// True when every weekday Monday through Thursday of `date`'s week is
/// stamped on at least one non-deactivated slot.
///
/// Thursday is the last day checked: when this predicate matters, Friday is
/// the date being penalized. The same Monday-Thursday window is used
/// whatever weekday `date` falls on.
pub fn whole_week_already_penalized(slots: &[Slot], date: NaiveDate) -> bool {
    let monday = week_start(date);
    (0..4).all(|offset| {
        let weekday = monday + Duration::days(offset);
        slots
            .iter()
            .any(|slot| slot.date() == Some(weekday) && slot.state() != SlotState::Deactivated)
    })
}

/// Number of slot units a penalty on `date` consumes, from 1 to 3.
pub fn units(slots: &[Slot], date: NaiveDate) -> u8 {
    let mut units = 1;
    if matches!(date.weekday(), Weekday::Fri | Weekday::Mon) {
        units = 2;
    }
    if whole_week_already_penalized(slots, date) {
        units += 1;
    }
    units
}
