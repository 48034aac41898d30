//! A single unit of penalty-tracking capacity.
//!
//! A slot is either free (`Available`), stamped with the date of a missed
//! submission (`Used`), or permanently burned (`Deactivated`). The state
//! follows the date except that deactivation is sticky: clearing the date
//! of a deactivated slot does not make it available again.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotState {
    /// The slot is free: a date can be stamped on it.
    Available,
    /// The slot holds a penalty date and counts toward capacity.
    Used,
    /// The slot is burned: it no longer counts toward capacity.
    Deactivated,
}

/// One penalty slot: an optional date plus the derived state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    date: Option<NaiveDate>,
    state: SlotState,
}

impl Slot {
    /// A fresh, available slot.
    pub fn new() -> Self {
        Self {
            date: None,
            state: SlotState::Available,
        }
    }

    /// A slot with the given date; the state is derived from it.
    pub fn with_date(date: Option<NaiveDate>) -> Self {
        let mut slot = Self::new();
        slot.set_date(date);
        slot
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn state(&self) -> SlotState {
        self.state
    }

    /// Stamp or clear the penalty date, updating the state with it.
    ///
    /// Stamping a date always makes the slot `Used`. Clearing the date makes
    /// it `Available` unless the slot is `Deactivated`, which is sticky and
    /// only reversed by [`Slot::reactivate`].
    pub fn set_date(&mut self, date: Option<NaiveDate>) {
        self.date = date;
        if date.is_some() {
            self.state = SlotState::Used;
        } else if self.state != SlotState::Deactivated {
            self.state = SlotState::Available;
        }
    }

    /// Burn the slot, bypassing the date-driven transition.
    pub fn deactivate(&mut self) {
        self.state = SlotState::Deactivated;
    }

    /// Restore a burned slot to `Available` (never directly to `Used`).
    pub fn reactivate(&mut self) {
        self.state = SlotState::Available;
    }

    /// Ordering used to keep a slot array tidy: a slot without a date sorts
    /// after any slot with one, dated slots compare by date ascending, and
    /// two undated slots are equal.
    pub fn cmp_by_date(&self, other: &Slot) -> Ordering {
        match (self.date, other.date) {
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (None, None) => Ordering::Equal,
            (Some(a), Some(b)) => a.cmp(&b),
        }
    }
}

impl Default for Slot {
    fn default() -> Self {
        Self::new()
    }
}
