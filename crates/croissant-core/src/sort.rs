//! Stable in-place ordering of a slot array.
//!
//! After penalties are removed, the ledger re-sorts its slots so the gaps
//! collect at the high-index end. Ascending order is dated slots first (by
//! date), undated slots last; descending is the mirror. Stability matters:
//! undated slots compare equal, and keeping their relative order is what
//! keeps the deactivated run glued to the end of the array.

use serde::{Deserialize, Serialize};

use crate::slot::Slot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Earliest date first, undated slots last.
    Ascending,
    /// Undated slots first, latest date first after them.
    Descending,
}

impl Default for SortDirection {
    fn default() -> Self {
        SortDirection::Ascending
    }
}

/// Sort the slots in place, stably, by their date ordering.
pub fn sort_slots(slots: &mut [Slot], direction: SortDirection) {
    match direction {
        SortDirection::Ascending => slots.sort_by(Slot::cmp_by_date),
        SortDirection::Descending => slots.sort_by(|a, b| b.cmp_by_date(a)),
    }
}
