use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Every successful mutation of a ledger produces a LedgerEvent.
/// The ledger never pushes change notifications; callers forward the
/// returned event to whatever observes the ledger (display, persistence).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LedgerEvent {
    /// A penalty was recorded for `date`.
    PenaltyAdded {
        date: NaiveDate,
        /// Units the escalation rules charged for this date, 1 to 3.
        units: u8,
        /// How many of those units hit a full ledger. Each one wiped the
        /// dates and permanently deactivated a slot instead of inserting.
        exhaustions: u8,
        /// Whether the person owes croissants after this operation.
        owes_croissants: bool,
    },
    /// Date stamps equal to `date` were cleared and the slots re-sorted.
    PenaltyRemoved {
        date: NaiveDate,
        /// Number of slots that held `date`. Zero means nothing matched
        /// and the ledger is unchanged.
        cleared: usize,
    },
    /// The most recently deactivated slot was restored to service.
    SlotReactivated {
        /// Index of the restored slot.
        index: usize,
        /// Usable capacity after restoration.
        limit: usize,
    },
}
